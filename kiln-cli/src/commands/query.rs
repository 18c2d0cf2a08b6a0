//! Query command handlers
//!
//! One-shot views of a queue item or a build run.

use anyhow::{Context, Result};
use colored::*;
use kiln_client::{JenkinsClient, JobServer};
use kiln_core::domain::{BuildInfo, QueueItem, QueueTicket, RunHandle};
use serde_json::Value;

use super::build::colorize_result;

/// Get and display a queue item
pub async fn show_queue_item(client: &JenkinsClient, ticket: QueueTicket, json: bool) -> Result<()> {
    let item = client
        .queue_item(ticket)
        .await
        .with_context(|| format!("Failed to fetch queue item {}", ticket))?;

    if json {
        return print_raw(&item.raw);
    }

    print_queue_item(ticket, &item);
    Ok(())
}

/// Get and display a build run
pub async fn show_build(client: &JenkinsClient, job: String, number: u64, json: bool) -> Result<()> {
    let run = RunHandle::new(job, number);
    let info = client
        .build_info(&run)
        .await
        .with_context(|| format!("Failed to fetch build {}", run))?;

    if json {
        return print_raw(&info.raw);
    }

    print_build(&run, &info);
    Ok(())
}

fn print_raw(payload: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

/// Print queue item details
fn print_queue_item(ticket: QueueTicket, item: &QueueItem) {
    println!("{}", "Queue Item:".bold());
    println!("  Ticket:     {}", ticket.to_string().cyan());

    if item.cancelled {
        println!("  State:      {}", "Cancelled".dimmed());
    } else if let Some(executable) = &item.executable {
        let number = executable
            .number
            .map(|n| format!("#{}", n))
            .unwrap_or_else(|| "?".to_string());
        println!("  State:      {} as build {}", "Started".green(), number);
        if let Some(url) = &executable.url {
            println!("  URL:        {}", url.dimmed());
        }
    } else {
        println!("  State:      {}", "Waiting".yellow());
        if let Some(why) = &item.why {
            println!("  Reason:     {}", why);
        }
    }
}

/// Print build run details
fn print_build(run: &RunHandle, info: &BuildInfo) {
    println!("{}", "Build Details:".bold());
    println!("  Build:      {}", run.to_string().cyan());

    if let Some(name) = &info.display_name {
        println!("  Name:       {}", name);
    }

    if let Some(url) = &info.url {
        println!("  URL:        {}", url.dimmed());
    }

    match (info.building, info.result.as_deref()) {
        (Some(true), _) => println!("  Status:     {}", "Building".cyan()),
        (_, Some(result)) => println!("  Result:     {}", colorize_result(result)),
        _ => println!("  Status:     {}", "Unknown".dimmed()),
    }

    if let Some(started) = info.started_at() {
        println!("  Started:    {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(elapsed) = info.elapsed() {
        println!("  Duration:   {}s", elapsed.as_secs());
    }
}
