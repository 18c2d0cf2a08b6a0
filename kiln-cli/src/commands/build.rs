//! Build command handler
//!
//! Drives a build to completion and prints its lifecycle events.

use anyhow::Result;
use colored::*;
use kiln_client::JenkinsClient;
use kiln_core::domain::BuildRequest;
use kiln_core::event::LifecycleEvent;
use kiln_driver::{BuildDriver, BuildObserver};
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;

/// Drive a build and fail unless it succeeds
pub async fn run_build(
    client: JenkinsClient,
    config: &Config,
    job: String,
    params: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let request = params
        .into_iter()
        .fold(BuildRequest::new(job), |request, (key, value)| {
            request.with_parameter(key, value)
        });

    let driver = BuildDriver::with_config(Arc::new(client), config.driver);
    let mut printer = EventPrinter { json };

    let outcome = tokio::select! {
        result = driver.run_build(&request, &mut printer) => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; the build keeps running on the server");
            anyhow::bail!("Stopped following build of {}", request.job);
        }
    };

    if !outcome.is_success() {
        anyhow::bail!("Build of {} finished with {}", request.job, outcome.result);
    }

    Ok(())
}

/// Parse a `KEY=VALUE` build parameter
///
/// Only the first `=` separates key from value, so values may contain `=`.
pub fn parse_parameter(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", input))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name is empty in {:?}", input));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Prints lifecycle events as they arrive
struct EventPrinter {
    json: bool,
}

impl BuildObserver for EventPrinter {
    fn on_event(&mut self, event: &LifecycleEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to encode event: {}", e),
            }
            return;
        }

        match event {
            LifecycleEvent::Queued { ticket } => {
                println!("{} Queued as item {}", "⏳".yellow(), ticket.to_string().bold());
            }
            LifecycleEvent::Started { number, url, .. } => {
                println!("{} Started build #{}", "▸".cyan(), number.to_string().bold());
                println!("  {}", url.dimmed());
            }
            LifecycleEvent::Finished { number, result, .. } => {
                let label = match number {
                    Some(number) => format!("Build #{}", number),
                    None => "Queued build".to_string(),
                };
                println!("{} {} finished: {}", "■".bold(), label, colorize_result(result));
            }
        }
    }
}

/// Colorize a build result code for display
pub fn colorize_result(result: &str) -> ColoredString {
    match result {
        "SUCCESS" => result.green(),
        "FAILURE" => result.red(),
        "UNSTABLE" => result.yellow(),
        "ABORTED" | "NOT_BUILT" => result.dimmed(),
        _ => result.normal(),
    }
}
