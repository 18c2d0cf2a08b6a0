//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod query;

use anyhow::{Context, Result};
use clap::Subcommand;
use kiln_client::JenkinsClient;
use kiln_core::domain::QueueTicket;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a build and follow it until it finishes
    Build {
        /// Job name, folders separated by '/'
        job: String,

        /// Build parameter, repeatable
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = build::parse_parameter)]
        params: Vec<(String, String)>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show a queue item
    Queue {
        /// Queue ticket printed when the build was queued
        ticket: QueueTicket,

        /// Print the raw server response
        #[arg(long)]
        json: bool,
    },
    /// Show a build run
    Status {
        /// Job name, folders separated by '/'
        job: String,

        /// Run number
        number: u64,

        /// Print the raw server response
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client =
        JenkinsClient::new(config.server.clone()).context("Failed to create job server client")?;

    match command {
        Commands::Build { job, params, json } => {
            build::run_build(client, config, job, params, json).await
        }
        Commands::Queue { ticket, json } => query::show_queue_item(&client, ticket, json).await,
        Commands::Status { job, number, json } => {
            query::show_build(&client, job, number, json).await
        }
    }
}
