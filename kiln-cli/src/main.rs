//! Kiln CLI
//!
//! Command-line interface for driving builds on a Jenkins job server.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use kiln_client::ServerConfig;
use kiln_driver::DriverConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Trigger Jenkins builds and follow them to completion", long_about = None)]
struct Cli {
    /// Job server URL
    #[arg(long, env = "JENKINS_URL", default_value = "http://localhost:8080/")]
    url: String,

    /// User the API token belongs to
    #[arg(long, env = "JENKINS_USER", default_value = "")]
    user: String,

    /// API token
    #[arg(long, env = "JENKINS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so event output on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiln_cli=info,kiln_driver=info,kiln_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let server = match cli.token {
        Some(token) => ServerConfig::new(cli.url).with_credentials(cli.user, token),
        None => ServerConfig {
            username: cli.user,
            ..ServerConfig::new(cli.url)
        },
    };

    let config = Config {
        server,
        driver: DriverConfig::from_env(),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
