//! Configuration module
//!
//! Bundles the job server connection and the driver pacing.

use anyhow::{Context, Result};
use kiln_client::ServerConfig;
use kiln_driver::DriverConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the job server lives and how to log in
    pub server: ServerConfig,
    /// Retry budget and poll intervals
    pub driver: DriverConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.server
            .validate()
            .context("Invalid job server configuration")?;
        self.driver
            .validate()
            .context("Invalid driver configuration")?;
        Ok(())
    }
}
