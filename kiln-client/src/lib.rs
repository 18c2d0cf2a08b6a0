//! Kiln HTTP Client
//!
//! Client for the job server's remote access API. It knows how to trigger a
//! job, read a queue item and read a build run; deciding what those answers
//! mean is left to the driver.
//!
//! # Example
//!
//! ```no_run
//! use kiln_client::{JenkinsClient, JobServer, ServerConfig};
//! use kiln_core::domain::BuildRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::new("http://localhost:8080/").with_credentials("bot", "token");
//!     let client = JenkinsClient::new(config)?;
//!
//!     let ticket = client
//!         .start_job(&BuildRequest::new("deploy").with_parameter("env", "staging"))
//!         .await?;
//!
//!     println!("Queued as {}", ticket);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod jobs;
mod queue;
mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ClientError, Result};
pub use queue::parse_queue_location;
pub use server::JobServer;

use kiln_core::domain::{BuildRequest, QueueTicket, RunHandle};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

/// HTTP client for a Jenkins-style job server
///
/// Holds no per-build state, so one instance can be cloned and shared by any
/// number of concurrent builds.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Base URL of the server (e.g., "http://localhost:8080/")
    base_url: Url,
    username: String,
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl JenkinsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `config` - Server location and credentials
    ///
    /// # Example
    /// ```
    /// use kiln_client::{JenkinsClient, ServerConfig};
    ///
    /// let client = JenkinsClient::new(ServerConfig::new("http://localhost:8080")).unwrap();
    /// ```
    pub fn new(config: ServerConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(config: ServerConfig, client: Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidRequest(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            username: config.username,
            token: config.token,
            client,
        })
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // =============================================================================
    // URL Templating
    // =============================================================================

    /// URL that triggers a build of the request's job
    ///
    /// Unparameterized requests use `build`; anything else uses
    /// `buildWithParameters` with every parameter form-encoded in the query.
    pub fn trigger_url(&self, request: &BuildRequest) -> Result<Url> {
        let action = if request.is_parameterized() {
            "buildWithParameters"
        } else {
            "build"
        };

        let mut segments = job_segments(&request.job)?;
        segments.push(action);
        let mut url = self.endpoint(segments)?;

        if request.is_parameterized() {
            url.query_pairs_mut().extend_pairs(&request.parameters);
        }

        Ok(url)
    }

    /// URL of a queue item's JSON view
    pub fn queue_url(&self, ticket: QueueTicket) -> Result<Url> {
        let id = ticket.to_string();
        self.endpoint(["queue", "item", id.as_str(), "api", "json"])
    }

    /// URL of a build run's JSON view
    pub fn build_url(&self, run: &RunHandle) -> Result<Url> {
        let number = run.number.to_string();
        let mut segments = job_segments(&run.job)?;
        segments.extend([number.as_str(), "api", "json"]);
        self.endpoint(segments)
    }

    fn endpoint<I, S>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("{} has no path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // =============================================================================
    // Requests
    // =============================================================================

    /// Start an authenticated request
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

        if self.username.is_empty() {
            builder
        } else {
            builder.basic_auth(&self.username, self.token.as_deref())
        }
    }

    /// Check the status code and decode the body as loosely-typed JSON
    async fn handle_json(&self, response: reqwest::Response) -> Result<Value> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Turn a non-success status into an error carrying the body
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

/// Path segments addressing a job, expanding folders (`a/b` -> `job/a/job/b`)
fn job_segments(job: &str) -> Result<Vec<&str>> {
    let names: Vec<&str> = job.split('/').filter(|name| !name.is_empty()).collect();

    if names.is_empty() {
        return Err(ClientError::InvalidRequest(
            "job name cannot be empty".to_string(),
        ));
    }

    Ok(names.into_iter().flat_map(|name| ["job", name]).collect())
}
