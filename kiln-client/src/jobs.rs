//! Job-related API endpoints

use crate::JenkinsClient;
use crate::error::{ClientError, Result};
use crate::queue::parse_queue_location;
use kiln_core::domain::{BuildInfo, BuildRequest, QueueTicket, RunHandle};
use reqwest::Method;
use reqwest::header::LOCATION;
use tracing::debug;

impl JenkinsClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Trigger a build of a job
    ///
    /// # Arguments
    /// * `request` - Job and parameters to build with
    ///
    /// # Returns
    /// The ticket of the queue item the server created
    pub async fn trigger_build(&self, request: &BuildRequest) -> Result<QueueTicket> {
        let url = self.trigger_url(request)?;

        debug!("Triggering {} via {}", request.job, url.path());

        let response = self.request(Method::POST, url).send().await?;
        let response = self.check_status(response).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!(
                    "build of {} accepted without a queue location",
                    request.job
                ))
            })?;

        parse_queue_location(location)
    }

    /// Get the current state of a build run
    ///
    /// # Arguments
    /// * `run` - Job and run number
    pub async fn get_build(&self, run: &RunHandle) -> Result<BuildInfo> {
        let url = self.build_url(run)?;

        debug!("Fetching build {}", run);

        let response = self.request(Method::GET, url).send().await?;
        let payload = self.handle_json(response).await?;

        BuildInfo::from_payload(payload).map_err(|e| {
            ClientError::InvalidResponse(format!("malformed build {}: {}", run, e))
        })
    }
}
