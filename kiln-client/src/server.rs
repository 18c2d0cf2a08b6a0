//! Job server abstraction
//!
//! The driver only needs three questions answered by the server. The trait
//! keeps it independent of HTTP so it can be tested against scripted servers.

use async_trait::async_trait;
use kiln_core::domain::{BuildInfo, BuildRequest, QueueItem, QueueTicket, RunHandle};

use crate::JenkinsClient;
use crate::error::Result;

/// Remote job server operations needed to drive a build
#[async_trait]
pub trait JobServer: Send + Sync {
    /// Submits a build and returns the ticket of its queue item
    ///
    /// Parameterized requests must carry every parameter in the trigger.
    async fn start_job(&self, request: &BuildRequest) -> Result<QueueTicket>;

    /// Fetches the server's current view of a queue item
    async fn queue_item(&self, ticket: QueueTicket) -> Result<QueueItem>;

    /// Fetches the server's current view of a build run
    async fn build_info(&self, run: &RunHandle) -> Result<BuildInfo>;
}

#[async_trait]
impl JobServer for JenkinsClient {
    async fn start_job(&self, request: &BuildRequest) -> Result<QueueTicket> {
        self.trigger_build(request).await
    }

    async fn queue_item(&self, ticket: QueueTicket) -> Result<QueueItem> {
        self.get_queue_item(ticket).await
    }

    async fn build_info(&self, run: &RunHandle) -> Result<BuildInfo> {
        self.get_build(run).await
    }
}
