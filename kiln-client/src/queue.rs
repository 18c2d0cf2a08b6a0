//! Queue-related API endpoints

use crate::JenkinsClient;
use crate::error::{ClientError, Result};
use kiln_core::domain::{QueueItem, QueueTicket};
use reqwest::Method;
use tracing::debug;

impl JenkinsClient {
    /// Get the current state of a queue item
    ///
    /// # Arguments
    /// * `ticket` - Ticket returned when the build was triggered
    pub async fn get_queue_item(&self, ticket: QueueTicket) -> Result<QueueItem> {
        let url = self.queue_url(ticket)?;

        debug!("Fetching queue item {}", ticket);

        let response = self.request(Method::GET, url).send().await?;
        let payload = self.handle_json(response).await?;

        QueueItem::from_payload(payload).map_err(|e| {
            ClientError::InvalidResponse(format!("malformed queue item {}: {}", ticket, e))
        })
    }
}

/// Extract the queue ticket from a trigger response's `Location` header
///
/// The server answers with `<base>/queue/item/<ticket>/`; the trailing slash
/// is optional.
pub fn parse_queue_location(location: &str) -> Result<QueueTicket> {
    let invalid = || ClientError::InvalidResponse(format!("unexpected queue location {:?}", location));

    let mut segments = location.trim_end_matches('/').rsplit('/');
    let id = segments.next().ok_or_else(invalid)?;

    if segments.next() != Some("item") || segments.next() != Some("queue") {
        return Err(invalid());
    }

    id.parse().map_err(|_| invalid())
}
