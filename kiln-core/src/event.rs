//! Lifecycle events
//!
//! A driven build emits exactly one `Queued`, at most one `Started` and
//! exactly one `Finished` event, in that order. `Started` is only skipped
//! when the queue entry is cancelled before an executor picks it up.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{QueueTicket, RunHandle};

/// Result code reported when a build is cancelled while still queued
pub const ABORTED: &str = "ABORTED";

/// Result code of a successful build
pub const SUCCESS: &str = "SUCCESS";

/// Signal emitted while driving a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The server accepted the build and placed it in its queue
    Queued { ticket: QueueTicket },
    /// The build left the queue and is running
    Started {
        number: u64,
        url: String,
        payload: Value,
    },
    /// The build reached a terminal state
    Finished {
        /// `None` when the build was cancelled before it ever started
        number: Option<u64>,
        result: String,
        payload: Option<Value>,
    },
}

/// Discriminant of a lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Queued = 1,
    Started = 2,
    Finished = 3,
}

impl EventKind {
    /// Numeric code used by callback-style consumers
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LifecycleEvent::Queued { .. } => EventKind::Queued,
            LifecycleEvent::Started { .. } => EventKind::Started,
            LifecycleEvent::Finished { .. } => EventKind::Finished,
        }
    }

    /// Queue ticket for `Queued`, run number otherwise
    pub fn primary_id(&self) -> Option<String> {
        match self {
            LifecycleEvent::Queued { ticket } => Some(ticket.to_string()),
            LifecycleEvent::Started { number, .. } => Some(number.to_string()),
            LifecycleEvent::Finished { number, .. } => number.map(|n| n.to_string()),
        }
    }

    /// Run URL for `Started`, result code for `Finished`
    pub fn secondary_value(&self) -> Option<&str> {
        match self {
            LifecycleEvent::Queued { .. } => None,
            LifecycleEvent::Started { url, .. } => Some(url),
            LifecycleEvent::Finished { result, .. } => Some(result),
        }
    }

    /// The decoded server response the event was derived from
    pub fn raw_payload(&self) -> Option<&Value> {
        match self {
            LifecycleEvent::Queued { .. } => None,
            LifecycleEvent::Started { payload, .. } => Some(payload),
            LifecycleEvent::Finished { payload, .. } => payload.as_ref(),
        }
    }
}

/// Terminal outcome of a driven build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutcome {
    /// The run, unless the build was cancelled while queued
    pub run: Option<RunHandle>,
    /// The server's literal result code
    pub result: String,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS
    }

    /// Whether the queue entry was cancelled before it started
    pub fn was_queued_abort(&self) -> bool {
        self.run.is_none() && self.result == ABORTED
    }
}
