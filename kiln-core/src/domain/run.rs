//! Build run view
//!
//! Typed view of the job server's `job/<name>/<number>` response.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Server-side state of a started build
///
/// Every field is optional here; the driver decides which ones the protocol
/// guarantees and fails when they are missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub building: Option<bool>,
    /// Populated once `building` is false (`SUCCESS`, `FAILURE`, `ABORTED`, ...)
    #[serde(default)]
    pub result: Option<String>,
    /// Start time in epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Run duration in milliseconds, zero while building
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    /// Unmodified decoded response
    #[serde(skip)]
    pub raw: Value,
}

impl BuildInfo {
    /// Decodes the typed view, keeping the payload alongside it
    pub fn from_payload(raw: Value) -> serde_json::Result<Self> {
        let mut info: BuildInfo = serde_json::from_value(raw.clone())?;
        info.raw = raw;
        Ok(info)
    }

    /// When the run started
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// How long the run took, once it finished
    pub fn elapsed(&self) -> Option<Duration> {
        self.duration
            .filter(|ms| *ms > 0)
            .map(|ms| Duration::from_millis(ms as u64))
    }
}
