//! Build request and identifier types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Request to trigger a single build of a job
///
/// Immutable once handed to the driver. Parameters are kept sorted so the
/// encoded trigger request is stable regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Job identifier, optionally a folder path such as `team/service/deploy`
    pub job: String,
    /// Build parameters passed to the job
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl BuildRequest {
    /// Creates a request without parameters
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a build parameter, replacing any previous value for the key
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Whether the request must use the parameterized trigger form
    pub fn is_parameterized(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// Identifier of an enqueued, not-yet-started build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueTicket(pub u64);

impl fmt::Display for QueueTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueueTicket {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(QueueTicket)
    }
}

/// A started (possibly still running) execution of a job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunHandle {
    pub job: String,
    pub number: u64,
}

impl RunHandle {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self {
            job: job.into(),
            number,
        }
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.job, self.number)
    }
}
