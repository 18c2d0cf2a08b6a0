//! Driver error types

use kiln_client::ClientError;
use std::fmt;
use thiserror::Error;

/// Step of the build lifecycle an error occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Triggering the build
    Submission,
    /// Waiting for the queue item to start or be cancelled
    QueueWait,
    /// Waiting for the run to finish
    RunWait,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Submission => "submission",
            Phase::QueueWait => "queue wait",
            Phase::RunWait => "run wait",
        };
        f.write_str(name)
    }
}

/// Why driving a build failed
///
/// A build cancelled while queued is not an error; it completes normally
/// with an `ABORTED` result.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Every attempt of a call failed with a transient error
    #[error("{phase} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        phase: Phase,
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// A call failed in a way retrying cannot fix
    #[error("{phase} failed: {source}")]
    Fatal {
        phase: Phase,
        #[source]
        source: ClientError,
    },

    /// The server answered without a field its protocol guarantees
    #[error("{phase}: {message}")]
    ContractViolation { phase: Phase, message: String },
}

impl DriverError {
    pub fn phase(&self) -> Phase {
        match self {
            DriverError::RetriesExhausted { phase, .. }
            | DriverError::Fatal { phase, .. }
            | DriverError::ContractViolation { phase, .. } => *phase,
        }
    }

    /// The last error returned by the job server, if any
    pub fn last_error(&self) -> Option<&ClientError> {
        match self {
            DriverError::RetriesExhausted { source, .. } | DriverError::Fatal { source, .. } => {
                Some(source)
            }
            DriverError::ContractViolation { .. } => None,
        }
    }
}
