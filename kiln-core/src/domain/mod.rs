//! Core domain types
//!
//! This module contains the structures that describe a build as it moves
//! through the job server: the request that triggers it, the queue ticket the
//! server hands back, and the run it eventually becomes.

pub mod build;
pub mod queue;
pub mod run;

pub use build::{BuildRequest, QueueTicket, RunHandle};
pub use queue::{Executable, QueueItem};
pub use run::BuildInfo;
