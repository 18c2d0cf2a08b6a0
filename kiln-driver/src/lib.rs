//! Kiln Driver
//!
//! Drives a single build on a remote job server from submission to its
//! terminal result, reporting progress as lifecycle events.
//!
//! Architecture:
//! - Configuration: retry budget and poll intervals
//! - Retry: bounded fixed-delay retry shared by every phase
//! - Driver: the submission, queue-wait and run-wait state machine
//! - Observer: the sink lifecycle events are delivered to

pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod retry;

pub use config::DriverConfig;
pub use driver::BuildDriver;
pub use error::{DriverError, Phase};
pub use observer::{BuildObserver, EventLog};
pub use retry::{RetryPolicy, retry};
