//! Kiln Core
//!
//! Core types shared by the Kiln build driver crates.
//!
//! This crate contains:
//! - Domain types: build requests, queue tickets, run handles and the typed
//!   views of the job server's poll responses
//! - Lifecycle events: the signals emitted while a build is driven to completion

pub mod domain;
pub mod event;
