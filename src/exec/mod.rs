// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the external tools of a
//! pipeline stage, using `tokio::process::Command`, and reporting their exit
//! status back to the orchestrator.
//!
//! - [`invocation`] describes one external tool call (program, arguments and
//!   where its stdout goes).
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `RealProcessBackend` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod invocation;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use invocation::Invocation;
