//! Shared utilities for the workspace crates.

pub mod log_setup;
pub mod parallel;
