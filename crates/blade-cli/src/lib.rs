//! CLI library components for the blade tracker.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
