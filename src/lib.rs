//! # pkgsync - link a local package into another project
//!
//! Copies a package directory into a destination (by default
//! `node_modules/<name>`), keeping only what the package's manifest ships and
//! skipping ignored paths, then optionally keeps the copy fresh by watching
//! the source and re-syncing after each burst of changes.

// Module declarations
pub mod config;
pub mod resolve;
pub mod manifest;
pub mod scanner;
pub mod plan;
pub mod executor;
pub mod watch;
pub mod ui;
pub mod logging;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use executor::{sync_pass, SyncReport};
pub use plan::SyncPlan;
pub use types::{LinkError, LogEvent, LogLevel, LogSink};
