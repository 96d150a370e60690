//! Core type definitions for pkgsync

mod error;
mod event;

pub use error::LinkError;
pub use event::{LogEvent, LogLevel, LogSink};
