//! LogEvent - Structured events handed to the logging sink

use std::fmt;

/// Severity of a [`LogEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Only surfaced when verbose output is requested
    Verbose,
    Info,
    Warn,
    /// Fatal for the run that produced it
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
        };
        f.write_str(label)
    }
}

/// A single message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub message: String,
    pub level: LogLevel,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn verbose(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Verbose, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }
}

/// Consumer of [`LogEvent`]s
///
/// The engine only ever talks to this trait; rendering, filtering and
/// process exit live with the caller.
pub trait LogSink {
    fn emit(&self, event: LogEvent);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn emit(&self, event: LogEvent) {
        (**self).emit(event)
    }
}
