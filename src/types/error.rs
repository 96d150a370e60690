//! Error types for pkgsync

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for pkgsync operations
#[derive(Debug, Error)]
pub enum LinkError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Manifest could not be read or does not have the expected shape
    #[error("Invalid manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// Ignore pattern or manifest `files` glob failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// Copying a single file failed
    #[error("Failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem watcher could not be established
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl LinkError {
    /// Check if this error was caused by invalid inputs rather than by I/O
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LinkError::Config(_) | LinkError::Manifest { .. } | LinkError::Pattern { .. }
        )
    }

    /// Path the error is about, when there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            LinkError::Manifest { path, .. } | LinkError::Copy { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let link_error: LinkError = io_error.into();

        assert!(matches!(link_error, LinkError::Io(_)));
        assert!(link_error.to_string().contains("IO error"));
        assert!(!link_error.is_configuration_error());
    }

    #[test]
    fn test_config_error() {
        let error = LinkError::Config("input is required".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("input is required"));
        assert!(error.is_configuration_error());
        assert!(error.path().is_none());
    }

    #[test]
    fn test_manifest_error_carries_path() {
        let error = LinkError::Manifest {
            path: PathBuf::from("/pkg/package.json"),
            reason: "expected a string".to_string(),
        };
        assert!(error.to_string().contains("/pkg/package.json"));
        assert!(error.to_string().contains("expected a string"));
        assert!(error.is_configuration_error());
        assert_eq!(error.path(), Some(Path::new("/pkg/package.json")));
    }

    #[test]
    fn test_pattern_error() {
        let error = LinkError::Pattern {
            pattern: "lib/[".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert!(error.to_string().contains("lib/["));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_copy_error_exposes_source() {
        use std::error::Error;

        let error = LinkError::Copy {
            path: PathBuf::from("lib/a.js"),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().contains("lib/a.js"));
        assert!(error.source().is_some());
        assert!(!error.is_configuration_error());
        assert_eq!(error.path(), Some(Path::new("lib/a.js")));
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<(), LinkError> {
            Err(LinkError::Config("test error".to_string()))
        }

        fn outer_function() -> Result<(), LinkError> {
            inner_function()?;
            Ok(())
        }

        let result = outer_function();
        assert!(matches!(result.unwrap_err(), LinkError::Config(_)));
    }
}
