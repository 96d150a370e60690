//! Diagnostics setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `PKGSYNC_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`

use crate::config::DiagnosticsLevel;
use tracing_subscriber::fmt;

/// Initialise the global diagnostics subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<DiagnosticsLevel>) {
    let level = match cli_level {
        Some(lvl) => level_from_cli(lvl),
        None => std::env::var("PKGSYNC_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::WARN),
    };

    fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn level_from_cli(lvl: DiagnosticsLevel) -> tracing::Level {
    match lvl {
        DiagnosticsLevel::Error => tracing::Level::ERROR,
        DiagnosticsLevel::Warn => tracing::Level::WARN,
        DiagnosticsLevel::Info => tracing::Level::INFO,
        DiagnosticsLevel::Debug => tracing::Level::DEBUG,
        DiagnosticsLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_str() {
        assert_eq!(parse_level_str(" DEBUG "), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }

    #[test]
    fn test_cli_level_mapping() {
        assert_eq!(level_from_cli(DiagnosticsLevel::Trace), tracing::Level::TRACE);
        assert_eq!(level_from_cli(DiagnosticsLevel::Error), tracing::Level::ERROR);
    }
}
