//! Configuration management

use super::types::LinkError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Manifest file looked up at the source root
pub const MANIFEST_FILE: &str = "package.json";

/// Directory, relative to the working directory, that receives linked packages
/// when no output path is given
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Ignore patterns applied unless `--no-default-ignores` is passed
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "CVS",
    ".DS_Store",
    "node_modules",
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pkgsync",
    version,
    about = "Link a local package into another project's dependency tree",
    long_about = None
)]
pub struct Cli {
    /// Package directory to copy from
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Destination directory (default: node_modules/<manifest name>)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Keep running and re-sync on every change
    #[arg(short, long)]
    pub watch: bool,

    /// Output more information
    #[arg(short, long)]
    pub verbose: bool,

    /// Additional glob to ignore (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Use only the --ignore patterns, dropping the built-in ones
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Diagnostics level (error, warn, info, debug, trace)
    ///
    /// If omitted, `PKGSYNC_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<DiagnosticsLevel>,
}

/// Tracing level as exposed on the CLI
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticsLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative paths are resolved against
    pub working_dir: PathBuf,

    /// Raw input path as given
    pub input: String,

    /// Raw output path, if given
    pub output: Option<String>,

    /// Watch mode enabled?
    pub watch: bool,

    /// Surface verbose events
    pub verbose: bool,

    /// Effective ignore patterns (defaults folded in)
    pub ignore_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            input: String::new(),
            output: None,
            watch: false,
            verbose: false,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Built-in ignore patterns as owned strings
pub fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.input.trim().is_empty() {
            return Err(LinkError::Config("input is required".to_string()));
        }

        if matches!(&self.output, Some(out) if out.trim().is_empty()) {
            return Err(LinkError::Config(
                "output must not be empty when given".to_string(),
            ));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = LinkError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let working_dir = std::env::current_dir()?;

        let mut ignore_patterns = if cli.no_default_ignores {
            Vec::new()
        } else {
            default_ignore_patterns()
        };
        for pattern in cli.ignore {
            if !ignore_patterns.contains(&pattern) {
                ignore_patterns.push(pattern);
            }
        }

        let config = Config {
            working_dir,
            input: cli.input.unwrap_or_default(),
            output: cli.output,
            watch: cli.watch,
            verbose: cli.verbose,
            ignore_patterns,
        };
        config.validate()?;
        Ok(config)
    }
}
