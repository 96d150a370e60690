//! Ignore-glob filtering applied during traversal

use crate::types::LinkError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Compiled ignore patterns, resolved against a source root.
///
/// Pattern forms:
/// - `name`, `*.log` (no `/`): matches an entry with that name at any depth,
///   along with everything beneath it.
/// - `dir/file`, `/build` (contains `/`): anchored to the root, again
///   covering everything beneath a matching directory.
///
/// `*` never crosses a `/`; `**` does.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    root: PathBuf,
    patterns: Vec<String>,
    set: GlobSet,
}

impl IgnoreFilter {
    /// Compile `patterns` for paths under `root`.
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self, LinkError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            for expanded in expand_pattern(pattern) {
                let glob = GlobBuilder::new(&expanded)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| LinkError::Pattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                builder.add(glob);
            }
        }
        let set = builder.build().map_err(|e| LinkError::Pattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            patterns: patterns.to_vec(),
            set,
        })
    }

    /// A filter that ignores nothing
    pub fn empty(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Patterns as given
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether an absolute traversal path is ignored.
    ///
    /// Paths outside the root, and the root itself, are never ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                let relative = relative.to_string_lossy().replace('\\', "/");
                self.matches_relative(&relative)
            }
            _ => false,
        }
    }

    /// Test a `/`-separated path relative to the root
    pub fn matches_relative(&self, relative: &str) -> bool {
        self.set.is_match(relative)
    }
}

fn expand_pattern(pattern: &str) -> Vec<String> {
    let trimmed = pattern.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.contains('/') {
        let anchored = trimmed.trim_start_matches("./").trim_start_matches('/');
        if anchored.is_empty() {
            return Vec::new();
        }
        vec![anchored.to_string(), format!("{}/**", anchored)]
    } else {
        vec![format!("**/{}", trimmed), format!("**/{}/**", trimmed)]
    }
}
