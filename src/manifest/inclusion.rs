//! InclusionSet - allow-list derived from manifest `files`, `main` and `bin`

use super::Manifest;
use crate::config::MANIFEST_FILE;
use crate::resolve::normalize;
use crate::scanner::{collect_files, IgnoreFilter};
use crate::types::LinkError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Files that ship with a package whatever `files` says
pub const ALWAYS_INCLUDED: &[&str] = &[
    MANIFEST_FILE,
    "README",
    "README.md",
    "readme",
    "readme.md",
    "Readme",
    "Readme.md",
    "LICENSE",
    "LICENSE.md",
    "license",
    "license.md",
    "LICENCE",
    "LICENCE.md",
];

/// Absolute paths (or path prefixes) allowed to be copied.
///
/// An empty set places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionSet {
    entries: BTreeSet<PathBuf>,
}

impl InclusionSet {
    /// A set that admits everything
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Compute the set for `root` from its manifest.
    ///
    /// Without a `files` field the set stays empty, even when `main` or `bin`
    /// are declared. `files` globs are expanded against the files found under
    /// `root` (minus ignored subtrees); directories never become entries, but
    /// a glob naming a directory selects the files below it. `skip` prunes a
    /// subtree from the expansion, typically a destination nested in `root`.
    pub fn from_manifest(
        manifest: &Manifest,
        root: &Path,
        ignore: &IgnoreFilter,
        skip: Option<&Path>,
    ) -> Result<Self, LinkError> {
        let mut set = Self::unrestricted();

        let Some(patterns) = manifest.files.as_ref() else {
            return Ok(set);
        };

        for name in ALWAYS_INCLUDED {
            set.insert(root.join(name));
        }

        let globs = compile_files_patterns(patterns)?;
        if !globs.is_empty() {
            for file in collect_files(root, ignore, skip)? {
                let Ok(relative) = file.strip_prefix(root) else {
                    continue;
                };
                let relative = relative.to_string_lossy().replace('\\', "/");
                if globs.is_match(relative.as_str()) {
                    set.insert(file);
                }
            }
        }

        if let Some(main) = manifest.main.as_deref() {
            set.insert(root.join(main));
        }

        for (command, script) in manifest.bin_scripts() {
            tracing::debug!(command = %command, script = %script, "including bin script");
            set.insert(root.join(script));
        }

        Ok(set)
    }

    /// Add a path, normalized
    pub fn insert(&mut self, path: PathBuf) {
        self.entries.insert(normalize(&path));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains(path)
    }

    /// Whether `path` may be copied: always when the set is empty, otherwise
    /// when some entry equals it or is one of its ancestors.
    pub fn admits(&self, path: &Path) -> bool {
        self.entries.is_empty() || self.entries.iter().any(|entry| path.starts_with(entry))
    }
}

/// Compile manifest `files` globs. `*` stays within one segment, `**` crosses
/// segments, and each glob also selects everything below a matching directory.
fn compile_files_patterns(patterns: &[String]) -> Result<GlobSet, LinkError> {
    let mut builder = GlobSetBuilder::new();
    for raw in patterns {
        if raw.starts_with('!') {
            tracing::debug!(pattern = %raw, "skipping negated files entry");
            continue;
        }
        let trimmed = raw
            .trim()
            .trim_start_matches("./")
            .trim_start_matches('/')
            .trim_end_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        for candidate in [trimmed.to_string(), format!("{}/**", trimmed)] {
            let glob = GlobBuilder::new(&candidate)
                .literal_separator(true)
                .build()
                .map_err(|e| LinkError::Pattern {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
        }
    }
    builder.build().map_err(|e| LinkError::Pattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}
