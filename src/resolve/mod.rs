//! Input/output path resolution

use crate::config::{DEPENDENCY_DIR, MANIFEST_FILE};
use crate::manifest::Manifest;
use crate::types::{LinkError, LogEvent, LogSink};
use std::path::{Component, Path, PathBuf};

/// Absolute, normalized source and destination roots for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ResolvedPaths {
    /// The destination root when it sits inside the source tree
    pub fn nested_destination(&self) -> Option<&Path> {
        self.destination
            .starts_with(&self.source)
            .then_some(self.destination.as_path())
    }
}

/// Resolve the raw input/output paths against `cwd`.
///
/// When `output` is omitted the manifest at the input root must be readable
/// and carry a `name`; the destination then becomes
/// `<cwd>/node_modules/<name>`. Nothing is written to disk here; a missing
/// destination parent only produces a warning.
pub fn resolve_paths(
    cwd: &Path,
    input: &str,
    output: Option<&str>,
    sink: &dyn LogSink,
) -> Result<ResolvedPaths, LinkError> {
    if input.trim().is_empty() {
        return Err(LinkError::Config("input is required".to_string()));
    }

    let source = absolutize(cwd, Path::new(input));
    if !source.exists() {
        return Err(LinkError::Config(format!(
            "Input path not found: {}",
            source.display()
        )));
    }

    let destination = match output {
        Some(raw) => absolutize(cwd, Path::new(raw)),
        None => default_destination(cwd, &source)?,
    };

    if source == destination {
        return Err(LinkError::Config(
            "Source and destination cannot be the same".to_string(),
        ));
    }

    if let Some(parent) = destination.parent() {
        if !parent.exists() {
            sink.emit(LogEvent::warn(format!(
                "output path {} does not exist, creating it",
                parent.display()
            )));
        }
    }

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        "resolved paths"
    );

    Ok(ResolvedPaths {
        source,
        destination,
    })
}

fn default_destination(cwd: &Path, source: &Path) -> Result<PathBuf, LinkError> {
    let hint = |reason: String| {
        LinkError::Config(format!(
            "{}; pass an explicit output path instead",
            reason
        ))
    };

    let manifest = match Manifest::load(source) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => {
            return Err(hint(format!(
                "no {} found in {}",
                MANIFEST_FILE,
                source.display()
            )))
        }
        Err(err) => return Err(hint(err.to_string())),
    };

    let name = manifest
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| hint(format!("{} has no \"name\" field", MANIFEST_FILE)))?;

    let relative = Path::new(name);
    let stays_inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !stays_inside {
        return Err(hint(format!(
            "package name {:?} cannot be used as a directory name",
            name
        )));
    }

    Ok(absolutize(cwd, &Path::new(DEPENDENCY_DIR).join(relative)))
}

/// Join `path` onto `base` when relative and fold `.`/`..` lexically.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Lexical normalization: drops `.` segments and resolves `..` against the
/// preceding segment without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
