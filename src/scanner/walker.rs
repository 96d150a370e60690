//! Source tree enumeration

use super::IgnoreFilter;
use crate::types::LinkError;
use std::io;
use std::path::{Path, PathBuf};

/// Collect every non-directory entry under `root`, in a stable order.
///
/// Ignored entries are pruned during the walk, so nothing below an ignored
/// directory is visited. `skip`, when given, prunes one more subtree (used
/// when the destination lives inside the source). Traversal errors abort the
/// walk.
pub fn collect_files(
    root: &Path,
    filter: &IgnoreFilter,
    skip: Option<&Path>,
) -> Result<Vec<PathBuf>, LinkError> {
    let prune_filter = filter.clone();
    let prune_skip = skip.map(Path::to_path_buf);

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let path = entry.path();
            if prune_skip.as_deref().is_some_and(|s| path.starts_with(s)) {
                return false;
            }
            !prune_filter.is_ignored(path)
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = result.map_err(walk_error)?;

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            tracing::warn!(path = %entry.path().display(), "skipping special file");
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(root = %root.display(), count = files.len(), "collected source files");
    Ok(files)
}

fn walk_error(err: ignore::Error) -> LinkError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io_err) => LinkError::Io(io_err),
        None => LinkError::Io(io::Error::other(message)),
    }
}
