//! SyncPlan - everything one sync pass needs, computed fresh per pass

use crate::manifest::{InclusionSet, Manifest};
use crate::resolve::ResolvedPaths;
use crate::scanner::IgnoreFilter;
use crate::types::LinkError;
use std::path::Path;

/// Inputs for a single pass: roots, compiled ignore patterns and the
/// manifest-derived inclusion set.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub paths: ResolvedPaths,
    pub ignore: IgnoreFilter,
    pub inclusion: InclusionSet,
}

impl SyncPlan {
    /// Compile ignore patterns and analyze the source manifest.
    ///
    /// A missing manifest leaves the inclusion set empty; a malformed one is
    /// an error even when the output path was given explicitly.
    pub fn prepare(paths: &ResolvedPaths, ignore_patterns: &[String]) -> Result<Self, LinkError> {
        let ignore = IgnoreFilter::new(&paths.source, ignore_patterns)?;
        let nested = paths.nested_destination();

        let manifest = if paths.source.is_dir() {
            Manifest::load(&paths.source)?
        } else {
            None
        };
        let inclusion = match manifest {
            Some(manifest) => {
                InclusionSet::from_manifest(&manifest, &paths.source, &ignore, nested)?
            }
            None => InclusionSet::unrestricted(),
        };

        tracing::debug!(
            patterns = ignore.patterns().len(),
            inclusion_entries = inclusion.len(),
            "prepared sync plan"
        );

        Ok(Self {
            paths: paths.clone(),
            ignore,
            inclusion,
        })
    }

    pub fn source(&self) -> &Path {
        &self.paths.source
    }

    pub fn destination(&self) -> &Path {
        &self.paths.destination
    }

    /// The destination root when it sits inside the source tree
    pub fn nested_destination(&self) -> Option<&Path> {
        self.paths.nested_destination()
    }
}
