//! Package manifest parsing and inclusion analysis

mod inclusion;

pub use inclusion::{InclusionSet, ALWAYS_INCLUDED};

use crate::config::MANIFEST_FILE;
use crate::types::LinkError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// The subset of `package.json` that drives linking.
///
/// Every field is optional; values of the wrong JSON type are rejected when
/// parsing instead of surfacing later as a surprise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    /// Globs selecting the files that make up the package
    #[serde(default)]
    pub files: Option<Vec<String>>,

    /// Entry point, relative to the package root
    #[serde(default)]
    pub main: Option<String>,

    #[serde(default)]
    pub bin: Option<BinField>,
}

/// `bin` is either one script named after the package or a command map
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BinField {
    Single(String),
    Commands(BTreeMap<String, String>),
}

impl Manifest {
    /// Parse manifest text. `path` is only used for error reporting.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, LinkError> {
        serde_json::from_str(contents).map_err(|e| LinkError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read `package.json` from `root`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(root: &Path) -> Result<Option<Self>, LinkError> {
        let path = root.join(MANIFEST_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LinkError::Manifest {
                    path,
                    reason: e.to_string(),
                })
            }
        };
        Self::parse(&contents, &path).map(Some)
    }

    /// Command name → script path pairs declared under `bin`
    pub fn bin_scripts(&self) -> Vec<(String, String)> {
        match &self.bin {
            None => Vec::new(),
            Some(BinField::Single(script)) => {
                let command = self.name.clone().unwrap_or_default();
                vec![(command, script.clone())]
            }
            Some(BinField::Commands(map)) => map
                .iter()
                .map(|(command, script)| (command.clone(), script.clone()))
                .collect(),
        }
    }
}
