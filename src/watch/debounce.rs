//! Idle/Pending debounce state machine

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

/// Platform metadata files whose changes never schedule a resync
pub const METADATA_DENY_LIST: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Whether a resync is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

/// Collapses a burst of change notifications into one scheduled resync.
///
/// Only the first relevant notification of a burst schedules the deadline;
/// later ones are dropped and never push it back.
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: DebounceState,
    interval: Duration,
    excluded_root: Option<PathBuf>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: DebounceState::Idle,
            interval,
            excluded_root: None,
        }
    }

    /// Ignore changes below `root` (the destination, when it lives inside
    /// the watched tree).
    pub fn with_excluded_root(mut self, root: Option<PathBuf>) -> Self {
        self.excluded_root = root;
        self
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Deadline of the pending resync, if any
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    /// Whether a change at `path` is relevant at all
    pub fn is_relevant(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        if is_platform_metadata(path) {
            return false;
        }
        if let Some(root) = &self.excluded_root {
            if path.starts_with(root) {
                return false;
            }
        }
        true
    }

    /// Feed one change notification. Returns `true` when it moved the state
    /// from Idle to Pending.
    pub fn notify(&mut self, path: &Path, now: Instant) -> bool {
        match self.state {
            DebounceState::Pending { .. } => false,
            DebounceState::Idle if !self.is_relevant(path) => false,
            DebounceState::Idle => {
                self.state = DebounceState::Pending {
                    deadline: now + self.interval,
                };
                true
            }
        }
    }

    /// Consume the pending resync. Returns `false` if nothing was pending.
    pub fn fire(&mut self) -> bool {
        let was_pending = matches!(self.state, DebounceState::Pending { .. });
        self.state = DebounceState::Idle;
        was_pending
    }
}

/// Whether `path` names a platform metadata file
pub fn is_platform_metadata(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| METADATA_DENY_LIST.contains(&name))
}
