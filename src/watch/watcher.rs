//! notify-backed source watcher

use crate::types::LinkError;
use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `root` recursively and forward changed paths into a channel.
///
/// An event that carries no path is forwarded as an empty path. Only changes
/// made after this call are reported.
pub fn spawn_watcher(
    root: &Path,
) -> Result<(WatcherHandle, mpsc::UnboundedReceiver<PathBuf>), LinkError> {
    let (tx, rx) = mpsc::unbounded_channel::<PathBuf>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if is_read_only_access(&event.kind) {
                    return;
                }
                if event.paths.is_empty() {
                    let _ = tx.send(PathBuf::new());
                    return;
                }
                for path in event.paths {
                    // The receiver is gone once the session ends
                    if tx.send(path).is_err() {
                        return;
                    }
                }
            }
            Err(err) => {
                tracing::warn!("file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(root, RecursiveMode::Recursive)?;
    tracing::info!("file watcher started on {}", root.display());

    Ok((WatcherHandle { _inner: watcher }, rx))
}

fn is_read_only_access(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Access(
            AccessKind::Read
                | AccessKind::Open(_)
                | AccessKind::Close(AccessMode::Read)
                | AccessKind::Any
        )
    )
}
