//! Watch mode: debounced re-synchronization on source changes

mod debounce;
mod watcher;

pub use debounce::{is_platform_metadata, DebounceState, Debouncer, METADATA_DENY_LIST};
pub use watcher::{spawn_watcher, WatcherHandle};

use crate::executor::SyncReport;
use crate::types::{LinkError, LogEvent, LogSink};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Quiet period between the first change of a burst and the resync
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(100);

/// Drives resyncs from a stream of changed paths.
///
/// Each coordinator owns its own [`Debouncer`], so at most one resync is
/// scheduled per coordinator at any time. Resyncs run inline in the loop;
/// changes that arrive meanwhile wait in the channel and open the next
/// debounce window.
pub struct WatchCoordinator<'a> {
    debouncer: Debouncer,
    sink: &'a dyn LogSink,
    summary: String,
}

impl<'a> WatchCoordinator<'a> {
    /// `summary` is the "<source> -> <destination>" text used in result events.
    pub fn new(debouncer: Debouncer, sink: &'a dyn LogSink, summary: impl Into<String>) -> Self {
        Self {
            debouncer,
            sink,
            summary: summary.into(),
        }
    }

    pub fn state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Process changes until the stream closes; a resync still pending at
    /// that point is run before returning.
    ///
    /// `resync` performs one complete pass. Its failure is reported as a
    /// warning and the loop keeps going. Returns the number of resyncs run.
    pub async fn run<F>(
        &mut self,
        mut changes: mpsc::UnboundedReceiver<PathBuf>,
        mut resync: F,
    ) -> usize
    where
        F: FnMut() -> Result<SyncReport, LinkError>,
    {
        let mut fired = 0usize;

        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                change = changes.recv() => match change {
                    Some(path) => self.on_change(path),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire(&mut resync);
                    fired += 1;
                }
            }
        }

        if let Some(deadline) = self.debouncer.deadline() {
            sleep_until(deadline).await;
            self.fire(&mut resync);
            fired += 1;
        }

        tracing::debug!(resyncs = fired, "change stream closed");
        fired
    }

    fn on_change(&mut self, path: PathBuf) {
        if self.debouncer.notify(&path, Instant::now()) {
            tracing::debug!(path = %path.display(), "change detected, resync scheduled");
        } else {
            tracing::trace!(path = %path.display(), "change coalesced or ignored");
        }
    }

    fn fire<F>(&mut self, resync: &mut F)
    where
        F: FnMut() -> Result<SyncReport, LinkError>,
    {
        self.debouncer.fire();
        match resync() {
            Ok(report) => {
                tracing::debug!(?report, "resync complete");
                self.sink
                    .emit(LogEvent::info(format!("Copied: {}", self.summary)));
            }
            Err(err) => {
                self.sink
                    .emit(LogEvent::warn(format!("Resync failed: {}", err)));
            }
        }
    }
}
