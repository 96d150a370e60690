//! Sync engine: one filtered copy pass from source to destination

pub mod copy;

use crate::plan::SyncPlan;
use crate::scanner::collect_files;
use crate::types::{LinkError, LogEvent, LogSink};

pub use copy::copy_file;

/// Counters for a finished pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files written to the destination
    pub copied: usize,
    /// Candidates rejected by the inclusion set
    pub skipped: usize,
    /// Aggregate copied bytes
    pub bytes_copied: u64,
}

/// Run one pass of `plan`.
///
/// Every non-ignored file under the source that the inclusion set admits is
/// copied to the same relative location under the destination, overwriting
/// unconditionally. Rejected files produce a verbose "Ignoring" event. The
/// first copy failure aborts the pass; files already written stay written,
/// and destination files without a source counterpart are left alone.
pub fn sync_pass(plan: &SyncPlan, sink: &dyn LogSink) -> Result<SyncReport, LinkError> {
    let source = plan.source();
    let destination = plan.destination();
    let mut report = SyncReport::default();

    let candidates = collect_files(source, &plan.ignore, plan.nested_destination())?;

    for file in candidates {
        let relative = file.strip_prefix(source).unwrap_or(&file);

        if !plan.inclusion.admits(&file) {
            sink.emit(LogEvent::verbose(format!(
                "Ignoring: {}",
                relative.display()
            )));
            report.skipped += 1;
            continue;
        }

        let target = if relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        let bytes = copy_file(&file, &target)?;
        tracing::debug!(file = %relative.display(), bytes, "copied");

        report.copied += 1;
        report.bytes_copied += bytes;
    }

    Ok(report)
}
