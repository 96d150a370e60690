//! The link command: resolve, copy once, optionally keep watching

use crate::executor::{sync_pass, SyncReport};
use crate::plan::SyncPlan;
use crate::resolve::{resolve_paths, ResolvedPaths};
use crate::types::{LinkError, LogEvent, LogSink};
use crate::watch::{spawn_watcher, Debouncer, WatchCoordinator, DEBOUNCE_INTERVAL};
use crate::Config;
use std::path::Path;

/// Run the link operation.
///
/// The initial pass is fatal on error. In watch mode this only returns once
/// Ctrl-C is received, which counts as success.
pub async fn run(config: &Config, sink: &dyn LogSink) -> Result<(), LinkError> {
    config.validate()?;

    let paths = resolve_paths(
        &config.working_dir,
        &config.input,
        config.output.as_deref(),
        sink,
    )?;

    let report = run_pass(&paths, &config.ignore_patterns, sink)?;
    tracing::debug!(?report, "initial pass complete");
    sink.emit(LogEvent::info(format!("Copied: {}", summary(&paths))));

    if !config.watch {
        return Ok(());
    }

    sink.emit(LogEvent::info("Watching for changes..."));
    let (handle, changes) = spawn_watcher(&paths.source)?;

    let nested = paths.nested_destination().map(Path::to_path_buf);
    let debouncer = Debouncer::new(DEBOUNCE_INTERVAL).with_excluded_root(nested);
    let mut coordinator = WatchCoordinator::new(debouncer, sink, summary(&paths));

    let resync = || run_pass(&paths, &config.ignore_patterns, sink);
    tokio::select! {
        _ = coordinator.run(changes, resync) => {
            tracing::warn!("watcher stopped delivering changes");
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(err) = signal {
                tracing::warn!("failed to listen for Ctrl-C: {err}");
            }
        }
    }

    drop(handle);
    Ok(())
}

/// Recompute the plan from scratch and run one pass.
pub fn run_pass(
    paths: &ResolvedPaths,
    ignore_patterns: &[String],
    sink: &dyn LogSink,
) -> Result<SyncReport, LinkError> {
    let plan = SyncPlan::prepare(paths, ignore_patterns)?;
    sync_pass(&plan, sink)
}

fn summary(paths: &ResolvedPaths) -> String {
    format!(
        "{} -> {}",
        paths.source.display(),
        paths.destination.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use crate::ui::RecordingSink;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_once_copies_and_reports() {
        let temp = TempDir::new().expect("create temp dir");
        let cwd = temp.path();
        fs::create_dir_all(cwd.join("pkg/lib")).expect("create pkg");
        fs::write(cwd.join("pkg/lib/a.js"), b"a").expect("write a.js");

        let config = Config {
            working_dir: cwd.to_path_buf(),
            input: "pkg".to_string(),
            output: Some("out".to_string()),
            ..Config::default()
        };
        let sink = RecordingSink::new();

        run(&config, &sink).await.expect("link should succeed");

        assert_eq!(fs::read(cwd.join("out/lib/a.js")).expect("read copy"), b"a");
        let infos = sink.messages(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].starts_with("Copied: "));
        assert!(infos[0].contains(" -> "));
    }

    #[tokio::test]
    async fn test_run_reports_missing_input() {
        let temp = TempDir::new().expect("create temp dir");
        let config = Config {
            working_dir: temp.path().to_path_buf(),
            input: "missing".to_string(),
            output: Some("out".to_string()),
            ..Config::default()
        };

        let err = run(&config, &RecordingSink::new())
            .await
            .expect_err("missing input");
        assert!(err.is_configuration_error());
        assert!(!temp.path().join("out").exists());
    }
}
