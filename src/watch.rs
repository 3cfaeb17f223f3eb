//! Watch mode
//!
//! Re-lints files when they change on disk. File system events arrive from
//! `notify` on its own thread and are forwarded over a tokio channel.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::lint::lint_file;
use crate::report::Reporter;

/// Events from the file watcher
#[derive(Debug)]
pub enum WatcherEvent {
    SourceChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Start watching the configured paths
///
/// The returned watcher must be kept alive for events to keep arriving.
pub fn start_watching(
    config: &Config,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<WatcherEvent>)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let extensions = config.extensions.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    for path in event.paths {
                        let matches = path
                            .extension()
                            .and_then(|s| s.to_str())
                            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
                        if matches {
                            let _ = tx.send(WatcherEvent::SourceChanged(path));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        NotifyConfig::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    for path in &config.paths {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(path, mode)?;
        log::info!("Watching {}", path.display());
    }

    Ok((watcher, rx))
}

/// Re-lint changed files until the channel closes
///
/// Each rendered report is handed to `emit`; the caller decides where it
/// goes.
pub async fn run_watch_loop<F>(
    config: &Config,
    mut rx: mpsc::UnboundedReceiver<WatcherEvent>,
    mut emit: F,
) where
    F: FnMut(String),
{
    let reporter = Reporter::new(config.format);

    while let Some(event) = rx.recv().await {
        match event {
            WatcherEvent::SourceChanged(path) => {
                if !path.is_file() {
                    continue;
                }
                log::debug!("Source file changed: {}", path.display());
                match lint_file(&path, &config.options) {
                    Ok(report) => emit(reporter.render(std::slice::from_ref(&report))),
                    Err(e) => log::warn!("{:#}", e),
                }
            }
            WatcherEvent::WatcherError(e) => {
                log::error!("File watcher error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_watch_loop_relints_changed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.cairo");
        fs::write(&path, "/// doc\n\nfn g() {}\n").unwrap();

        let config = Config::default();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(WatcherEvent::SourceChanged(path.clone())).unwrap();
        tx.send(WatcherEvent::SourceChanged(dir.path().join("missing.cairo")))
            .unwrap();
        drop(tx);

        let mut outputs = Vec::new();
        run_watch_loop(&config, rx, |out| outputs.push(out)).await;

        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].contains("item-doc-adjacency"));
        assert!(outputs[0].contains("vault.cairo:1:"));
    }
}
