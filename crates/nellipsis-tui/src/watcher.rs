//! Content file watcher
//!
//! Watches the directory holding the content file and reports debounced
//! modifications of that file. Editors that save by renaming a temporary
//! file still produce an event for the target path.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use nellipsis_core::prelude::*;
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use tokio::sync::{mpsc, oneshot};

use crate::message::Message;

/// Default debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Watches a single content file
pub struct ContentWatcher {
    path: PathBuf,
    debounce: Duration,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ContentWatcher {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            stop_tx: None,
            handle: None,
        }
    }

    /// Set debounce duration in milliseconds
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start watching on a background thread.
    ///
    /// Sends `Message::ContentFileChanged` or `Message::WatcherError`.
    pub fn start(&mut self, message_tx: mpsc::UnboundedSender<Message>) -> Result<()> {
        if self.is_running() {
            return Err(Error::watcher("Watcher is already running"));
        }

        let path = self.path.clone();
        let debounce = self.debounce;
        let (stop_tx, stop_rx) = oneshot::channel();

        let handle = std::thread::Builder::new()
            .name("content-watcher".into())
            .spawn(move || run_watcher(path, debounce, message_tx, stop_rx))?;

        self.stop_tx = Some(stop_tx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Stop the watcher and wait for its thread
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }
}

impl Drop for ContentWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Whether any of `paths` names the watched file
fn touches(paths: &[PathBuf], target: &Path) -> bool {
    paths.iter().any(|path| path == target)
}

fn run_watcher(
    path: PathBuf,
    debounce: Duration,
    message_tx: mpsc::UnboundedSender<Message>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let target = path.canonicalize().unwrap_or_else(|_| path.clone());
    let Some(dir) = target.parent().map(Path::to_path_buf) else {
        let _ = message_tx.send(Message::WatcherError {
            message: format!("Cannot watch {}", path.display()),
        });
        return;
    };

    let tx = message_tx.clone();
    let watched = target.clone();
    let debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let relevant = events
                    .iter()
                    .filter(|event| !event.kind.is_access())
                    .any(|event| touches(&event.paths, &watched));
                if relevant {
                    debug!("content file changed: {}", watched.display());
                    let _ = tx.send(Message::ContentFileChanged);
                }
            }
            Err(errors) => {
                for error in errors {
                    warn!("File watcher error: {:?}", error);
                    let _ = tx.send(Message::WatcherError {
                        message: error.to_string(),
                    });
                }
            }
        }
    });

    let mut debouncer = match debouncer {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to create file watcher: {}", e);
            let _ = message_tx.send(Message::WatcherError {
                message: format!("Failed to create watcher: {}", e),
            });
            return;
        }
    };

    if let Err(e) = debouncer.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Failed to watch {}: {}", dir.display(), e);
        let _ = message_tx.send(Message::WatcherError {
            message: format!("Failed to watch {}: {}", dir.display(), e),
        });
        return;
    }
    info!("Watching: {}", target.display());

    // Keep the debouncer alive until told to stop
    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                info!("File watcher stopping");
                break;
            }
            Err(oneshot::error::TryRecvError::Empty) => {
                std::thread::sleep(Duration::from_millis(100));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_creation() {
        let watcher = ContentWatcher::new(PathBuf::from("/tmp/content.html"));
        assert_eq!(watcher.path(), Path::new("/tmp/content.html"));
        assert_eq!(watcher.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_debounce_builder() {
        let watcher = ContentWatcher::new(PathBuf::from("a.html")).with_debounce_ms(50);
        assert_eq!(watcher.debounce, Duration::from_millis(50));
    }

    #[test]
    fn test_stop_when_not_started() {
        let mut watcher = ContentWatcher::new(PathBuf::from("a.html"));
        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_double_start_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.html");
        std::fs::write(&path, "Lorem").unwrap();

        let mut watcher = ContentWatcher::new(path);
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(watcher.start(tx.clone()).is_ok());
        assert!(watcher.is_running());
        assert!(watcher.start(tx).is_err());

        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_missing_directory_reports_error_over_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_stop_tx, stop_rx) = oneshot::channel();

        run_watcher(
            PathBuf::from("/nellipsis-missing-dir/content.html"),
            Duration::from_millis(10),
            tx,
            stop_rx,
        );

        match rx.try_recv() {
            Ok(Message::WatcherError { message }) => {
                assert!(message.contains("nellipsis-missing-dir"), "{message}")
            }
            other => panic!("expected WatcherError, got {other:?}"),
        }
    }

    #[test]
    fn test_touches_matches_target_only() {
        let target = Path::new("/work/content.html");
        assert!(touches(&[PathBuf::from("/work/content.html")], target));
        assert!(!touches(&[PathBuf::from("/work/other.html")], target));
        assert!(!touches(&[PathBuf::from("/elsewhere/content.html")], target));
    }
}
