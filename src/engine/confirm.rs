//! Reload confirmation via the engine's pid marker.
//!
//! # Responsibilities
//! - Poll the pid file until its content differs from a pre-reload snapshot
//!
//! # Design Decisions
//! - Marker content is compared by byte equality, never parsed as a number
//! - Read errors are expected while the engine replaces itself and keep the
//!   poll going; the engine rewrites the marker only on a successful start
//! - No built-in deadline; the caller imposes one when it needs it

use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::time;

/// Capability to read a file as raw bytes.
pub trait FileReader: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Real reader over the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Default pid marker poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Waits for the engine's pid marker to change after a reload.
#[derive(Debug, Clone)]
pub struct ReloadConfirmer<F = FsReader> {
    reader: F,
    poll_interval: Duration,
}

impl<F: FileReader> ReloadConfirmer<F> {
    pub fn new(reader: F) -> Self {
        Self::with_poll_interval(reader, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(reader: F, poll_interval: Duration) -> Self {
        Self {
            reader,
            poll_interval,
        }
    }

    /// Block until the marker's content differs from `previous`.
    ///
    /// Suspends on a ticker between polls; nothing spins. The first poll
    /// happens one interval after the call, matching a plain ticker.
    pub async fn wait_for_reload(&self, previous: &[u8], marker: &Path) {
        let mut ticker = time::interval(self.poll_interval);
        // interval() fires immediately; consume that tick so polls are spaced.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.reader.read(marker) {
                Ok(current) if current != previous => {
                    tracing::debug!(path = %marker.display(), "Pid marker changed, reload confirmed");
                    return;
                }
                // Unchanged, or unreadable mid-replacement: keep polling.
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn confirmer() -> ReloadConfirmer {
        ReloadConfirmer::with_poll_interval(FsReader, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_returns_once_marker_changes() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("engine.pid");
        fs::write(&marker, "100").unwrap();

        let writer_marker = marker.clone();
        let writer = tokio::spawn(async move {
            time::sleep(Duration::from_millis(25)).await;
            fs::write(&writer_marker, "200").unwrap();
        });

        time::timeout(Duration::from_secs(2), confirmer().wait_for_reload(b"100", &marker))
            .await
            .expect("confirmation should complete after the marker changes");
        writer.await.unwrap();

        assert_eq!(fs::read(&marker).unwrap(), b"200");
    }

    #[tokio::test]
    async fn test_read_errors_do_not_abort_polling() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("engine.pid");
        // Marker does not exist yet: the first polls all fail to read.

        let writer_marker = marker.clone();
        let writer = tokio::spawn(async move {
            time::sleep(Duration::from_millis(40)).await;
            fs::write(&writer_marker, "200").unwrap();
        });

        time::timeout(Duration::from_secs(2), confirmer().wait_for_reload(b"100", &marker))
            .await
            .expect("confirmation should survive transient read failures");
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_unchanged_marker_keeps_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("engine.pid");
        fs::write(&marker, "100").unwrap();

        let waited = time::timeout(
            Duration::from_millis(80),
            confirmer().wait_for_reload(b"100", &marker),
        )
        .await;
        assert!(waited.is_err(), "identical content must not confirm");
    }

    #[tokio::test]
    async fn test_comparison_is_byte_equality() {
        // "0100" and "100" would be equal as integers with a lenient parse;
        // as bytes they differ and must confirm.
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("engine.pid");
        fs::write(&marker, "0100").unwrap();

        time::timeout(Duration::from_secs(2), confirmer().wait_for_reload(b"100", &marker))
            .await
            .expect("byte-differing content confirms");
    }

    struct CountingReader {
        polls: Arc<AtomicU32>,
        fail_first: u32,
    }

    impl FileReader for CountingReader {
        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                Err(io::Error::new(io::ErrorKind::NotFound, "marker missing"))
            } else {
                Ok(b"200".to_vec())
            }
        }
    }

    #[tokio::test]
    async fn test_succeeds_on_third_poll_after_two_errors() {
        let polls = Arc::new(AtomicU32::new(0));
        let confirmer = ReloadConfirmer::with_poll_interval(
            CountingReader {
                polls: polls.clone(),
                fail_first: 2,
            },
            Duration::from_millis(5),
        );

        time::timeout(
            Duration::from_secs(2),
            confirmer.wait_for_reload(b"100", Path::new("/ignored")),
        )
        .await
        .expect("third poll sees the changed marker");

        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }
}
