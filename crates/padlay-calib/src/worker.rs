#![forbid(unsafe_code)]

//! Background save worker.
//!
//! Saving calibration is file I/O and must never block the touch-handling
//! thread. [`SaveWorker`] moves all writes onto a dedicated thread fed with
//! immutable [`PersistedCalibration`] snapshots.
//!
//! # Coalescing Rules
//!
//! - Snapshots are coalesced: if several arrive before the thread gets to
//!   them, only the newest is written (last-writer-wins). This is the
//!   best-effort cancellation of superseded in-flight saves.
//! - `Shutdown` still flushes the newest pending snapshot before the thread
//!   exits, so a save submitted right before teardown is not lost.
//!
//! # Error Propagation
//!
//! Write failures are logged and sent back on a bounded error channel. The
//! caller polls [`SaveWorker::check_error`] when it cares; the worker keeps
//! running either way, because a failed save only means "defaults next
//! launch" for that snapshot.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::store::{CalibrationStore, PersistedCalibration, SaveError};

enum SaveMsg {
    Snapshot(PersistedCalibration),
    Shutdown,
}

/// Handle to the background save thread.
pub struct SaveWorker {
    sender: mpsc::Sender<SaveMsg>,
    handle: Option<JoinHandle<()>>,
    error_rx: mpsc::Receiver<SaveError>,
}

impl SaveWorker {
    /// Spawn the worker thread writing through `store`.
    ///
    /// # Errors
    ///
    /// `std::io::Error` if the thread cannot be spawned.
    pub fn start(store: CalibrationStore) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<SaveMsg>();
        let (err_tx, err_rx) = mpsc::sync_channel::<SaveError>(8);

        let handle = thread::Builder::new()
            .name("padlay-save".into())
            .spawn(move || {
                save_loop(&store, &rx, &err_tx);
            })?;

        Ok(Self {
            sender: tx,
            handle: Some(handle),
            error_rx: err_rx,
        })
    }

    /// Queue a snapshot for saving. Never blocks.
    ///
    /// Returns `false` if the worker thread is gone (the snapshot is
    /// dropped; the layout itself is unaffected).
    pub fn submit(&self, snapshot: PersistedCalibration) -> bool {
        self.sender.send(SaveMsg::Snapshot(snapshot)).is_ok()
    }

    /// Poll for an error from a previous save, if any.
    pub fn check_error(&self) -> Option<SaveError> {
        self.error_rx.try_recv().ok()
    }

    /// Flush the newest pending snapshot and join the thread.
    pub fn shutdown(mut self) {
        let _ = self.sender.send(SaveMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(SaveMsg::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn save_loop(
    store: &CalibrationStore,
    rx: &mpsc::Receiver<SaveMsg>,
    err_tx: &mpsc::SyncSender<SaveError>,
) {
    loop {
        let first = match rx.recv() {
            Ok(msg) => msg,
            Err(_) => return,
        };

        let mut latest: Option<PersistedCalibration> = None;
        let mut shutdown = false;

        collect_msg(first, &mut latest, &mut shutdown);
        while !shutdown
            && let Ok(msg) = rx.try_recv()
        {
            collect_msg(msg, &mut latest, &mut shutdown);
        }

        if let Some(snapshot) = latest
            && let Err(e) = store.write_snapshot(&snapshot)
        {
            error!(path = %store.path().display(), err = %e, "background calibration save failed");
            let _ = err_tx.try_send(e);
        }

        if shutdown {
            return;
        }
    }
}

fn collect_msg(msg: SaveMsg, latest: &mut Option<PersistedCalibration>, shutdown: &mut bool) {
    match msg {
        SaveMsg::Snapshot(snapshot) => *latest = Some(snapshot),
        SaveMsg::Shutdown => *shutdown = true,
    }
}

#[cfg(test)]
mod tests {
    use padlay_core::Rect;
    use padlay_layout::WidgetId;

    use super::SaveWorker;
    use crate::store::{CalibrationStore, PersistedCalibration};

    fn snapshot(x: f32) -> PersistedCalibration {
        let mut s = PersistedCalibration::new();
        s.insert(WidgetId::from("a"), Rect::new(x, 0.0, 50.0, 50.0));
        s
    }

    #[test]
    fn shutdown_flushes_newest_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = CalibrationStore::new(dir.path().join("calibration.json"));

        let worker = SaveWorker::start(store.clone()).unwrap();
        assert!(worker.submit(snapshot(1.0)));
        assert!(worker.submit(snapshot(2.0)));
        assert!(worker.submit(snapshot(3.0)));
        worker.shutdown();

        let loaded = store.load().unwrap();
        assert_eq!(
            loaded.get(&WidgetId::from("a")).unwrap(),
            Rect::new(3.0, 0.0, 50.0, 50.0)
        );
    }

    #[test]
    fn drop_also_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let store = CalibrationStore::new(dir.path().join("calibration.json"));

        {
            let worker = SaveWorker::start(store.clone()).unwrap();
            assert!(worker.submit(snapshot(7.0)));
        }

        let loaded = store.load().unwrap();
        assert_eq!(
            loaded.get(&WidgetId::from("a")).unwrap(),
            Rect::new(7.0, 0.0, 50.0, 50.0)
        );
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CalibrationStore::new(dir.path().join("missing").join("calibration.json"));

        let worker = SaveWorker::start(store).unwrap();
        assert!(worker.submit(snapshot(1.0)));

        // Poll until the worker has processed the snapshot.
        let mut reported = None;
        for _ in 0..200 {
            if let Some(err) = worker.check_error() {
                reported = Some(err);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(reported.is_some());

        // The worker survives the failure and still shuts down cleanly.
        worker.shutdown();
    }
}
