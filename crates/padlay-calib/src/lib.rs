#![forbid(unsafe_code)]

//! Calibration persistence.
//!
//! # Role in Padlay
//! `padlay-calib` saves and restores the user's widget layout across
//! sessions. The in-memory layout is always the source of truth; this crate
//! only ever reads it (via immutable snapshots) and writes bounds back
//! through the layout's own restore path.
//!
//! # Primary responsibilities
//! - **CalibrationStore**: versioned JSON file, written atomically
//!   (temp-file-then-rename) so a crash can never leave a half-written file.
//! - **PersistedCalibration**: the id → bounds snapshot that crosses the
//!   save/load boundary.
//! - **SaveWorker**: a background thread that coalesces save requests to the
//!   newest snapshot, keeping file I/O off the touch-handling thread.
//!
//! # Failure model
//! Every error here is recoverable. A missing or corrupt file falls back to
//! compiled-in defaults with a diagnostic; a failed save is logged and the
//! next gesture simply tries again. Nothing on this path may interrupt touch
//! handling.

pub mod store;
pub mod worker;

pub use store::{CalibrationStore, LoadError, PersistedCalibration, SaveError};
pub use worker::SaveWorker;
