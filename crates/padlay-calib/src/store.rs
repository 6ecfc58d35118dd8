#![forbid(unsafe_code)]

//! Calibration file storage.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "widgets": {
//!     "dpad": [12.0, 340.0, 160.0, 160.0],
//!     "stick-left": [200.0, 360.0, 140.0, 140.0]
//!   }
//! }
//! ```
//!
//! Rectangles are `[x, y, width, height]`. A `BTreeMap` keeps file output
//! deterministic (easier to diff and to assert on in tests).
//!
//! # Atomic Writes
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so readers never observe a half-written file.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use padlay_core::Rect;
use padlay_layout::{LayoutManager, WidgetId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Current file format version. Unknown versions load as `Corrupt`.
const FORMAT_VERSION: u64 = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a calibration file could not be loaded. Callers fall back to the
/// compiled-in defaults in every case.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No calibration has been saved yet.
    #[error("no calibration file found")]
    Missing,

    /// The file exists but cannot be understood (parse failure, unknown
    /// version, or non-finite geometry).
    #[error("calibration file is corrupt: {0}")]
    Corrupt(String),

    /// The file could not be read for reasons other than absence.
    #[error("failed to read calibration file")]
    Io(#[from] io::Error),
}

/// Why a calibration save failed. Recoverable: the layout stays intact and
/// the next save simply tries again.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize calibration")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write calibration file")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// PersistedCalibration
// ---------------------------------------------------------------------------

/// A snapshot of widget bounds keyed by widget id.
///
/// Snapshots are taken synchronously on the event thread (see
/// [`PersistedCalibration::snapshot`]) so a concurrent drag can never tear
/// the data handed to a background save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedCalibration {
    widgets: BTreeMap<WidgetId, Rect>,
}

impl PersistedCalibration {
    /// An empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current bounds of every widget in the layout.
    #[must_use]
    pub fn snapshot(layout: &LayoutManager) -> Self {
        let widgets = layout
            .widgets()
            .map(|w| (w.id().clone(), w.bounds()))
            .collect();
        Self { widgets }
    }

    /// Record bounds for one widget id.
    pub fn insert(&mut self, id: WidgetId, bounds: Rect) {
        self.widgets.insert(id, bounds);
    }

    /// Saved bounds for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &WidgetId) -> Option<Rect> {
        self.widgets.get(id).copied()
    }

    /// Number of saved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate over saved entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&WidgetId, Rect)> {
        self.widgets.iter().map(|(id, r)| (id, *r))
    }

    /// Restore saved bounds into `layout`.
    ///
    /// Only ids present in both sides are touched: stale persisted entries
    /// (for controls that no longer exist) are skipped, and widgets without
    /// a saved entry keep their compiled-in defaults. Returns the number of
    /// widgets restored.
    pub fn apply_to(&self, layout: &mut LayoutManager) -> usize {
        let ids: Vec<WidgetId> = layout.widgets().map(|w| w.id().clone()).collect();
        let mut applied = 0;
        for id in ids {
            if let Some(bounds) = self.get(&id)
                && layout.restore_bounds(&id, bounds).is_some()
            {
                applied += 1;
            }
        }
        applied
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct CalibrationFile {
    version: u64,
    widgets: BTreeMap<String, [f32; 4]>,
}

fn to_wire(snapshot: &PersistedCalibration) -> CalibrationFile {
    CalibrationFile {
        version: FORMAT_VERSION,
        widgets: snapshot
            .iter()
            .map(|(id, r)| (id.as_str().to_owned(), [r.x, r.y, r.width, r.height]))
            .collect(),
    }
}

fn from_wire(file: CalibrationFile) -> Result<PersistedCalibration, LoadError> {
    if file.version != FORMAT_VERSION {
        return Err(LoadError::Corrupt(format!(
            "unsupported version {} (expected {FORMAT_VERSION})",
            file.version
        )));
    }
    let mut snapshot = PersistedCalibration::new();
    for (id, [x, y, width, height]) in file.widgets {
        let rect = Rect::new(x, y, width, height);
        if !rect.is_finite() || width < 0.0 || height < 0.0 {
            return Err(LoadError::Corrupt(format!(
                "widget {id} has invalid bounds {rect:?}"
            )));
        }
        snapshot.insert(WidgetId::from(id), rect);
    }
    Ok(snapshot)
}

// ---------------------------------------------------------------------------
// CalibrationStore
// ---------------------------------------------------------------------------

/// Reads and writes the calibration file at a fixed path.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    path: PathBuf,
}

impl CalibrationStore {
    /// Create a store backed by `path`. The parent directory must exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot `layout` and persist it.
    ///
    /// # Errors
    ///
    /// `SaveError` on serialization or file I/O failure; the layout itself
    /// is unaffected.
    pub fn save(&self, layout: &LayoutManager) -> Result<(), SaveError> {
        self.write_snapshot(&PersistedCalibration::snapshot(layout))
    }

    /// Persist an already-taken snapshot as one atomic unit.
    ///
    /// # Errors
    ///
    /// `SaveError` on serialization or file I/O failure.
    pub fn write_snapshot(&self, snapshot: &PersistedCalibration) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(&to_wire(snapshot))?;

        // Atomic write: temp file in the same directory, then rename.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), widgets = snapshot.len(), "calibration saved");
        Ok(())
    }

    /// Load the persisted calibration.
    ///
    /// # Errors
    ///
    /// [`LoadError::Missing`] when no file exists, [`LoadError::Corrupt`]
    /// when it cannot be parsed or contains invalid geometry.
    pub fn load(&self) -> Result<PersistedCalibration, LoadError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::Missing),
            Err(e) => return Err(LoadError::Io(e)),
        };
        let file: CalibrationFile =
            serde_json::from_str(&contents).map_err(|e| LoadError::Corrupt(e.to_string()))?;
        from_wire(file)
    }

    /// Load and apply saved calibration, falling back to defaults.
    ///
    /// A missing file is normal on first launch; a corrupt or unreadable one
    /// is logged. In both cases the layout keeps its compiled-in defaults.
    /// Returns the number of widgets restored.
    pub fn apply_saved(&self, layout: &mut LayoutManager) -> usize {
        match self.load() {
            Ok(snapshot) => snapshot.apply_to(layout),
            Err(LoadError::Missing) => {
                debug!(path = %self.path.display(), "no saved calibration, using defaults");
                0
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable calibration");
                0
            }
        }
    }
}
