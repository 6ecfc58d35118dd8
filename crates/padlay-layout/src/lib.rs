#![forbid(unsafe_code)]

//! Overlay widget layout and drag calibration.
//!
//! # Role in Padlay
//! `padlay-layout` is the engine. It owns the set of draggable overlay
//! widgets, resolves which widget a touch targets, runs the per-pointer drag
//! state machine, and enforces placement constraints.
//!
//! # Primary responsibilities
//! - **ControlWidget**: one overlay element with bounds, size limits,
//!   z-order, and a lock flag.
//! - **DragController**: per-pointer drag sessions; deltas are always taken
//!   from the gesture's original start position so repeated clamping cannot
//!   accumulate drift.
//! - **LayoutManager**: hit testing, touch dispatch, constraint enforcement,
//!   and reset-to-default.
//!
//! # How it fits in the system
//! Hosts feed `padlay_core::TouchEvent` values into
//! [`LayoutManager::handle_touch`] and apply the returned bounds to their
//! rendering primitive. `padlay-calib` snapshots and restores the resulting
//! layout across sessions.

pub mod analog;
pub mod drag;
pub mod manager;
pub mod widget;

use padlay_core::PointerId;
use thiserror::Error;

pub use analog::AnalogTracker;
pub use drag::{DragController, DragSession};
pub use manager::{LayoutManager, TouchOutcome};
pub use widget::{ControlWidget, WidgetId};

/// Errors produced by layout construction and drag dispatch.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Unsatisfiable geometry at construction time (negative or NaN extents,
    /// or a minimum size exceeding the maximum). Never raised mid-drag.
    #[error("invalid geometry for {context}: {reason}")]
    InvalidGeometry { context: String, reason: String },

    /// A widget with this id already exists in the layout.
    #[error("widget {id} already present in layout")]
    DuplicateWidget { id: WidgetId },

    /// The widget is already being dragged by another pointer. Recoverable:
    /// callers drop the extra pointer and keep the first gesture.
    #[error("widget {id} is already being dragged by pointer {pointer:?}")]
    WidgetBusy { id: WidgetId, pointer: PointerId },
}
