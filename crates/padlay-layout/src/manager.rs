#![forbid(unsafe_code)]

//! Layout ownership and touch dispatch.
//!
//! [`LayoutManager`] owns the widget set, resolves which widget a touch
//! targets, drives the drag controller, and keeps every widget inside the
//! containing overlay area.
//!
//! # Invariants
//!
//! 1. Widget ids are unique; inserting a duplicate fails.
//! 2. After any mutation (insert, drag update, calibration restore, reset),
//!    every widget's bounds lie inside the containing area.
//! 3. `Cancel` restores the exact bounds captured at `Down`; only `Up`
//!    commits.
//!
//! # Failure Modes
//!
//! - A second pointer landing on a widget mid-drag is dropped
//!   ([`TouchOutcome::Ignored`]); the first gesture keeps the widget.
//! - `Move`/`Up`/`Cancel` for an unknown pointer are ignored, so hosts that
//!   deliver events after a layout teardown cannot corrupt state.

use padlay_core::{Point, PointerId, Rect, TouchEvent, TouchPhase};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::drag::{DragController, DragSession};
use crate::widget::{ControlWidget, WidgetId};
use crate::LayoutError;

// ---------------------------------------------------------------------------
// TouchOutcome
// ---------------------------------------------------------------------------

/// What a dispatched touch event did.
///
/// Variants carrying bounds are the host's signal to reposition its drawn
/// element; [`TouchOutcome::DragCommitted`] is additionally the signal to
/// persist calibration.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchOutcome {
    /// The event hit nothing, targeted a busy or locked widget, or arrived
    /// outside edit mode.
    Ignored,
    /// A drag began over `widget`.
    DragStarted { widget: WidgetId },
    /// An active drag moved; `bounds` were applied.
    DragMoved { widget: WidgetId, bounds: Rect },
    /// A drag finished; `bounds` are final and should be persisted.
    DragCommitted { widget: WidgetId, bounds: Rect },
    /// A drag was aborted; `bounds` were restored to their pre-drag value.
    DragCancelled { widget: WidgetId, bounds: Rect },
}

// ---------------------------------------------------------------------------
// LayoutManager
// ---------------------------------------------------------------------------

/// Owns the set of overlay widgets and all active drag sessions.
///
/// All mutation happens on the host's event-delivery thread; the manager
/// needs no internal locking.
#[derive(Debug)]
pub struct LayoutManager {
    widgets: Vec<ControlWidget>,
    index: FxHashMap<WidgetId, usize>,
    area: Rect,
    drag: DragController,
    edit_mode: bool,
}

impl LayoutManager {
    /// Create a manager for the containing area `[0, width] x [0, height]`.
    ///
    /// Starts in edit mode: touches reposition widgets. Hosts switch edit
    /// mode off while the overlay is used as a live control surface.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidGeometry` if either extent is non-finite or not
    /// strictly positive.
    pub fn new(area_width: f32, area_height: f32) -> Result<Self, LayoutError> {
        if !area_width.is_finite() || !area_height.is_finite() || area_width <= 0.0 || area_height <= 0.0
        {
            return Err(LayoutError::InvalidGeometry {
                context: "layout area".to_owned(),
                reason: format!("area {area_width}x{area_height} must be finite and positive"),
            });
        }
        Ok(Self {
            widgets: Vec::new(),
            index: FxHashMap::default(),
            area: Rect::from_size(area_width, area_height),
            drag: DragController::new(),
            edit_mode: true,
        })
    }

    /// The containing area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether touches currently reposition widgets.
    #[inline]
    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Switch edit mode on or off. Switching off aborts nothing; active
    /// sessions still finish via `Up`/`Cancel`.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    // -----------------------------------------------------------------------
    // Widget set
    // -----------------------------------------------------------------------

    /// Insert a widget. Its bounds are shifted inside the containing area.
    ///
    /// # Errors
    ///
    /// `LayoutError::DuplicateWidget` if the id is already present.
    pub fn add_widget(&mut self, mut widget: ControlWidget) -> Result<(), LayoutError> {
        if self.index.contains_key(widget.id()) {
            return Err(LayoutError::DuplicateWidget {
                id: widget.id().clone(),
            });
        }
        widget.set_bounds(widget.bounds().clamp_within(&self.area));
        self.index.insert(widget.id().clone(), self.widgets.len());
        self.widgets.push(widget);
        Ok(())
    }

    /// Remove a widget, aborting any drag session targeting it.
    pub fn remove_widget(&mut self, id: &WidgetId) -> Option<ControlWidget> {
        let pos = self.index.remove(id)?;
        let widget = self.widgets.remove(pos);
        for (i, w) in self.widgets.iter().enumerate().skip(pos) {
            self.index.insert(w.id().clone(), i);
        }
        self.drag.drop_widget(id);
        Some(widget)
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&ControlWidget> {
        self.index.get(id).map(|&i| &self.widgets[i])
    }

    /// Widgets in insertion order.
    pub fn widgets(&self) -> impl Iterator<Item = &ControlWidget> {
        self.widgets.iter()
    }

    /// Number of widgets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the layout holds no widgets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    /// The highest-z-order widget containing `pos`, locked or not.
    ///
    /// Ties (overlapping widgets with equal z-order, or a point on a shared
    /// edge) go to the widget inserted last.
    #[must_use]
    pub fn hit_test(&self, pos: Point) -> Option<&WidgetId> {
        self.hit_candidate(pos, false).map(ControlWidget::id)
    }

    /// Like [`hit_test`](Self::hit_test) but skips locked widgets. This is
    /// the lookup that starts drags; the plain variant exists for hosts that
    /// want tap pass-through on locked widgets.
    #[must_use]
    pub fn hit_test_unlocked(&self, pos: Point) -> Option<&WidgetId> {
        self.hit_candidate(pos, true).map(ControlWidget::id)
    }

    fn hit_candidate(&self, pos: Point, skip_locked: bool) -> Option<&ControlWidget> {
        self.widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| (!skip_locked || !w.locked()) && w.bounds().contains(pos))
            .max_by_key(|(i, w)| (w.z_order(), *i))
            .map(|(_, w)| w)
    }

    // -----------------------------------------------------------------------
    // Drag lifecycle
    // -----------------------------------------------------------------------

    /// Begin a drag at `pos`.
    ///
    /// Returns `Ok(None)` when no unlocked widget contains the point.
    ///
    /// # Errors
    ///
    /// `LayoutError::WidgetBusy` if the hit widget is already being dragged
    /// by another pointer.
    pub fn begin_drag(
        &mut self,
        pointer: PointerId,
        pos: Point,
    ) -> Result<Option<DragSession>, LayoutError> {
        let Some(id) = self.hit_test_unlocked(pos).cloned() else {
            return Ok(None);
        };
        let bounds = self.widget(&id).map(ControlWidget::bounds);
        let Some(bounds) = bounds else {
            return Ok(None);
        };
        let session = self.drag.begin(pointer, id, pos, bounds)?.clone();
        debug!(widget = %session.widget, pointer = ?pointer, "drag started");
        Ok(Some(session))
    }

    /// Apply the current touch position to an active drag.
    ///
    /// The target is always computed from the gesture's start position and
    /// start bounds, so repeated clamping cannot accumulate drift. Returns
    /// the applied bounds, or `None` for unknown pointers.
    pub fn update_drag(&mut self, pointer: PointerId, pos: Point) -> Option<(WidgetId, Rect)> {
        let (id, target) = {
            let session = self.drag.session(pointer)?;
            (session.widget.clone(), session.target_bounds(pos, &self.area))
        };
        let applied = self.set_widget_bounds(&id, target)?;
        Some((id, applied))
    }

    /// Commit an active drag. The widget keeps its current bounds; the
    /// returned pair is the host's signal to persist calibration.
    pub fn end_drag(&mut self, pointer: PointerId) -> Option<(WidgetId, Rect)> {
        let session = self.drag.end(pointer)?;
        let bounds = self.widget(&session.widget).map(ControlWidget::bounds)?;
        debug!(widget = %session.widget, pointer = ?pointer, "drag committed");
        Some((session.widget, bounds))
    }

    /// Abort an active drag, restoring the bounds captured at `Down`.
    pub fn cancel_drag(&mut self, pointer: PointerId) -> Option<(WidgetId, Rect)> {
        let session = self.drag.end(pointer)?;
        let restored = self.set_widget_bounds(&session.widget, session.start_bounds)?;
        debug!(widget = %session.widget, pointer = ?pointer, "drag cancelled");
        Some((session.widget, restored))
    }

    /// Dispatch one touch event.
    ///
    /// Outside edit mode every event is [`TouchOutcome::Ignored`] so hosts
    /// can route the touch to live control handling instead.
    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchOutcome {
        if !self.edit_mode {
            return TouchOutcome::Ignored;
        }
        match event.phase {
            TouchPhase::Down => match self.begin_drag(event.pointer, event.pos) {
                Ok(Some(session)) => TouchOutcome::DragStarted {
                    widget: session.widget,
                },
                Ok(None) => TouchOutcome::Ignored,
                Err(err) => {
                    debug!(%err, "drag rejected");
                    TouchOutcome::Ignored
                }
            },
            TouchPhase::Move => match self.update_drag(event.pointer, event.pos) {
                Some((widget, bounds)) => TouchOutcome::DragMoved { widget, bounds },
                None => TouchOutcome::Ignored,
            },
            TouchPhase::Up => match self.end_drag(event.pointer) {
                Some((widget, bounds)) => TouchOutcome::DragCommitted { widget, bounds },
                None => TouchOutcome::Ignored,
            },
            TouchPhase::Cancel => match self.cancel_drag(event.pointer) {
                Some((widget, bounds)) => TouchOutcome::DragCancelled { widget, bounds },
                None => TouchOutcome::Ignored,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Calibration hooks
    // -----------------------------------------------------------------------

    /// Apply externally restored bounds (persisted calibration) to a widget.
    ///
    /// The rect passes through the widget's size limits and is then shifted
    /// inside the containing area. Returns the applied bounds, or `None` for
    /// unknown ids.
    pub fn restore_bounds(&mut self, id: &WidgetId, bounds: Rect) -> Option<Rect> {
        self.set_widget_bounds(id, bounds)
    }

    /// Restore compiled-in default bounds for one widget (`Some(id)`) or all
    /// widgets (`None`), bypassing persisted calibration. Any drag session on
    /// an affected widget is discarded.
    pub fn reset_to_default(&mut self, target: Option<&WidgetId>) {
        let area = self.area;
        for widget in &mut self.widgets {
            if target.is_some_and(|id| id != widget.id()) {
                continue;
            }
            let default = widget.default_bounds();
            widget.set_bounds(default.clamp_within(&area));
        }
        match target {
            Some(id) => self.drag.drop_widget(id),
            None => self.drag.reset(),
        }
    }

    fn set_widget_bounds(&mut self, id: &WidgetId, bounds: Rect) -> Option<Rect> {
        let area = self.area;
        let widget = self.index.get(id).map(|&i| &mut self.widgets[i])?;
        let sized = widget.set_bounds(bounds);
        Some(widget.set_bounds(sized.clamp_within(&area)))
    }
}
