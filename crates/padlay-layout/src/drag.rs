#![forbid(unsafe_code)]

//! Per-pointer drag state machine.
//!
//! One [`DragSession`] exists per active pointer. The session captures the
//! touch-down position and the widget bounds at that moment; every subsequent
//! target is computed from those origins, never from the previous update.
//!
//! # Invariants
//!
//! 1. Every drag sequence is well-formed: begin → zero or more target
//!    computations → end or cancel.
//! 2. A widget has at most one session at a time; a second pointer landing on
//!    it is rejected with [`LayoutError::WidgetBusy`].
//! 3. Target bounds are a pure function of `(start_bounds, start_touch,
//!    current_touch, area)`, so the number of intermediate moves cannot
//!    change the outcome (no drift from repeated clamping).
//!
//! # Failure Modes
//!
//! - A `Down` for a pointer that already has a session discards the stale
//!   session first; the host never sent us the matching `Up`/`Cancel`.

use padlay_core::{Point, PointerId, Rect};
use rustc_hash::FxHashMap;

use crate::{LayoutError, WidgetId};

/// Transient state of one in-progress repositioning gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer driving the gesture.
    pub pointer: PointerId,
    /// Widget being repositioned.
    pub widget: WidgetId,
    /// Touch position at `Down`.
    pub start_touch: Point,
    /// Widget bounds at `Down`; `cancel` restores these.
    pub start_bounds: Rect,
}

impl DragSession {
    /// Target bounds for the current touch position: the start bounds
    /// translated by the total gesture delta, shifted back inside `area`.
    #[must_use]
    pub fn target_bounds(&self, pos: Point, area: &Rect) -> Rect {
        let delta = pos - self.start_touch;
        self.start_bounds
            .translate(delta.x, delta.y)
            .clamp_within(area)
    }
}

/// Tracks all active drag sessions, keyed by pointer id.
#[derive(Debug, Default)]
pub struct DragController {
    sessions: FxHashMap<PointerId, DragSession>,
}

impl DragController {
    /// Create an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `pointer` over `widget`.
    ///
    /// # Errors
    ///
    /// `LayoutError::WidgetBusy` if another pointer is already dragging the
    /// same widget.
    pub fn begin(
        &mut self,
        pointer: PointerId,
        widget: WidgetId,
        start_touch: Point,
        start_bounds: Rect,
    ) -> Result<&DragSession, LayoutError> {
        if let Some(owner) = self.dragging_pointer(&widget)
            && owner != pointer
        {
            return Err(LayoutError::WidgetBusy {
                id: widget,
                pointer: owner,
            });
        }
        let session = DragSession {
            pointer,
            widget,
            start_touch,
            start_bounds,
        };
        // Insert replaces any stale session for this pointer.
        self.sessions.insert(pointer, session);
        Ok(&self.sessions[&pointer])
    }

    /// The session for `pointer`, if one is active.
    #[inline]
    #[must_use]
    pub fn session(&self, pointer: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer)
    }

    /// Remove and return the session for `pointer`.
    pub fn end(&mut self, pointer: PointerId) -> Option<DragSession> {
        self.sessions.remove(&pointer)
    }

    /// Drop the session (if any) targeting `widget`. Used when the widget is
    /// removed from the layout mid-gesture.
    pub fn drop_widget(&mut self, widget: &WidgetId) {
        self.sessions.retain(|_, s| s.widget != *widget);
    }

    /// The pointer currently dragging `widget`, if any.
    #[must_use]
    pub fn dragging_pointer(&self, widget: &WidgetId) -> Option<PointerId> {
        self.sessions
            .values()
            .find(|s| s.widget == *widget)
            .map(|s| s.pointer)
    }

    /// Number of active sessions.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Discard all sessions without committing anything.
    pub fn reset(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use padlay_core::{Point, PointerId, Rect};

    use super::DragController;
    use crate::{LayoutError, WidgetId};

    fn controller_with_session(pointer: PointerId) -> DragController {
        let mut dc = DragController::new();
        dc.begin(
            pointer,
            WidgetId::from("a"),
            Point::new(10.0, 10.0),
            Rect::from_size(50.0, 50.0),
        )
        .unwrap();
        dc
    }

    #[test]
    fn second_pointer_on_same_widget_is_busy() {
        let mut dc = controller_with_session(PointerId(0));
        let err = dc
            .begin(
                PointerId(1),
                WidgetId::from("a"),
                Point::ZERO,
                Rect::from_size(50.0, 50.0),
            )
            .unwrap_err();
        assert!(matches!(err, LayoutError::WidgetBusy { pointer, .. } if pointer == PointerId(0)));
        assert_eq!(dc.active_count(), 1);
    }

    #[test]
    fn distinct_widgets_drag_concurrently() {
        let mut dc = controller_with_session(PointerId(0));
        dc.begin(
            PointerId(1),
            WidgetId::from("b"),
            Point::ZERO,
            Rect::from_size(30.0, 30.0),
        )
        .unwrap();
        assert_eq!(dc.active_count(), 2);
    }

    #[test]
    fn stale_session_replaced_on_repeat_down() {
        let mut dc = controller_with_session(PointerId(0));
        dc.begin(
            PointerId(0),
            WidgetId::from("a"),
            Point::new(1.0, 2.0),
            Rect::from_size(50.0, 50.0),
        )
        .unwrap();
        assert_eq!(dc.active_count(), 1);
        assert_eq!(
            dc.session(PointerId(0)).unwrap().start_touch,
            Point::new(1.0, 2.0)
        );
    }

    #[test]
    fn target_bounds_is_delta_from_start() {
        let dc = controller_with_session(PointerId(0));
        let session = dc.session(PointerId(0)).unwrap();
        let area = Rect::from_size(200.0, 200.0);
        let target = session.target_bounds(Point::new(30.0, 20.0), &area);
        assert_eq!(target, Rect::new(20.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn target_bounds_clamps_to_area() {
        let dc = controller_with_session(PointerId(0));
        let session = dc.session(PointerId(0)).unwrap();
        let area = Rect::from_size(200.0, 200.0);
        let target = session.target_bounds(Point::new(-40.0, -40.0), &area);
        assert_eq!(target, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn end_removes_session() {
        let mut dc = controller_with_session(PointerId(0));
        assert!(dc.end(PointerId(0)).is_some());
        assert!(dc.end(PointerId(0)).is_none());
        assert_eq!(dc.active_count(), 0);
    }
}
