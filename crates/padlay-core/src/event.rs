#![forbid(unsafe_code)]

//! Canonical touch-input types.
//!
//! Hosts translate their native input records (e.g. a platform motion event)
//! into [`TouchEvent`] values before handing them to the layout engine. The
//! engine never sees the host framework.
//!
//! # Design Notes
//!
//! - Coordinates are overlay-local; any screen-to-overlay transform is the
//!   host's job.
//! - One [`PointerId`] identifies one finger for the duration of a gesture.
//!   Ids may be reused after `Up`/`Cancel`.

use crate::geometry::Point;

/// Identifier of a touch pointer (one finger), assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// The phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger touched down.
    Down,
    /// A finger moved while down.
    Move,
    /// A finger lifted; the gesture commits.
    Up,
    /// The gesture was aborted by the host (e.g. palm rejection, focus loss).
    Cancel,
}

/// A single touch event in overlay-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub pointer: PointerId,
    pub phase: TouchPhase,
    pub pos: Point,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(pointer: PointerId, phase: TouchPhase, pos: Point) -> Self {
        Self {
            pointer,
            phase,
            pos,
        }
    }

    /// Convenience constructor for a `Down` event.
    #[must_use]
    pub const fn down(pointer: PointerId, pos: Point) -> Self {
        Self::new(pointer, TouchPhase::Down, pos)
    }

    /// Convenience constructor for a `Move` event.
    #[must_use]
    pub const fn moved(pointer: PointerId, pos: Point) -> Self {
        Self::new(pointer, TouchPhase::Move, pos)
    }

    /// Convenience constructor for an `Up` event.
    #[must_use]
    pub const fn up(pointer: PointerId, pos: Point) -> Self {
        Self::new(pointer, TouchPhase::Up, pos)
    }

    /// Convenience constructor for a `Cancel` event.
    #[must_use]
    pub const fn cancel(pointer: PointerId, pos: Point) -> Self {
        Self::new(pointer, TouchPhase::Cancel, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::{PointerId, TouchEvent, TouchPhase};
    use crate::geometry::Point;

    #[test]
    fn constructors_set_phase() {
        let p = PointerId(1);
        let pos = Point::new(3.0, 4.0);
        assert_eq!(TouchEvent::down(p, pos).phase, TouchPhase::Down);
        assert_eq!(TouchEvent::moved(p, pos).phase, TouchPhase::Move);
        assert_eq!(TouchEvent::up(p, pos).phase, TouchPhase::Up);
        assert_eq!(TouchEvent::cancel(p, pos).phase, TouchPhase::Cancel);
    }
}
