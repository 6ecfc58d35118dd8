#![forbid(unsafe_code)]

//! Analog deflection tracking for joystick-style widgets.
//!
//! Outside edit mode a stick widget does not move; instead the touch drives a
//! virtual analog axis pair. [`AnalogTracker`] turns a touch stream into a
//! normalized deflection vector anchored at the first touch position.
//!
//! The output is *box-normalized*: the dominant axis of a full deflection
//! reaches exactly ±1 while the other axis keeps the direction ratio. This
//! matches physical stick hardware, where pushing diagonally pins both axes.
//!
//! This type is a pure helper; it knows nothing about widgets or layouts.

use padlay_core::Point;

use crate::LayoutError;

/// Converts anchored touch positions into analog stick state.
#[derive(Debug, Clone)]
pub struct AnalogTracker {
    radius: f32,
    anchor: Option<Point>,
    state: Point,
    deflection: Point,
}

impl AnalogTracker {
    /// Create a tracker with the given full-deflection radius.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidGeometry` if `radius` is non-finite or not
    /// strictly positive.
    pub fn new(radius: f32) -> Result<Self, LayoutError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LayoutError::InvalidGeometry {
                context: "analog tracker".to_owned(),
                reason: format!("radius {radius} must be finite and positive"),
            });
        }
        Ok(Self {
            radius,
            anchor: None,
            state: Point::ZERO,
            deflection: Point::ZERO,
        })
    }

    /// Feed the current touch position, or `None` when the finger lifted.
    ///
    /// The first position after a release becomes the anchor. Returns the
    /// new box-normalized state.
    pub fn touch(&mut self, pos: Option<Point>) -> Point {
        let Some(pos) = pos else {
            self.anchor = None;
            self.state = Point::ZERO;
            self.deflection = Point::ZERO;
            return self.state;
        };

        let anchor = *self.anchor.get_or_insert(pos);
        let dir = pos - anchor;
        let length = dir.length();
        if length > 0.0 {
            let strength = if length > self.radius {
                1.0
            } else {
                length / self.radius
            };
            let dir_norm = dir / length;
            self.deflection = dir_norm * strength;
            let dominant = dir_norm.x.abs().max(dir_norm.y.abs());
            self.state = dir_norm / dominant * strength;
        } else {
            self.deflection = Point::ZERO;
            self.state = Point::ZERO;
        }
        self.state
    }

    /// Box-normalized stick state: each axis in `[-1, 1]`, dominant axis at
    /// full magnitude under full deflection.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Point {
        self.state
    }

    /// Circle-clamped deflection: the raw direction scaled to at most unit
    /// length. Useful for drawing a stick handle.
    #[inline]
    #[must_use]
    pub fn deflection(&self) -> Point {
        self.deflection
    }

    /// The anchor position, if a touch is active.
    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use padlay_core::Point;

    use super::AnalogTracker;
    use crate::LayoutError;

    #[test]
    fn rejects_degenerate_radius() {
        assert!(matches!(
            AnalogTracker::new(0.0),
            Err(LayoutError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            AnalogTracker::new(f32::NAN),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn first_touch_anchors_and_reads_zero() {
        let mut stick = AnalogTracker::new(100.0).unwrap();
        let state = stick.touch(Some(Point::new(40.0, 40.0)));
        assert_eq!(state, Point::ZERO);
        assert_eq!(stick.anchor(), Some(Point::new(40.0, 40.0)));
    }

    #[test]
    fn full_horizontal_deflection_pins_axis() {
        let mut stick = AnalogTracker::new(100.0).unwrap();
        stick.touch(Some(Point::ZERO));
        let state = stick.touch(Some(Point::new(250.0, 0.0)));
        assert_eq!(state, Point::new(1.0, 0.0));
    }

    #[test]
    fn diagonal_deflection_is_box_normalized() {
        let mut stick = AnalogTracker::new(100.0).unwrap();
        stick.touch(Some(Point::ZERO));
        let state = stick.touch(Some(Point::new(200.0, 200.0)));
        assert!((state.x - 1.0).abs() < 1e-6);
        assert!((state.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn partial_deflection_scales_linearly() {
        let mut stick = AnalogTracker::new(100.0).unwrap();
        stick.touch(Some(Point::ZERO));
        let state = stick.touch(Some(Point::new(50.0, 0.0)));
        assert!((state.x - 0.5).abs() < 1e-6);
        assert_eq!(state.y, 0.0);
        assert!((stick.deflection().length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn release_resets_everything() {
        let mut stick = AnalogTracker::new(100.0).unwrap();
        stick.touch(Some(Point::ZERO));
        stick.touch(Some(Point::new(80.0, 0.0)));
        let state = stick.touch(None);
        assert_eq!(state, Point::ZERO);
        assert_eq!(stick.anchor(), None);
        assert_eq!(stick.deflection(), Point::ZERO);
    }
}
