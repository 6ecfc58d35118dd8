#![forbid(unsafe_code)]

//! Overlay control widgets.
//!
//! A [`ControlWidget`] is one user-repositionable on-screen control region
//! (button, stick, pad). The widget validates its geometry once at
//! construction; afterwards [`ControlWidget::set_bounds`] can only clamp,
//! never fail.

use padlay_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::LayoutError;

// ---------------------------------------------------------------------------
// WidgetId
// ---------------------------------------------------------------------------

/// Stable identifier of a widget, unique within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Create an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ControlWidget
// ---------------------------------------------------------------------------

/// One draggable overlay element.
///
/// Bounds are mutated only by the drag machinery, calibration restore, or an
/// explicit reset to the compiled-in default captured at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlWidget {
    id: WidgetId,
    bounds: Rect,
    default_bounds: Rect,
    min_size: Size,
    max_size: Size,
    z_order: i32,
    locked: bool,
}

impl ControlWidget {
    /// Create a widget with the given default bounds.
    ///
    /// Size limits default to `[Size::ZERO, Size::MAX]`; z-order defaults to
    /// 0 and ties fall back to insertion order in the layout.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidGeometry` if `bounds` has a negative or non-finite
    /// component.
    pub fn new(id: impl Into<WidgetId>, bounds: Rect) -> Result<Self, LayoutError> {
        let id = id.into();
        if !bounds.is_finite() || bounds.width < 0.0 || bounds.height < 0.0 {
            return Err(LayoutError::InvalidGeometry {
                context: format!("widget {id}"),
                reason: format!("bounds {bounds:?} must be finite with non-negative extent"),
            });
        }
        Ok(Self {
            id,
            bounds,
            default_bounds: bounds,
            min_size: Size::ZERO,
            max_size: Size::MAX,
            z_order: 0,
            locked: false,
        })
    }

    /// Set per-dimension size limits applied by [`set_bounds`](Self::set_bounds).
    ///
    /// The current bounds are re-clamped immediately so the widget never
    /// violates its own limits.
    ///
    /// # Errors
    ///
    /// `LayoutError::InvalidGeometry` if either size is invalid or
    /// `min > max` in some dimension.
    pub fn with_size_limits(mut self, min: Size, max: Size) -> Result<Self, LayoutError> {
        if !min.is_valid() || !max.is_valid() || min.width > max.width || min.height > max.height {
            return Err(LayoutError::InvalidGeometry {
                context: format!("widget {}", self.id),
                reason: format!("size limits min={min:?} max={max:?} are unsatisfiable"),
            });
        }
        self.min_size = min;
        self.max_size = max;
        let clamped = self.clamp_size(self.bounds);
        self.bounds = clamped;
        self.default_bounds = self.clamp_size(self.default_bounds);
        Ok(self)
    }

    /// Set the z-order. Higher values draw and receive hits first on overlap.
    #[must_use]
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Set the lock flag. Locked widgets never start a drag.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Widget identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// Current bounds.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds the widget resets to.
    #[inline]
    #[must_use]
    pub fn default_bounds(&self) -> Rect {
        self.default_bounds
    }

    /// Z-order.
    #[inline]
    #[must_use]
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Whether the widget ignores drag input.
    #[inline]
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock the widget.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Apply new bounds, clamping the extent to the widget's size limits.
    ///
    /// Returns the bounds actually applied. Non-finite input is rejected by
    /// leaving the current bounds untouched; a drag can therefore never
    /// corrupt a widget.
    pub fn set_bounds(&mut self, new_bounds: Rect) -> Rect {
        if !new_bounds.is_finite() {
            return self.bounds;
        }
        self.bounds = self.clamp_size(new_bounds);
        self.bounds
    }

    /// Restore the compiled-in default bounds.
    pub fn reset(&mut self) -> Rect {
        self.bounds = self.default_bounds;
        self.bounds
    }

    fn clamp_size(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x,
            rect.y,
            rect.width.clamp(self.min_size.width, self.max_size.width),
            rect.height.clamp(self.min_size.height, self.max_size.height),
        )
    }
}
