#![forbid(unsafe_code)]

//! Core: geometry and touch-event primitives.
//!
//! # Role in Padlay
//! `padlay-core` is the value-type layer. It owns the coordinate types that
//! every other crate speaks (`Point`, `Size`, `Rect`) and the neutral touch
//! event record (`TouchEvent`) that hosts feed into the layout engine.
//!
//! # Primary responsibilities
//! - **Geometry**: points, sizes, rectangles, containment/overlap tests, and
//!   the shift-only clamp used to keep widgets inside the overlay area.
//! - **Events**: touch phases and pointer ids, abstracted away from any
//!   particular host input framework.
//!
//! # How it fits in the system
//! The layout engine (`padlay-layout`) consumes `TouchEvent` values and
//! mutates widget bounds expressed as `Rect`. Persistence (`padlay-calib`)
//! serializes those same rectangles. Nothing here performs I/O or holds
//! state.

pub mod event;
pub mod geometry;

pub use event::{PointerId, TouchEvent, TouchPhase};
pub use geometry::{Point, Rect, Size};
