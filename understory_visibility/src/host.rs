// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities: where the sensor gets its geometry from.
//!
//! The sensor never talks to a windowing system or a render tree directly.
//! A host framework provides:
//!
//! - an [`ElementBinding`] for the watched node (and optionally one for a
//!   containment element), answering "what is this node's rectangle right
//!   now?", and
//! - a [`ViewportSize`] used to build the default containment rectangle
//!   `(0, 0, width, height)` when no containment element is configured.

use kurbo::{Rect, Size};

/// Resolves the current bounding rectangle of a rendered node.
///
/// The rectangle is expressed in viewport coordinates (`x0` = left, `y0` =
/// top, `x1` = right, `y1` = bottom). Returning `None` means the node cannot
/// be resolved right now (for example the child rendered nothing); the sensor
/// treats that as "skip this cycle", not as an error.
pub trait ElementBinding {
    /// Returns the node's current bounding rectangle, if it is resolvable.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl ElementBinding for Rect {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl ElementBinding for Option<Rect> {
    fn bounding_rect(&self) -> Option<Rect> {
        *self
    }
}

impl<F> ElementBinding for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounding_rect(&self) -> Option<Rect> {
        self()
    }
}

/// Reports the size of the viewport used as the default containment.
pub trait ViewportSize {
    /// Returns the current viewport size in the same units as element rects.
    fn viewport_size(&self) -> Size;

    /// Returns the default containment rectangle, `(0, 0)` to the viewport size.
    fn viewport_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.viewport_size())
    }
}

impl ViewportSize for Size {
    fn viewport_size(&self) -> Size {
        *self
    }
}

impl<F> ViewportSize for F
where
    F: Fn() -> Size,
{
    fn viewport_size(&self) -> Size {
        self()
    }
}

/// A viewport whose size is set explicitly, for hosts that push resize events
/// rather than answer size queries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedViewport {
    size: Size,
}

impl FixedViewport {
    /// Creates a viewport of the given width and height.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Updates the viewport size, typically from a window resize event.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

impl ViewportSize for FixedViewport {
    fn viewport_size(&self) -> Size {
        self.size
    }
}
