// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility geometry: compare an element rectangle against its containment.
//!
//! Rectangles are Kurbo [`Rect`]s in viewport coordinates where `x0` is the
//! left edge, `y0` the top, `x1` the right and `y1` the bottom. They are used
//! as given; callers that may produce inverted rectangles should
//! [`Rect::abs`] them first.

use kurbo::Rect;

use crate::edges::{Edge, VisibilityRect};

/// Which visibility semantics a check applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartialVisibility {
    /// The element counts as visible only when it is fully contained.
    #[default]
    Off,
    /// The element counts as visible when it overlaps the containment on both
    /// axes.
    Any,
    /// The element counts as visible when the named edge satisfies
    /// containment, regardless of the other edges.
    Edge(Edge),
}

impl PartialVisibility {
    /// Returns `true` for any mode other than [`PartialVisibility::Off`].
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl From<bool> for PartialVisibility {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Any } else { Self::Off }
    }
}

impl From<Edge> for PartialVisibility {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

/// The outcome of one visibility computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Whether the element counts as visible under the requested semantics.
    pub is_visible: bool,
    /// Per-edge containment flags.
    pub rect: VisibilityRect,
}

/// Computes the per-edge containment flags of `element` within `containment`.
#[must_use]
pub fn visibility_rect(element: Rect, containment: Rect) -> VisibilityRect {
    VisibilityRect {
        top: element.y0 >= containment.y0,
        left: element.x0 >= containment.x0,
        bottom: element.y1 <= containment.y1,
        right: element.x1 <= containment.x1,
    }
}

/// Computes whether `element` is visible within `containment`.
///
/// With [`PartialVisibility::Off`] the element must be fully contained. In the
/// partial modes a non-zero `min_top_value` additionally requires the
/// element's top edge to sit at least that many pixels above the
/// containment's bottom edge. A negative value lets the top edge sit that far
/// below it; `0.0` and NaN disable the test.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_visibility::{PartialVisibility, compute_visibility};
///
/// let container = Rect::new(0.0, 0.0, 100.0, 100.0);
/// // Straddles the bottom boundary.
/// let element = Rect::new(0.0, 50.0, 100.0, 150.0);
///
/// assert!(!compute_visibility(element, container, PartialVisibility::Off, 0.0).is_visible);
/// assert!(compute_visibility(element, container, PartialVisibility::Any, 0.0).is_visible);
/// assert!(!compute_visibility(element, container, PartialVisibility::Any, 60.0).is_visible);
/// ```
#[must_use]
pub fn compute_visibility(
    element: Rect,
    containment: Rect,
    partial: PartialVisibility,
    min_top_value: f64,
) -> Visibility {
    let rect = visibility_rect(element, containment);
    let full_visible = rect.is_full();

    let is_visible = match partial {
        PartialVisibility::Off => full_visible,
        PartialVisibility::Any | PartialVisibility::Edge(_) => {
            let partial_visible = match partial {
                PartialVisibility::Edge(edge) => rect.edge(edge),
                _ => overlaps_span(element.y0, element.y1, containment.y0, containment.y1)
                    && overlaps_span(element.x0, element.x1, containment.x0, containment.x1),
            };
            if min_top_value != 0.0 && !min_top_value.is_nan() {
                partial_visible && element.y0 <= containment.y1 - min_top_value
            } else {
                partial_visible
            }
        }
    };

    Visibility { is_visible, rect }
}

/// Returns `true` if `[start, end]` touches `[min, max]`: either endpoint lies
/// inside it, or the span covers it entirely.
fn overlaps_span(start: f64, end: f64, min: f64, max: f64) -> bool {
    (start >= min && start <= max) || (end >= min && end <= max) || (start <= min && end >= max)
}
