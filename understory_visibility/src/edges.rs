// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-edge containment results.

use core::fmt;

/// One side of an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The minimum-y side.
    Top,
    /// The maximum-x side.
    Right,
    /// The maximum-y side.
    Bottom,
    /// The minimum-x side.
    Left,
}

impl Edge {
    /// All four edges, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns the lowercase name of the edge (`"top"`, `"right"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Parses an edge from its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|edge| edge.name() == name)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which edges of an element lie inside its containment.
///
/// Each flag answers "does this edge of the element satisfy containment on
/// that side?":
///
/// - `top`: `element.top >= containment.top`
/// - `left`: `element.left >= containment.left`
/// - `bottom`: `element.bottom <= containment.bottom`
/// - `right`: `element.right <= containment.right`
///
/// The default value (all `false`) is what a sensor reports before its first
/// check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibilityRect {
    /// The element's top edge is at or below the containment's top edge.
    pub top: bool,
    /// The element's left edge is at or right of the containment's left edge.
    pub left: bool,
    /// The element's bottom edge is at or above the containment's bottom edge.
    pub bottom: bool,
    /// The element's right edge is at or left of the containment's right edge.
    pub right: bool,
}

impl VisibilityRect {
    /// Returns the flag for a single edge.
    #[must_use]
    pub const fn edge(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Returns `true` when every edge satisfies containment.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.top && self.left && self.bottom && self.right
    }
}
