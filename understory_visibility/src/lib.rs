// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility --heading-base-level=0

//! Understory Visibility: a headless visibility sensor for UI elements.
//!
//! This crate answers one question on a schedule: is the watched element
//! visible, fully or partially, within its containment? When the answer
//! changes, it calls back.
//!
//! The pieces are:
//!
//! - [`compute_visibility`]: the pure geometry. Compares an element rectangle
//!   with a containment rectangle and yields a [`Visibility`] holding the
//!   overall answer plus per-edge [`VisibilityRect`] flags.
//! - [`VisibilitySensor`]: a small component with a mount/update/unmount
//!   lifecycle that runs the check on an [`IntervalTimer`] (or on host
//!   observer notifications, see [`Strategy`]) and invokes its change
//!   callback once per visibility transition.
//! - [`ElementBinding`] and [`ViewportSize`]: the host capabilities the
//!   sensor needs. Hosts provide "the current rectangle of the watched node"
//!   and "the size of the viewport"; nothing else about the render tree or
//!   windowing system is assumed.
//!
//! Time is supplied by the host as millisecond timestamps on any monotonic
//! clock. The sensor never sleeps or spawns; the host's event loop calls
//! [`VisibilitySensor::tick`] and can use [`VisibilitySensor::next_tick_at`]
//! to schedule its next wake-up.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_visibility::{FixedViewport, VisibilitySensor};
//!
//! // The host keeps the watched node's layout rect here.
//! let layout = Rc::new(Cell::new(Some(Rect::new(0.0, 700.0, 200.0, 760.0))));
//! let events = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut sensor = VisibilitySensor::builder({
//!     let layout = Rc::clone(&layout);
//!     move || layout.get()
//! })
//! .viewport(FixedViewport::new(1024.0, 600.0))
//! .partial_visibility(true)
//! .delay(100)
//! .on_change({
//!     let events = Rc::clone(&events);
//!     move |visible, _rect| events.borrow_mut().push(visible)
//! })
//! .build()
//! .unwrap();
//!
//! // Mounting checks immediately: the node is below the fold.
//! sensor.mount(0);
//! assert_eq!(*events.borrow(), [false]);
//!
//! // The user scrolls; the next tick picks it up.
//! layout.set(Some(Rect::new(0.0, 550.0, 200.0, 610.0)));
//! sensor.tick(100);
//! assert_eq!(*events.borrow(), [false, true]);
//! ```
//!
//! ## Visibility semantics
//!
//! Rectangles use Kurbo's convention in viewport coordinates: `x0`/`y0` are
//! the left/top edges and `x1`/`y1` the right/bottom edges.
//!
//! - [`PartialVisibility::Off`]: visible only when every edge is contained.
//! - [`PartialVisibility::Any`]: visible when the element overlaps the
//!   containment on both axes.
//! - [`PartialVisibility::Edge`]: visible when the named edge is contained.
//! - In the partial modes a non-zero `min_top_value` also requires the
//!   element's top to be at least that many pixels above the containment's
//!   bottom.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//! - `tracing`: emit lifecycle and visibility-change events via `tracing`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
mod config;
mod edges;
mod host;
mod logging;
mod sensor;
mod timer;

pub use compute::{PartialVisibility, Visibility, compute_visibility, visibility_rect};
pub use config::{DEFAULT_DELAY_MS, SensorConfig, Strategy};
pub use edges::{Edge, VisibilityRect};
pub use host::{ElementBinding, FixedViewport, ViewportSize};
pub use sensor::{
    ChangeCallback, Lifecycle, SensorBuilder, SensorDebugInfo, SensorError, SensorState,
    VisibilitySensor,
};
pub use timer::IntervalTimer;
