// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sensor configuration and its defaults.

use crate::compute::PartialVisibility;

/// Default polling interval in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// How a sensor learns that it should re-check visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Re-check on a repeating interval driven by
    /// [`VisibilitySensor::tick`](crate::VisibilitySensor::tick).
    #[default]
    Polling,
    /// Re-check whenever the host forwards a notification from its own
    /// intersection observer through
    /// [`VisibilitySensor::notify_intersection_changed`](crate::VisibilitySensor::notify_intersection_changed).
    ///
    /// No timer is started in this mode.
    Observer,
}

/// Plain configuration for a [`VisibilitySensor`](crate::VisibilitySensor).
///
/// The containment element, callback and child are held by the sensor itself;
/// everything here is `Copy` so hosts can diff and re-apply it cheaply via
/// [`VisibilitySensor::update`](crate::VisibilitySensor::update).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorConfig {
    /// Whether the sensor watches while mounted.
    pub active: bool,
    /// Full versus partial visibility semantics.
    pub partial_visibility: PartialVisibility,
    /// Polling interval in milliseconds.
    pub delay: u64,
    /// Suppress the immediate check that otherwise runs when watching starts.
    pub delayed_call: bool,
    /// Minimum depth in pixels the element's top edge must reach above the
    /// containment's bottom edge for partial visibility to count. Zero
    /// disables the requirement.
    pub min_top_value: f64,
    /// Polling or host-observer driven checks.
    pub strategy: Strategy,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            active: true,
            partial_visibility: PartialVisibility::Off,
            delay: DEFAULT_DELAY_MS,
            delayed_call: false,
            min_top_value: 0.0,
            strategy: Strategy::Polling,
        }
    }
}
