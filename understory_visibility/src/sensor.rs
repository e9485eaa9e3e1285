// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility sensor component: lifecycle, watching and change notification.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Rect;

use crate::compute::{PartialVisibility, compute_visibility};
use crate::config::{SensorConfig, Strategy};
use crate::edges::VisibilityRect;
use crate::host::{ElementBinding, ViewportSize};
use crate::logging::{debug, trace};
use crate::timer::IntervalTimer;

/// Callback invoked with `(is_visible, visibility_rect)` on every visibility
/// transition.
pub type ChangeCallback = Box<dyn FnMut(bool, VisibilityRect)>;

/// Error returned when a sensor is constructed or reconfigured with missing or
/// malformed inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorError {
    /// No change callback was supplied.
    MissingOnChange,
    /// The sensor needs exactly one child; `found` were supplied.
    ChildCount {
        /// Number of children supplied.
        found: usize,
    },
    /// Neither a containment element nor a viewport provider is available, so
    /// there is nothing to measure against.
    MissingViewport,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOnChange => {
                f.write_str("visibility sensor requires an on_change callback")
            }
            Self::ChildCount { found } => {
                write!(f, "visibility sensor expects exactly one child, found {found}")
            }
            Self::MissingViewport => f.write_str(
                "visibility sensor requires a viewport provider when no containment is set",
            ),
        }
    }
}

impl core::error::Error for SensorError {}

/// Where a sensor is in its mount/watch lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Not mounted; no checks run.
    Unmounted,
    /// Mounted and watching: checks run on ticks or observer notifications.
    Watching,
    /// Mounted but inactive.
    Idle,
}

/// Last computed visibility, as reported to the change callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorState {
    /// `None` until the first successful check.
    pub is_visible: Option<bool>,
    /// Edge flags from the check that last changed `is_visible`.
    pub visibility_rect: VisibilityRect,
}

/// Snapshot of a sensor's internal state, for inspectors and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorDebugInfo {
    /// Current lifecycle state.
    pub lifecycle: Lifecycle,
    /// Strategy from the current configuration.
    pub strategy: Strategy,
    /// Partial visibility mode from the current configuration.
    pub partial_visibility: PartialVisibility,
    /// Stored visibility state.
    pub state: SensorState,
    /// When the polling timer next fires, if running.
    pub next_tick_at: Option<u64>,
    /// Checks that resolved geometry and computed a result.
    pub checks_run: u64,
    /// Checks skipped because the element or containment was unresolvable.
    pub checks_skipped: u64,
    /// Number of times the change callback was invoked.
    pub notifications: u64,
}

/// Reports whether a watched element is visible within its containment.
///
/// The sensor is headless: the host supplies the watched node's geometry via
/// an [`ElementBinding`], the default containment via a [`ViewportSize`], and
/// drives time by calling [`mount`](Self::mount), [`tick`](Self::tick) and
/// [`update`](Self::update) with millisecond timestamps.
///
/// `C` is the child value the sensor passes through on [`render`](Self::render);
/// it defaults to `()`, the empty element.
pub struct VisibilitySensor<E, C = ()> {
    config: SensorConfig,
    element: E,
    containment: Option<Box<dyn ElementBinding>>,
    viewport: Option<Box<dyn ViewportSize>>,
    on_change: ChangeCallback,
    child: C,
    state: SensorState,
    mounted: bool,
    timer: IntervalTimer,
    observing: bool,
    checks_run: u64,
    checks_skipped: u64,
    notifications: u64,
}

impl<E: ElementBinding> VisibilitySensor<E> {
    /// Starts building a sensor that watches `element`.
    #[must_use]
    pub fn builder(element: E) -> SensorBuilder<E> {
        SensorBuilder::new(element)
    }
}

impl<E: ElementBinding, C> VisibilitySensor<E, C> {
    /// Mounts the sensor, starting to watch if the configuration is active.
    ///
    /// Mounting resets the stored state, so the first check after a mount
    /// always notifies. Mounting an already mounted sensor has no effect.
    pub fn mount(&mut self, now: u64) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.state = SensorState::default();
        debug!(active = self.config.active, "visibility sensor mounted");
        if self.config.active {
            self.start_watching(now);
        }
    }

    /// Unmounts the sensor and cancels any pending timer.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.stop_watching();
        self.mounted = false;
        debug!("visibility sensor unmounted");
    }

    /// Applies a new configuration.
    ///
    /// On a mounted sensor, turning `active` on resets the stored state and
    /// starts watching; turning it off stops watching. Other fields are stored
    /// and take effect the next time watching starts; a running timer keeps
    /// its period.
    pub fn update(&mut self, config: SensorConfig, now: u64) {
        let was_active = self.config.active;
        self.config = config;
        if !self.mounted {
            return;
        }
        if config.active && !was_active {
            debug!("visibility sensor activated");
            self.state = SensorState::default();
            self.start_watching(now);
        } else if !config.active && was_active {
            debug!("visibility sensor deactivated");
            self.stop_watching();
        }
    }

    /// Shorthand for [`update`](Self::update) changing only `active`.
    pub fn set_active(&mut self, active: bool, now: u64) {
        let config = SensorConfig {
            active,
            ..self.config
        };
        self.update(config, now);
    }

    /// Starts watching. Has no effect when already watching or not mounted.
    ///
    /// With [`Strategy::Polling`] this starts a repeating timer at the
    /// configured delay; with [`Strategy::Observer`] the sensor waits for
    /// [`notify_intersection_changed`](Self::notify_intersection_changed).
    /// Unless `delayed_call` is set, one check runs immediately.
    pub fn start_watching(&mut self, now: u64) {
        if !self.mounted || self.is_watching() {
            return;
        }
        match self.config.strategy {
            Strategy::Polling => self.timer.start(now, self.config.delay),
            Strategy::Observer => self.observing = true,
        }
        debug!(
            strategy = ?self.config.strategy,
            delay = self.config.delay,
            delayed_call = self.config.delayed_call,
            "visibility sensor watching"
        );
        if !self.config.delayed_call {
            self.check();
        }
    }

    /// Stops watching. Safe to call when not watching.
    pub fn stop_watching(&mut self) {
        self.timer.stop();
        self.observing = false;
    }

    /// Host event-loop hook: runs a check if the polling timer is due at `now`.
    ///
    /// Returns `true` if a tick fired.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.check();
        true
    }

    /// Host observer hook: runs a check when watching with
    /// [`Strategy::Observer`].
    ///
    /// Returns `true` if a check ran.
    pub fn notify_intersection_changed(&mut self) -> bool {
        if !self.observing {
            return false;
        }
        self.check();
        true
    }

    /// Measures the element and notifies the change callback if visibility
    /// changed since the last check.
    ///
    /// If the element or the containment cannot be resolved, the cycle is
    /// skipped and the stored state is returned unchanged.
    pub fn check(&mut self) -> SensorState {
        let Some(element) = self.element.bounding_rect() else {
            self.checks_skipped += 1;
            trace!("visibility check skipped: element unresolved");
            return self.state;
        };
        let Some(containment) = self.containment_rect() else {
            self.checks_skipped += 1;
            trace!("visibility check skipped: containment unresolved");
            return self.state;
        };
        self.checks_run += 1;

        let visibility = compute_visibility(
            element,
            containment,
            self.config.partial_visibility,
            self.config.min_top_value,
        );
        if self.state.is_visible != Some(visibility.is_visible) {
            self.state = SensorState {
                is_visible: Some(visibility.is_visible),
                visibility_rect: visibility.rect,
            };
            self.notifications += 1;
            debug!(
                is_visible = visibility.is_visible,
                top = visibility.rect.top,
                left = visibility.rect.left,
                bottom = visibility.rect.bottom,
                right = visibility.rect.right,
                "visibility changed"
            );
            (self.on_change)(visibility.is_visible, visibility.rect);
        }
        self.state
    }

    fn containment_rect(&self) -> Option<Rect> {
        match (&self.containment, &self.viewport) {
            (Some(containment), _) => containment.bounding_rect(),
            (None, Some(viewport)) => Some(viewport.viewport_rect()),
            (None, None) => None,
        }
    }

    /// Returns the child unchanged.
    #[must_use]
    pub fn render(&self) -> &C {
        &self.child
    }

    /// Replaces the child.
    pub fn set_child(&mut self, child: C) {
        self.child = child;
    }

    /// Returns the watched element binding.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns the watched element binding mutably, for hosts that push
    /// geometry into it.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Measures against `containment` instead of the viewport.
    pub fn set_containment(&mut self, containment: impl ElementBinding + 'static) {
        self.containment = Some(Box::new(containment));
    }

    /// Measures against the viewport again.
    ///
    /// Fails with [`SensorError::MissingViewport`] if the sensor was built
    /// without a viewport provider; the containment is kept in that case.
    pub fn clear_containment(&mut self) -> Result<(), SensorError> {
        if self.viewport.is_none() {
            return Err(SensorError::MissingViewport);
        }
        self.containment = None;
        Ok(())
    }

    /// Replaces the viewport provider.
    pub fn set_viewport(&mut self, viewport: impl ViewportSize + 'static) {
        self.viewport = Some(Box::new(viewport));
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, on_change: impl FnMut(bool, VisibilityRect) + 'static) {
        self.on_change = Box::new(on_change);
    }

    /// Returns the stored visibility state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Returns the stored visibility, `None` before the first check.
    #[must_use]
    pub fn is_visible(&self) -> Option<bool> {
        self.state.is_visible
    }

    /// Returns the stored edge flags.
    #[must_use]
    pub fn visibility_rect(&self) -> VisibilityRect {
        self.state.visibility_rect
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        if !self.mounted {
            Lifecycle::Unmounted
        } else if self.is_watching() {
            Lifecycle::Watching
        } else {
            Lifecycle::Idle
        }
    }

    /// Returns `true` while a timer or observer subscription is live.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.timer.is_active() || self.observing
    }

    /// Returns when the polling timer next fires, if running.
    ///
    /// Hosts can use this to schedule their next wake-up.
    #[must_use]
    pub fn next_tick_at(&self) -> Option<u64> {
        self.timer.next_due()
    }

    /// Returns a snapshot of the sensor's internal state.
    #[must_use]
    pub fn debug_info(&self) -> SensorDebugInfo {
        SensorDebugInfo {
            lifecycle: self.lifecycle(),
            strategy: self.config.strategy,
            partial_visibility: self.config.partial_visibility,
            state: self.state,
            next_tick_at: self.timer.next_due(),
            checks_run: self.checks_run,
            checks_skipped: self.checks_skipped,
            notifications: self.notifications,
        }
    }
}

impl<E, C: fmt::Debug> fmt::Debug for VisibilitySensor<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilitySensor")
            .field("config", &self.config)
            .field("child", &self.child)
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .field("timer", &self.timer)
            .field("observing", &self.observing)
            .finish_non_exhaustive()
    }
}

/// Builder for [`VisibilitySensor`].
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use kurbo::Rect;
/// use understory_visibility::{FixedViewport, VisibilitySensor};
///
/// let seen = Rc::new(Cell::new(None));
/// let mut sensor = VisibilitySensor::builder(Rect::new(10.0, 10.0, 50.0, 50.0))
///     .viewport(FixedViewport::new(800.0, 600.0))
///     .delay(250)
///     .on_change({
///         let seen = Rc::clone(&seen);
///         move |visible, _rect| seen.set(Some(visible))
///     })
///     .build()
///     .unwrap();
///
/// sensor.mount(0);
/// assert_eq!(seen.get(), Some(true));
/// assert_eq!(sensor.next_tick_at(), Some(250));
/// ```
pub struct SensorBuilder<E, C = ()> {
    config: SensorConfig,
    element: E,
    containment: Option<Box<dyn ElementBinding>>,
    viewport: Option<Box<dyn ViewportSize>>,
    on_change: Option<ChangeCallback>,
    child: Result<C, usize>,
}

impl<E: ElementBinding> SensorBuilder<E> {
    fn new(element: E) -> Self {
        Self {
            config: SensorConfig::default(),
            element,
            containment: None,
            viewport: None,
            on_change: None,
            child: Ok(()),
        }
    }
}

impl<E: ElementBinding, C> SensorBuilder<E, C> {
    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: SensorConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether to watch while mounted. Defaults to `true`.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.config.active = active;
        self
    }

    /// Full or partial visibility semantics. Accepts a `bool` or an
    /// [`Edge`](crate::Edge). Defaults to [`PartialVisibility::Off`].
    #[must_use]
    pub fn partial_visibility(mut self, partial: impl Into<PartialVisibility>) -> Self {
        self.config.partial_visibility = partial.into();
        self
    }

    /// Polling interval in milliseconds. Defaults to 1000.
    #[must_use]
    pub fn delay(mut self, delay: u64) -> Self {
        self.config.delay = delay;
        self
    }

    /// Skip the immediate check when watching starts. Defaults to `false`.
    #[must_use]
    pub fn delayed_call(mut self, delayed_call: bool) -> Self {
        self.config.delayed_call = delayed_call;
        self
    }

    /// Minimum intrusion depth from the containment's bottom for partial
    /// visibility. Defaults to zero (disabled).
    #[must_use]
    pub fn min_top_value(mut self, min_top_value: f64) -> Self {
        self.config.min_top_value = min_top_value;
        self
    }

    /// Polling or host-observer driven checks. Defaults to polling.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Measure against this element instead of the viewport.
    #[must_use]
    pub fn containment(mut self, containment: impl ElementBinding + 'static) -> Self {
        self.containment = Some(Box::new(containment));
        self
    }

    /// Viewport size provider for the default containment.
    #[must_use]
    pub fn viewport(mut self, viewport: impl ViewportSize + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    /// Callback invoked on every visibility transition. Required.
    #[must_use]
    pub fn on_change(mut self, on_change: impl FnMut(bool, VisibilityRect) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Sets the single child passed through by [`VisibilitySensor::render`].
    #[must_use]
    pub fn child<C2>(self, child: C2) -> SensorBuilder<E, C2> {
        self.with_child(Ok(child))
    }

    /// Sets the child from a collection, which must hold exactly one item.
    ///
    /// Any other count makes [`build`](Self::build) fail with
    /// [`SensorError::ChildCount`].
    #[must_use]
    pub fn children<C2>(self, children: impl IntoIterator<Item = C2>) -> SensorBuilder<E, C2> {
        let mut iter = children.into_iter();
        let child = match (iter.next(), iter.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(0),
            (Some(_), Some(_)) => Err(2 + iter.count()),
        };
        self.with_child(child)
    }

    fn with_child<C2>(self, child: Result<C2, usize>) -> SensorBuilder<E, C2> {
        SensorBuilder {
            config: self.config,
            element: self.element,
            containment: self.containment,
            viewport: self.viewport,
            on_change: self.on_change,
            child,
        }
    }

    /// Validates the inputs and builds an unmounted sensor.
    pub fn build(self) -> Result<VisibilitySensor<E, C>, SensorError> {
        let child = self
            .child
            .map_err(|found| SensorError::ChildCount { found })?;
        let on_change = self.on_change.ok_or(SensorError::MissingOnChange)?;
        if self.containment.is_none() && self.viewport.is_none() {
            return Err(SensorError::MissingViewport);
        }
        Ok(VisibilitySensor {
            config: self.config,
            element: self.element,
            containment: self.containment,
            viewport: self.viewport,
            on_change,
            child,
            state: SensorState::default(),
            mounted: false,
            timer: IntervalTimer::new(),
            observing: false,
            checks_run: 0,
            checks_skipped: 0,
            notifications: 0,
        })
    }
}

impl<E, C: fmt::Debug> fmt::Debug for SensorBuilder<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorBuilder")
            .field("config", &self.config)
            .field("child", &self.child)
            .field("has_containment", &self.containment.is_some())
            .field("has_viewport", &self.viewport.is_some())
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use kurbo::Size;

    use super::*;
    use crate::edges::Edge;
    use crate::host::FixedViewport;

    type Log = Rc<RefCell<Vec<(bool, VisibilityRect)>>>;
    type Slot = Rc<Cell<Option<Rect>>>;

    const INSIDE: Rect = Rect::new(10.0, 10.0, 90.0, 90.0);
    const OUTSIDE: Rect = Rect::new(10.0, 200.0, 90.0, 280.0);

    fn sensor(
        initial: Option<Rect>,
        config: SensorConfig,
    ) -> (VisibilitySensor<impl ElementBinding>, Slot, Log) {
        let slot: Slot = Rc::new(Cell::new(initial));
        let log: Log = Rc::default();
        let sensor = VisibilitySensor::builder({
            let slot = Rc::clone(&slot);
            move || slot.get()
        })
        .config(config)
        .viewport(FixedViewport::new(100.0, 100.0))
        .on_change({
            let log = Rc::clone(&log);
            move |visible, rect| log.borrow_mut().push((visible, rect))
        })
        .build()
        .unwrap();
        (sensor, slot, log)
    }

    fn visibilities(log: &Log) -> Vec<bool> {
        log.borrow().iter().map(|(v, _)| *v).collect()
    }

    #[test]
    fn mount_checks_immediately() {
        let (mut s, _, log) = sensor(Some(INSIDE), SensorConfig::default());
        assert_eq!(s.lifecycle(), Lifecycle::Unmounted);
        assert_eq!(s.is_visible(), None);

        s.mount(0);
        assert_eq!(s.lifecycle(), Lifecycle::Watching);
        assert_eq!(visibilities(&log), [true]);
        assert_eq!(s.is_visible(), Some(true));
        assert!(s.visibility_rect().is_full());
        assert_eq!(s.next_tick_at(), Some(1000));
    }

    #[test]
    fn delayed_call_waits_for_first_tick() {
        let config = SensorConfig {
            delayed_call: true,
            delay: 100,
            ..SensorConfig::default()
        };
        let (mut s, _, log) = sensor(Some(INSIDE), config);
        s.mount(0);
        assert!(log.borrow().is_empty());
        assert!(!s.tick(99));
        assert!(log.borrow().is_empty());
        assert!(s.tick(100));
        assert_eq!(visibilities(&log), [true]);
    }

    #[test]
    fn notifies_only_on_transitions() {
        let config = SensorConfig {
            delay: 10,
            ..SensorConfig::default()
        };
        let (mut s, slot, log) = sensor(Some(INSIDE), config);
        s.mount(0);
        assert!(s.tick(10));
        assert!(s.tick(20));
        slot.set(Some(OUTSIDE));
        assert!(s.tick(30));
        assert!(s.tick(40));
        slot.set(Some(INSIDE));
        assert!(s.tick(50));
        assert_eq!(visibilities(&log), [true, false, true]);
        assert_eq!(s.debug_info().checks_run, 6);
        assert_eq!(s.debug_info().notifications, 3);
    }

    #[test]
    fn unresolved_element_skips_cycle() {
        let (mut s, slot, log) = sensor(None, SensorConfig::default());
        s.mount(0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.is_visible(), None);
        assert_eq!(s.debug_info().checks_skipped, 1);

        slot.set(Some(OUTSIDE));
        assert!(s.tick(1000));
        assert_eq!(visibilities(&log), [false]);

        // Element disappears again: state is kept and nothing fires.
        slot.set(None);
        assert!(s.tick(2000));
        assert_eq!(s.is_visible(), Some(false));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn deactivate_stops_and_reactivate_resets() {
        let (mut s, _, log) = sensor(Some(INSIDE), SensorConfig::default());
        s.mount(0);
        assert_eq!(visibilities(&log), [true]);

        s.set_active(false, 10);
        assert_eq!(s.lifecycle(), Lifecycle::Idle);
        assert_eq!(s.next_tick_at(), None);
        assert!(!s.tick(5_000));
        // State survives deactivation.
        assert_eq!(s.is_visible(), Some(true));

        s.set_active(true, 6_000);
        assert_eq!(s.lifecycle(), Lifecycle::Watching);
        // Reset to unknown, so the same visibility is reported again.
        assert_eq!(visibilities(&log), [true, true]);
        assert_eq!(s.next_tick_at(), Some(7_000));
    }

    #[test]
    fn unmount_cancels_timer() {
        let (mut s, slot, log) = sensor(Some(INSIDE), SensorConfig::default());
        s.mount(0);
        s.unmount();
        assert_eq!(s.lifecycle(), Lifecycle::Unmounted);
        slot.set(Some(OUTSIDE));
        assert!(!s.tick(1_000));
        assert!(!s.tick(10_000));
        assert_eq!(log.borrow().len(), 1);
        s.unmount();
    }

    #[test]
    fn inactive_mount_is_idle() {
        let config = SensorConfig {
            active: false,
            ..SensorConfig::default()
        };
        let (mut s, _, log) = sensor(Some(INSIDE), config);
        s.mount(0);
        assert_eq!(s.lifecycle(), Lifecycle::Idle);
        assert!(log.borrow().is_empty());
        assert!(!s.tick(1_000));

        s.set_active(true, 1_500);
        assert_eq!(visibilities(&log), [true]);
    }

    #[test]
    fn update_before_mount_only_stores_config() {
        let (mut s, _, log) = sensor(Some(INSIDE), SensorConfig::default());
        s.set_active(false, 0);
        s.set_active(true, 0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.lifecycle(), Lifecycle::Unmounted);
    }

    #[test]
    fn start_watching_is_idempotent() {
        let config = SensorConfig {
            delay: 100,
            ..SensorConfig::default()
        };
        let (mut s, _, log) = sensor(Some(INSIDE), config);
        s.mount(0);
        s.start_watching(50);
        assert_eq!(s.next_tick_at(), Some(100));
        assert_eq!(s.debug_info().checks_run, 1);
        assert_eq!(log.borrow().len(), 1);

        s.stop_watching();
        s.stop_watching();
        assert_eq!(s.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn delay_change_applies_on_next_start() {
        let (mut s, _, _) = sensor(Some(INSIDE), SensorConfig::default());
        s.mount(0);
        let config = SensorConfig {
            delay: 50,
            ..*s.config()
        };
        s.update(config, 10);
        assert_eq!(s.next_tick_at(), Some(1000));

        s.set_active(false, 20);
        s.set_active(true, 30);
        assert_eq!(s.next_tick_at(), Some(80));
    }

    #[test]
    fn observer_strategy_checks_on_notification() {
        let config = SensorConfig {
            strategy: Strategy::Observer,
            ..SensorConfig::default()
        };
        let (mut s, slot, log) = sensor(Some(INSIDE), config);
        assert!(!s.notify_intersection_changed());

        s.mount(0);
        assert_eq!(s.lifecycle(), Lifecycle::Watching);
        assert_eq!(s.next_tick_at(), None);
        assert!(!s.tick(10_000));

        slot.set(Some(OUTSIDE));
        assert!(s.notify_intersection_changed());
        assert_eq!(visibilities(&log), [true, false]);

        s.set_active(false, 0);
        assert!(!s.notify_intersection_changed());
    }

    #[test]
    fn containment_element_replaces_viewport() {
        let (mut s, _, log) = sensor(
            Some(Rect::new(200.0, 200.0, 300.0, 300.0)),
            SensorConfig::default(),
        );
        s.set_containment(Rect::new(0.0, 0.0, 500.0, 500.0));
        s.mount(0);
        assert_eq!(visibilities(&log), [true]);

        s.clear_containment().unwrap();
        assert!(s.tick(1000));
        assert_eq!(visibilities(&log), [true, false]);
    }

    #[test]
    fn unresolved_containment_skips_cycle() {
        let (mut s, _, log) = sensor(Some(INSIDE), SensorConfig::default());
        s.set_containment(None::<Rect>);
        s.mount(0);
        assert!(log.borrow().is_empty());
        assert_eq!(s.debug_info().checks_skipped, 1);
    }

    #[test]
    fn viewport_size_is_read_each_check() {
        let height = Rc::new(Cell::new(50.0));
        let mut s = VisibilitySensor::builder(INSIDE)
            .viewport({
                let height = Rc::clone(&height);
                move || Size::new(100.0, height.get())
            })
            .on_change(|_, _| {})
            .build()
            .unwrap();
        s.mount(0);
        assert_eq!(s.is_visible(), Some(false));
        height.set(100.0);
        s.tick(1000);
        assert_eq!(s.is_visible(), Some(true));
    }

    #[test]
    fn partial_edge_configuration() {
        let config = SensorConfig {
            partial_visibility: PartialVisibility::Edge(Edge::Left),
            ..SensorConfig::default()
        };
        let (mut s, _, log) = sensor(Some(Rect::new(10.0, -20.0, 200.0, 300.0)), config);
        s.mount(0);
        let (visible, rect) = log.borrow()[0];
        assert!(visible);
        assert!(rect.left && !rect.top && !rect.bottom && !rect.right);
    }

    #[test]
    fn build_validates_inputs() {
        let missing_callback = VisibilitySensor::builder(INSIDE)
            .viewport(FixedViewport::new(1.0, 1.0))
            .build();
        assert_eq!(missing_callback.err(), Some(SensorError::MissingOnChange));

        let missing_viewport = VisibilitySensor::builder(INSIDE).on_change(|_, _| {}).build();
        assert_eq!(missing_viewport.err(), Some(SensorError::MissingViewport));

        let no_children = VisibilitySensor::builder(INSIDE)
            .viewport(FixedViewport::new(1.0, 1.0))
            .on_change(|_, _| {})
            .children(Vec::<u8>::new())
            .build();
        assert_eq!(no_children.err(), Some(SensorError::ChildCount { found: 0 }));

        let many_children = VisibilitySensor::builder(INSIDE)
            .viewport(FixedViewport::new(1.0, 1.0))
            .on_change(|_, _| {})
            .children([1, 2, 3])
            .build();
        assert_eq!(many_children.err(), Some(SensorError::ChildCount { found: 3 }));
    }

    #[test]
    fn render_passes_child_through() {
        let s = VisibilitySensor::builder(INSIDE)
            .containment(INSIDE)
            .on_change(|_, _| {})
            .children(["only"])
            .build()
            .unwrap();
        assert_eq!(*s.render(), "only");

        let default_child = VisibilitySensor::builder(INSIDE)
            .containment(INSIDE)
            .on_change(|_, _| {})
            .build()
            .unwrap();
        let _: &() = default_child.render();
    }

    #[test]
    fn clear_containment_requires_viewport() {
        let mut s = VisibilitySensor::builder(INSIDE)
            .containment(INSIDE)
            .on_change(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(s.clear_containment(), Err(SensorError::MissingViewport));
        s.set_viewport(FixedViewport::new(10.0, 10.0));
        assert_eq!(s.clear_containment(), Ok(()));
    }

    #[test]
    fn error_messages() {
        use alloc::string::ToString;

        assert_eq!(
            SensorError::ChildCount { found: 2 }.to_string(),
            "visibility sensor expects exactly one child, found 2"
        );
        assert!(SensorError::MissingOnChange.to_string().contains("on_change"));
    }
}
