//! The inertial scrolling state machine.

use std::time::Duration;

use tracing::{debug, trace};

use crate::smoother::options::{Derived, Options};
use crate::smoother::quantizer::Quantizer;
use crate::smoother::speed::SpeedEstimator;
use crate::smoother::time::EventTime;

/// One synthesized high-resolution wheel increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelIncrement {
    /// Timestamp the increment is attributed to.
    pub time: EventTime,
    /// Direction-signed magnitude in high-resolution wheel units.
    pub value: i32,
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Turns discrete wheel notches into a damped stream of high-resolution
/// increments.
///
/// The smoother is driven by a single host loop: wheel notches go to
/// [`handle_event`](Self::handle_event), pointer motion to
/// [`handle_rel_x`](Self::handle_rel_x) /
/// [`handle_rel_y`](Self::handle_rel_y), key presses to
/// [`stop`](Self::stop), and [`tick`](Self::tick) fires whenever the
/// deadline from [`timeout`](Self::timeout) expires. It never blocks,
/// never fails, and owns all of its state.
///
/// An animation carries a per-tick floating delta that decays under
/// bounded exponential damping. Reverse notches brake it; a brake that
/// stops the animation opens a dejitter window during which further
/// brake-direction notches are absorbed and later relaunch the reverse
/// animation at the estimated gesture speed.
pub struct WheelSmoother {
    options: Options,
    derived: Derived,
    estimator: SpeedEstimator,
    quantizer: Quantizer,

    delta: f64,
    positive: bool,
    total_delta: i64,
    braking_times: u32,
    free_spin: bool,

    last_event_time: EventTime,
    next_tick_time: EventTime,
    last_brake_stop_time: EventTime,

    last_mouse_movement_time: EventTime,
    mouse_movement_dejitter: bool,
    mouse_movement_x: i32,
    mouse_movement_y: i32,
}

impl WheelSmoother {
    /// Create a smoother with the given tunables.
    pub fn new(options: Options) -> Self {
        let derived = Derived::new(&options);
        debug!(
            "tick interval {}s alpha {}",
            derived.tick_interval_s, derived.alpha
        );

        let estimator = SpeedEstimator::new(
            i64::from(options.speed_smooth_window_microseconds),
            options.speed_factor,
        );

        WheelSmoother {
            options,
            derived,
            estimator,
            quantizer: Quantizer::default(),
            delta: 0.0,
            positive: false,
            total_delta: 0,
            braking_times: 0,
            free_spin: false,
            last_event_time: EventTime::ZERO,
            next_tick_time: EventTime::ZERO,
            last_brake_stop_time: EventTime::ZERO,
            last_mouse_movement_time: EventTime::ZERO,
            mouse_movement_dejitter: true,
            mouse_movement_x: 0,
            mouse_movement_y: 0,
        }
    }

    /// Whether no animation is in flight.
    pub fn is_idle(&self) -> bool {
        self.delta == 0.0
    }

    /// Consecutive brake-direction notches absorbed since the last brake
    /// stop. Zero outside the braking-dejitter window.
    pub fn braking_times(&self) -> u32 {
        self.braking_times
    }

    /// Unconditionally end any animation. Key presses land here.
    pub fn stop(&mut self) {
        if self.delta != 0.0 {
            debug!("click stop");
            self.delta = 0.0;
        }
    }

    /// Enable or disable free spin (damping suspension).
    ///
    /// The mode only takes hold while an animation is in flight or free
    /// spin is already engaged; returns whether it applied.
    pub fn set_free_spin(&mut self, enabled: bool) -> bool {
        if self.free_spin || self.delta != 0.0 {
            self.free_spin = enabled;
            return true;
        }
        false
    }

    /// Feed one physical wheel notch.
    ///
    /// Returns the seed increment when the notch starts (or restarts) an
    /// animation; notches that merely retarget or brake one return
    /// nothing.
    pub fn handle_event(&mut self, time: EventTime, positive: bool) -> Option<WheelIncrement> {
        // A wheel notch always re-arms the motion dejitter.
        self.mouse_movement_dejitter = true;
        self.mouse_movement_x = 0;
        self.mouse_movement_y = 0;

        if self.options.use_braking {
            if positive == self.positive {
                self.braking_times = 0;
            } else {
                if self.delta != 0.0 {
                    self.delta -= self.derived.delta_decrease_per_braking;

                    if self.delta < self.derived.braking_cut_off_delta {
                        debug!("braking stop");
                        self.estimator.clear();
                        self.last_event_time = time;
                        self.last_brake_stop_time = time;
                        self.delta = 0.0;
                        self.braking_times = 1;
                    } else {
                        debug!(
                            "braking: speed {:.2}",
                            self.delta / self.derived.tick_interval_s
                        );
                    }

                    return None;
                }

                if self.braking_times > 0 {
                    let in_window = time.micros_since(self.last_brake_stop_time)
                        < i64::from(self.options.braking_dejitter_microseconds);
                    if in_window && self.braking_times < self.options.max_braking_times {
                        debug!("braking dejitter ({})", self.braking_times);
                        self.estimator
                            .record(time.micros_since(self.last_event_time).max(0));
                        self.last_event_time = time;
                        self.braking_times += 1;
                        return None;
                    }

                    // The burst is over: relaunch in the reverse direction
                    // at the speed the suppressed notches add up to.
                    let interval = time.micros_since(self.last_event_time).max(0);
                    let speed = self.estimator.estimate(interval);

                    self.last_event_time = time;
                    self.next_tick_time = self.schedule_after(time);
                    self.positive = positive;
                    self.delta = (speed * self.derived.tick_interval_s).clamp(
                        self.derived.initial_delta,
                        self.derived.initial_delta
                            + f64::from(self.braking_times) * self.derived.max_delta_increase,
                    );
                    self.braking_times = 0;

                    debug!(
                        "relaunch after braking: speed {:.2}",
                        self.delta / self.derived.tick_interval_s
                    );
                    return Some(self.emit_seed(time));
                }
            }
        }

        if self.delta == 0.0 || positive != self.positive {
            self.estimator.clear();
            self.last_event_time = time;
            self.next_tick_time = self.schedule_after(time);
            self.positive = positive;
            self.delta = self.derived.initial_delta;

            debug!(
                "initial speed {:.2}",
                self.delta / self.derived.tick_interval_s
            );
            return Some(self.emit_seed(time));
        }

        // Same-direction notch while animating: retarget the speed, keep
        // the tick schedule.
        let interval = time.micros_since(self.last_event_time).max(0);
        let speed = self.estimator.estimate(interval);
        let candidate = (speed * self.derived.tick_interval_s).clamp(
            self.delta - self.derived.max_delta_decrease,
            self.delta + self.derived.max_delta_increase,
        );

        self.last_event_time = time;
        self.positive = positive;
        self.delta = candidate.max(self.derived.initial_delta);

        debug!(
            "set speed: actual {:.2} target {:.2}",
            self.delta / self.derived.tick_interval_s,
            speed
        );
        None
    }

    /// Advance the animation by one tick.
    ///
    /// Applies one damping step (unless free-spinning), then quantizes the
    /// delta. Returns nothing while idle, when damping stops the
    /// animation, or when the quantized magnitude rounds to zero.
    pub fn tick(&mut self) -> Option<WheelIncrement> {
        if self.delta == 0.0 {
            return None;
        }

        if !self.free_spin {
            let max_delta = self.delta - self.derived.min_delta_decrease_per_tick;
            let min_delta = self.delta - self.derived.max_delta_decrease_per_tick;
            self.delta = (self.delta * self.derived.alpha).clamp(min_delta, max_delta);

            if self.delta < self.derived.min_delta {
                debug!("damping stop, total {}", self.total_delta);
                self.delta = 0.0;
                return None;
            }

            trace!("tick speed {:.2}", self.delta / self.derived.tick_interval_s);
        }

        let current = self.next_tick_time;
        self.next_tick_time = self.schedule_after(current);

        let rounded = self.quantizer.step(self.delta);
        if rounded == 0 {
            return None;
        }
        self.total_delta += i64::from(rounded);

        Some(WheelIncrement {
            time: current,
            value: self.signed(rounded),
        })
    }

    /// How long the host may wait before the next tick is due, measured
    /// from `now`. Nothing while idle; zero when the tick is overdue.
    pub fn timeout(&self, now: EventTime) -> Option<Duration> {
        if self.delta == 0.0 {
            return None;
        }
        Some(self.next_tick_time.saturating_duration_since(now))
    }

    /// The scheduled time of the next tick, while an animation is active.
    ///
    /// Hosts use this to run an overdue tick as soon as an inbound report
    /// shows the deadline has already passed.
    pub fn next_tick_time(&self) -> Option<EventTime> {
        if self.delta == 0.0 {
            return None;
        }
        Some(self.next_tick_time)
    }

    /// Feed horizontal pointer motion.
    pub fn handle_rel_x(&mut self, time: EventTime, value: i32) {
        self.handle_motion(time, value, Axis::X);
    }

    /// Feed vertical pointer motion.
    pub fn handle_rel_y(&mut self, time: EventTime, value: i32) {
        self.handle_motion(time, value, Axis::Y);
    }

    fn handle_motion(&mut self, time: EventTime, value: i32, axis: Axis) {
        if self.delta == 0.0 || !self.options.use_mouse_movement_braking {
            return;
        }

        let gap = time.micros_since(self.last_mouse_movement_time)
            > i64::from(self.options.max_mouse_movement_event_interval_microseconds);
        if gap {
            self.last_mouse_movement_time = time;
            trace!("mouse movement gap, enable dejitter");
            self.mouse_movement_dejitter = true;
            match axis {
                Axis::X => {
                    self.mouse_movement_x = value;
                    self.mouse_movement_y = 0;
                }
                Axis::Y => {
                    self.mouse_movement_x = 0;
                    self.mouse_movement_y = value;
                }
            }
            return;
        }

        self.last_mouse_movement_time = time;

        let mut value = value;
        if self.mouse_movement_dejitter {
            let accumulated = match axis {
                Axis::X => {
                    self.mouse_movement_x += value;
                    self.mouse_movement_x
                }
                Axis::Y => {
                    self.mouse_movement_y += value;
                    self.mouse_movement_y
                }
            };
            trace!("mouse movement accumulated {}", accumulated);

            let distance = self.options.mouse_movement_dejitter_distance;
            if accumulated > distance {
                self.mouse_movement_dejitter = false;
                value = accumulated - distance;
            } else if accumulated < -distance {
                self.mouse_movement_dejitter = false;
                value = accumulated + distance;
            } else {
                return;
            }
        }

        self.delta -= self.derived.delta_decrease_per_mouse_movement * f64::from(value.abs());

        if self.delta < self.derived.mouse_movement_braking_cut_off_delta {
            debug!("mouse movement braking stop");
            self.delta = 0.0;
        } else {
            trace!(
                "mouse movement braking: speed {:.2}",
                self.delta / self.derived.tick_interval_s
            );
        }
    }

    fn schedule_after(&self, time: EventTime) -> EventTime {
        time.add_micros(i64::from(self.options.tick_interval_microseconds))
    }

    fn emit_seed(&mut self, time: EventTime) -> WheelIncrement {
        let rounded = self.quantizer.seed(self.delta);
        self.total_delta = i64::from(rounded);
        WheelIncrement {
            time,
            value: self.signed(rounded),
        }
    }

    fn signed(&self, magnitude: i32) -> i32 {
        if self.positive {
            magnitude
        } else {
            -magnitude
        }
    }
}
