//! Smoother tunables and their per-tick derivations.

use serde::{Deserialize, Serialize};

/// Tunables for the wheel smoother.
///
/// Speeds are in high-resolution wheel units per second (consumers treat
/// 120 units as one physical notch); durations are microseconds. Every
/// field has a usable default, so a configuration file only needs to name
/// the ones it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Emission cadence; also the base time step for all derived values.
    pub tick_interval_microseconds: u32,

    /// The animation stops once its speed decays below this.
    pub min_speed: f64,

    /// Lower bound on damping-induced deceleration, units/s².
    pub min_deceleration: f64,

    /// Upper bound on damping-induced deceleration, units/s².
    pub max_deceleration: f64,

    /// Seed speed for a fresh gesture; also the floor while accelerating.
    pub initial_speed: f64,

    /// Multiplier inside the speed estimator.
    pub speed_factor: f64,

    /// Width of the sliding window the speed estimate is taken over.
    pub speed_smooth_window_microseconds: u32,

    /// Acceleration cap per wheel notch.
    pub max_speed_increase_per_wheel_event: f64,

    /// Deceleration cap per wheel notch (0 forbids slowing down from
    /// same-direction notches).
    pub max_speed_decrease_per_wheel_event: f64,

    /// Exponential damping rate, 1/s.
    pub damping: f64,

    /// Handle opposite-direction notches as brakes.
    pub use_braking: bool,

    /// Window after a brake stop within which further brake-direction
    /// notches are suppressed instead of starting a reverse animation.
    pub braking_dejitter_microseconds: u32,

    /// Maximum number of consecutive suppressed brake notches.
    pub max_braking_times: u32,

    /// An opposite-direction notch that drags the speed below this stops
    /// the animation outright.
    pub braking_cut_off_speed: f64,

    /// Speed removed per opposite-direction notch. Infinite means any
    /// brake notch stops the animation instantly.
    pub speed_decrease_per_braking: f64,

    /// Brake the animation on pointer motion.
    pub use_mouse_movement_braking: bool,

    /// Accumulated motion below this magnitude is ignored as drift.
    pub mouse_movement_dejitter_distance: i32,

    /// A gap between motion events longer than this re-arms the motion
    /// dejitter.
    pub max_mouse_movement_event_interval_microseconds: u32,

    /// Motion braking that drags the speed below this snaps to idle.
    pub mouse_movement_braking_cut_off_speed: f64,

    /// Speed removed per unit of pointer motion. Infinite means any
    /// motion past the dejitter distance stops the animation.
    pub speed_decrease_per_mouse_movement: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tick_interval_microseconds: 2000,
            min_speed: 0.0,
            min_deceleration: 1420.0,
            max_deceleration: 6000.0,
            initial_speed: 600.0,
            speed_factor: 40.0,
            speed_smooth_window_microseconds: 200_000,
            max_speed_increase_per_wheel_event: 1200.0,
            max_speed_decrease_per_wheel_event: 0.0,
            damping: 3.1,
            use_braking: true,
            braking_dejitter_microseconds: 100_000,
            max_braking_times: 3,
            braking_cut_off_speed: 1000.0,
            speed_decrease_per_braking: f64::INFINITY,
            use_mouse_movement_braking: true,
            mouse_movement_dejitter_distance: 200,
            max_mouse_movement_event_interval_microseconds: 50_000,
            mouse_movement_braking_cut_off_speed: 200.0,
            speed_decrease_per_mouse_movement: f64::INFINITY,
        }
    }
}

/// Per-tick quantities derived from [`Options`] once at construction.
///
/// Everything speed-shaped becomes a per-tick delta here so the hot paths
/// never multiply by the tick interval again.
#[derive(Debug, Clone)]
pub(crate) struct Derived {
    pub tick_interval_s: f64,
    pub min_delta: f64,
    pub min_delta_decrease_per_tick: f64,
    pub max_delta_decrease_per_tick: f64,
    pub initial_delta: f64,
    pub alpha: f64,
    pub max_delta_increase: f64,
    pub max_delta_decrease: f64,
    pub delta_decrease_per_braking: f64,
    pub braking_cut_off_delta: f64,
    pub delta_decrease_per_mouse_movement: f64,
    pub mouse_movement_braking_cut_off_delta: f64,
}

impl Derived {
    pub fn new(options: &Options) -> Self {
        let tick = f64::from(options.tick_interval_microseconds) / 1e6;
        Derived {
            tick_interval_s: tick,
            min_delta: options.min_speed * tick,
            min_delta_decrease_per_tick: options.min_deceleration * tick * tick,
            max_delta_decrease_per_tick: options.max_deceleration * tick * tick,
            initial_delta: options.initial_speed * tick,
            alpha: (-options.damping * tick).exp(),
            max_delta_increase: options.max_speed_increase_per_wheel_event * tick,
            max_delta_decrease: options.max_speed_decrease_per_wheel_event * tick,
            delta_decrease_per_braking: options.speed_decrease_per_braking * tick,
            braking_cut_off_delta: options.braking_cut_off_speed * tick,
            delta_decrease_per_mouse_movement: options.speed_decrease_per_mouse_movement * tick,
            mouse_movement_braking_cut_off_delta: options.mouse_movement_braking_cut_off_speed
                * tick,
        }
    }
}
