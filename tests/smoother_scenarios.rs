//! End-to-end scenarios for the wheel smoother, driven through the
//! public library API with synthetic timestamps.

use std::time::Duration;

use smooth_scroll::smoother::{EventTime, Options, WheelSmoother};

const TICK_US: u32 = 16_667;

fn options() -> Options {
    Options {
        tick_interval_microseconds: TICK_US,
        ..Options::default()
    }
}

fn smoother() -> WheelSmoother {
    WheelSmoother::new(options())
}

fn ms(value: i64) -> EventTime {
    EventTime::from_micros(value * 1000)
}

#[test]
fn single_notch_decays_to_stop() {
    let mut sm = smoother();
    let seed = sm.handle_event(ms(0), true).expect("seed increment");
    // 600 units/s at a 16.667 ms tick.
    assert_eq!(seed.value, 10);
    assert_eq!(seed.time, ms(0));

    let mut ticks = 0;
    let mut previous = seed.value;
    let mut last_time = seed.time;
    while let Some(next) = sm.next_tick_time() {
        ticks += 1;
        assert!(ticks < 500, "animation must stop in finite time");
        if let Some(ev) = sm.tick() {
            assert!(ev.value >= 1);
            // Non-increasing modulo quantization jitter.
            assert!(ev.value <= previous + 1);
            assert!(ev.time >= last_time);
            assert_eq!(ev.time, next);
            previous = ev.value;
            last_time = ev.time;
        }
    }

    assert!(sm.tick().is_none());
    assert!(sm.timeout(ms(10_000)).is_none());
}

#[test]
fn rapid_notches_accelerate_up_to_the_cap() {
    let mut sm = smoother();
    let seed = sm.handle_event(ms(0), true).expect("seed increment");
    assert_eq!(seed.value, 10);

    assert!(sm.handle_event(ms(40), true).is_none());
    assert!(sm.handle_event(ms(80), true).is_none());
    assert!(sm.handle_event(ms(120), true).is_none());

    let accelerated = sm.tick().expect("tick after acceleration");
    assert!(accelerated.value > seed.value);
    // Each notch may raise the speed by at most
    // max_speed_increase_per_wheel_event (20 units per tick here).
    assert!(accelerated.value <= 10 + 3 * 20);
}

#[test]
fn opposite_notch_stops_the_animation_instantly() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);

    // speed_decrease_per_braking defaults to infinity: one reverse notch
    // is a braking stop, not an emission.
    assert!(sm.handle_event(ms(100), false).is_none());
    assert!(sm.timeout(ms(100)).is_none());
    assert!(sm.next_tick_time().is_none());
    assert_eq!(sm.braking_times(), 1);
}

#[test]
fn brake_burst_is_absorbed_inside_the_dejitter_window() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    sm.handle_event(ms(100), false);
    assert_eq!(sm.braking_times(), 1);

    // 50 ms later, still inside the 100 ms dejitter window.
    assert!(sm.handle_event(ms(150), false).is_none());
    assert_eq!(sm.braking_times(), 2);
    assert!(sm.next_tick_time().is_none());
}

#[test]
fn brake_notch_outside_the_window_relaunches() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    sm.handle_event(ms(100), false);
    sm.handle_event(ms(150), false);
    assert_eq!(sm.braking_times(), 2);

    // 300 ms is past the window; the absorbed burst seeds the reverse
    // animation. Two notches across the 200 ms smoothing window estimate
    // 400 units/s, which clamps up to the initial speed.
    let ev = sm.handle_event(ms(300), false).expect("relaunch increment");
    assert_eq!(ev.value, -10);
    assert_eq!(ev.time, ms(300));
    assert_eq!(sm.braking_times(), 0);
    assert_eq!(
        sm.next_tick_time(),
        Some(EventTime::from_micros(300_000 + i64::from(TICK_US)))
    );
}

#[test]
fn relaunch_ceiling_scales_with_absorbed_notches() {
    let mut sm = WheelSmoother::new(Options {
        max_speed_increase_per_wheel_event: 60.0,
        ..options()
    });
    sm.handle_event(ms(0), true);
    sm.handle_event(ms(100), false);
    sm.handle_event(ms(110), false);
    assert_eq!(sm.braking_times(), 2);

    // The burst estimates ~792 units/s, above the ceiling of
    // initial + 2 * 60 = 720 units/s, so the ceiling wins.
    let ev = sm.handle_event(ms(201), false).expect("relaunch increment");
    assert_eq!(ev.value, -12);
}

#[test]
fn absorption_stops_at_max_braking_times() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    sm.handle_event(ms(100), false);
    sm.handle_event(ms(120), false);
    sm.handle_event(ms(140), false);
    assert_eq!(sm.braking_times(), 3);

    // Still inside the window, but the absorption cap is reached.
    let ev = sm.handle_event(ms(160), false).expect("relaunch at the cap");
    assert!(ev.value <= -10);
    assert_eq!(sm.braking_times(), 0);
}

#[test]
fn braking_notches_never_emit_while_animating() {
    let mut sm = WheelSmoother::new(Options {
        speed_decrease_per_braking: 60.0,
        braking_cut_off_speed: 60.0,
        ..options()
    });
    sm.handle_event(ms(0), true);

    // Each reverse notch removes one unit per tick of speed; none of
    // them may ever produce an increment.
    let mut stopped = false;
    for i in 1..=20 {
        assert!(sm.handle_event(ms(10 * i), false).is_none());
        if sm.next_tick_time().is_none() {
            stopped = true;
            break;
        }
    }
    assert!(stopped);
    assert_eq!(sm.braking_times(), 1);
}

#[test]
fn pointer_motion_past_the_dejitter_distance_stops_the_animation() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);

    // 201 units of drift in closely spaced events: the first event whose
    // post-dejitter excess is nonzero stops the animation outright.
    sm.handle_rel_x(ms(10), 100);
    assert!(sm.next_tick_time().is_some());
    sm.handle_rel_x(ms(20), 100);
    assert!(sm.next_tick_time().is_some());
    sm.handle_rel_x(ms(30), 1);
    assert!(sm.next_tick_time().is_none());
    assert!(sm.tick().is_none());
}

#[test]
fn key_press_cancels_the_animation() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    sm.stop();
    assert!(sm.tick().is_none());
    assert!(sm.timeout(ms(1)).is_none());
}

#[test]
fn idleness_is_visible_through_every_accessor() {
    let mut sm = smoother();
    assert!(sm.is_idle());
    assert!(sm.timeout(ms(0)).is_none());
    assert!(sm.next_tick_time().is_none());

    sm.handle_event(ms(0), true);
    assert!(!sm.is_idle());
    assert!(sm.timeout(ms(0)).is_some());
    assert!(sm.next_tick_time().is_some());

    sm.stop();
    assert!(sm.is_idle());
    assert!(sm.timeout(ms(0)).is_none());
    assert!(sm.next_tick_time().is_none());
}

#[test]
fn timeout_counts_down_to_the_deadline() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);

    let deadline = sm.next_tick_time().expect("active deadline");
    assert_eq!(
        sm.timeout(ms(0)),
        Some(Duration::from_micros(u64::from(TICK_US)))
    );
    assert_eq!(sm.timeout(deadline), Some(Duration::ZERO));
    // An overdue deadline clamps at zero rather than going negative.
    assert_eq!(sm.timeout(ms(1000)), Some(Duration::ZERO));
}

#[test]
fn free_spin_coasts_until_released() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    assert!(sm.set_free_spin(true));

    let first = sm.tick().expect("coasting tick");
    for _ in 0..200 {
        let ev = sm.tick().expect("coasting tick");
        assert_eq!(ev.value, first.value);
    }

    assert!(sm.set_free_spin(false));
    let mut ticks = 0;
    while sm.next_tick_time().is_some() {
        ticks += 1;
        assert!(ticks < 500, "damping must resume after free spin");
        sm.tick();
    }
}

#[test]
fn emission_timestamps_never_go_backwards() {
    let mut sm = smoother();
    let mut emitted = Vec::new();

    emitted.push(sm.handle_event(ms(0), true).expect("seed increment"));
    for _ in 0..3 {
        if let Some(ev) = sm.tick() {
            emitted.push(ev);
        }
    }
    sm.handle_event(ms(40), true);
    if let Some(ev) = sm.tick() {
        emitted.push(ev);
    }
    sm.handle_event(ms(100), false);
    if let Some(ev) = sm.handle_event(ms(250), false) {
        emitted.push(ev);
    }
    for _ in 0..3 {
        if let Some(ev) = sm.tick() {
            emitted.push(ev);
        }
    }

    for pair in emitted.windows(2) {
        assert!(pair[1].time >= pair[0].time);
    }
}

#[test]
fn quantization_conserves_motion_while_coasting() {
    let mut sm = smoother();
    sm.handle_event(ms(0), true);
    sm.set_free_spin(true);

    let mut total = 0i64;
    for _ in 0..1000 {
        if let Some(ev) = sm.tick() {
            total += i64::from(ev.value);
        }
    }

    // With damping suspended the per-tick delta is exactly
    // initial_speed * tick seconds; the carry keeps the emitted sum
    // within one unit of the ideal.
    let ideal = 600.0 * (f64::from(TICK_US) / 1e6) * 1000.0;
    assert!((total as f64 - ideal).abs() < 2.0);
}
