//! Per-report event routing through the smoother.

use std::time::Duration;

use evdev::{EventType, InputEvent, RelativeAxisCode, SynchronizationCode};
use tracing::{debug, trace};

use crate::smoother::{EventTime, WheelIncrement, WheelSmoother};

/// Routes one kernel report at a time through the smoother.
///
/// Events accumulate until a `SYN_REPORT`, at which point the finished
/// batch is handed back for emission (the sink appends its own sync
/// marker). Wheel notches are rewritten into smoother output, the
/// source's own high-resolution wheel events are dropped, key events stop
/// the animation, and the optional free-spin button is consumed entirely.
pub struct EventRouter {
    smoother: WheelSmoother,
    free_spin_button: Option<u16>,
    pending: Vec<InputEvent>,
}

impl EventRouter {
    /// Wrap a smoother, optionally repurposing one key as the free-spin
    /// toggle.
    pub fn new(smoother: WheelSmoother, free_spin_button: Option<u16>) -> Self {
        EventRouter {
            smoother,
            free_spin_button,
            pending: Vec::new(),
        }
    }

    /// Feed one inbound event.
    ///
    /// Returns the finished batch on a report boundary. An empty batch
    /// means everything in the report was suppressed and nothing should
    /// reach the sink, sync marker included.
    pub fn route(&mut self, event: InputEvent) -> Option<Vec<InputEvent>> {
        let event_type = event.event_type();

        if event_type == EventType::SYNCHRONIZATION {
            if event.code() == SynchronizationCode::SYN_REPORT.0 {
                return Some(std::mem::take(&mut self.pending));
            }
            return None;
        }

        let time = EventTime::from(event.timestamp());

        if event_type == EventType::RELATIVE {
            if event.code() == RelativeAxisCode::REL_WHEEL.0 {
                if let Some(increment) = self.smoother.handle_event(time, event.value() > 0) {
                    self.pending.push(to_output(increment));
                }
                return None;
            }
            if event.code() == RelativeAxisCode::REL_WHEEL_HI_RES.0 {
                // The synthesized stream owns this axis.
                return None;
            }

            if event.code() == RelativeAxisCode::REL_X.0 {
                self.smoother.handle_rel_x(time, event.value());
            } else if event.code() == RelativeAxisCode::REL_Y.0 {
                self.smoother.handle_rel_y(time, event.value());
            }
            self.pending.push(event);
            return None;
        }

        if event_type == EventType::KEY {
            if Some(event.code()) == self.free_spin_button {
                match event.value() {
                    1 => {
                        if self.smoother.set_free_spin(true) {
                            debug!("free spin engaged");
                        }
                    }
                    0 => {
                        self.smoother.set_free_spin(false);
                        debug!("free spin released");
                    }
                    _ => {}
                }
                return None;
            }

            self.smoother.stop();
            self.pending.push(event);
            return None;
        }

        // The sink only advertises keys and relative axes.
        trace!("dropping event type {:?} code {}", event_type, event.code());
        None
    }

    /// One damping step, already converted for the sink.
    pub fn tick(&mut self) -> Option<InputEvent> {
        self.smoother.tick().map(to_output)
    }

    /// How long the host may wait before the next tick, from `now`.
    pub fn timeout(&self, now: EventTime) -> Option<Duration> {
        self.smoother.timeout(now)
    }

    /// Scheduled time of the next tick, while an animation is active.
    pub fn next_tick_time(&self) -> Option<EventTime> {
        self.smoother.next_tick_time()
    }
}

fn to_output(increment: WheelIncrement) -> InputEvent {
    // The kernel stamps uinput writes itself; the increment's own
    // timestamp only matters for scheduling.
    InputEvent::new(
        EventType::RELATIVE.0,
        RelativeAxisCode::REL_WHEEL_HI_RES.0,
        increment.value,
    )
}
