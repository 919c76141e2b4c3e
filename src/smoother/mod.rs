//! The wheel smoother: discrete notches in, damped high-resolution
//! increments out.
//!
//! # Architecture
//!
//! ```text
//! wheel notch ──> WheelSmoother::handle_event ──┐
//! rel x/y ──────> WheelSmoother::handle_rel_*   │  Option<WheelIncrement>
//! key press ────> WheelSmoother::stop           ├──────────────────────>
//! deadline ─────> WheelSmoother::tick ──────────┘
//! ```
//!
//! [`WheelSmoother`] owns all state and is driven by one host loop; it
//! never blocks and never fails. [`Options`] carries the tunables, a
//! sliding-window speed estimator turns inter-notch intervals into target
//! speeds, and a quantizer converts the floating per-tick delta into
//! integer increments without losing the fractional remainder.

mod options;
mod quantizer;
mod speed;
mod time;
mod wheel;

pub use options::Options;
pub use time::EventTime;
pub use wheel::{WheelIncrement, WheelSmoother};
