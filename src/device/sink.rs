//! The virtual output device.

use evdev::uinput::VirtualDevice;
use evdev::{AttributeSet, BusType, Device, InputId, RelativeAxisCode};
use tracing::debug;

use crate::device::error::Result;

/// Name the synthetic device advertises to the session.
pub const VIRTUAL_DEVICE_NAME: &str = "Virtual Smooth Mouse";

/// Create a uinput device mirroring the source's keys and relative axes,
/// with the high-resolution wheel axis added.
///
/// Only `EV_KEY` and `EV_REL` are mirrored; the event router forwards
/// nothing else.
pub fn create_virtual_mouse(source: &Device) -> Result<VirtualDevice> {
    let mut axes = AttributeSet::<RelativeAxisCode>::new();
    if let Some(source_axes) = source.supported_relative_axes() {
        for axis in source_axes.iter() {
            axes.insert(axis);
        }
    }
    axes.insert(RelativeAxisCode::REL_WHEEL_HI_RES);

    let mut builder = VirtualDevice::builder()?
        .name(VIRTUAL_DEVICE_NAME)
        .input_id(InputId::new(BusType::BUS_USB, 0x1234, 0x5678, 1))
        .with_relative_axes(&axes)?;
    if let Some(keys) = source.supported_keys() {
        builder = builder.with_keys(keys)?;
    }

    let device = builder.build()?;
    debug!(name = VIRTUAL_DEVICE_NAME, "virtual device created");
    Ok(device)
}
