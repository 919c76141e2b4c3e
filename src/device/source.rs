//! Opening, describing, and grabbing the physical mouse.

use std::path::Path;

use evdev::Device;
use tracing::{debug, info};

use crate::device::error::{DeviceError, Result};

/// Open the input device node at `path`.
pub fn open_source(path: &Path) -> Result<Device> {
    Device::open(path).map_err(|source| DeviceError::Open {
        path: path.to_owned(),
        source,
    })
}

/// Take exclusive ownership of the device so its events reach only us.
pub fn grab(device: &mut Device, path: &Path) -> Result<()> {
    device.grab().map_err(|source| DeviceError::Grab {
        path: path.to_owned(),
        source,
    })
}

/// Log the device identity and the capabilities we care about.
pub fn describe(device: &Device) {
    let id = device.input_id();
    info!(
        "Input device name: \"{}\"",
        device.name().unwrap_or("unknown")
    );
    info!(
        "Input device ID: bus {:?} vendor {:#06x} product {:#06x}",
        id.bus_type(),
        id.vendor(),
        id.product()
    );

    if let Some(axes) = device.supported_relative_axes() {
        for axis in axes.iter() {
            debug!("  relative axis {:?}", axis);
        }
    }
    if let Some(keys) = device.supported_keys() {
        debug!("  {} key codes", keys.iter().count());
    }
}
