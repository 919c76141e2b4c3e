//! Picking a scroll-capable mouse automatically.

use std::path::PathBuf;

use evdev::{Device, KeyCode, RelativeAxisCode};
use tracing::info;

use crate::device::error::{DeviceError, Result};

/// Whether a device looks like a mouse with a scroll wheel.
fn is_scroll_mouse(device: &Device) -> bool {
    let wheel = device
        .supported_relative_axes()
        .is_some_and(|axes| axes.contains(RelativeAxisCode::REL_WHEEL));
    let button = device
        .supported_keys()
        .is_some_and(|keys| keys.contains(KeyCode::BTN_LEFT));
    wheel && button
}

/// All scroll-capable mice currently present, sorted by device node.
pub fn list_scroll_mice() -> Vec<(PathBuf, String)> {
    let mut found: Vec<(PathBuf, String)> = evdev::enumerate()
        .filter(|(_, device)| is_scroll_mouse(device))
        .map(|(path, device)| {
            let name = device.name().unwrap_or("unknown").to_string();
            (path, name)
        })
        .collect();
    found.sort();
    found
}

/// Pick the first scroll-capable mouse.
pub fn find_scroll_mouse() -> Result<(PathBuf, Device)> {
    let mut candidates: Vec<(PathBuf, Device)> = evdev::enumerate()
        .filter(|(_, device)| is_scroll_mouse(device))
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    match candidates.into_iter().next() {
        Some((path, device)) => {
            info!(
                "Auto-detected scroll mouse: {} (\"{}\")",
                path.display(),
                device.name().unwrap_or("unknown")
            );
            Ok((path, device))
        }
        None => Err(DeviceError::NoSuitableDevice),
    }
}
