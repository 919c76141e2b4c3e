//! Device-layer error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Errors from opening, grabbing, or synthesizing input devices.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The input device node could not be opened.
    #[error("failed to open input device {}: {source}", path.display())]
    Open {
        /// Device node that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The device could not be grabbed for exclusive access.
    #[error("failed to grab {}: {source}", path.display())]
    Grab {
        /// Device node that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// No configured path and no device advertising a scroll wheel.
    #[error("no scroll-capable mouse found (need REL_WHEEL and BTN_LEFT)")]
    NoSuitableDevice,

    /// The uinput output device could not be created.
    #[error("failed to create virtual output device: {0}")]
    VirtualDevice(#[from] io::Error),
}
