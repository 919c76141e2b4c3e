//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input device selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device node to grab (e.g. "/dev/input/event5"); auto-detected
    /// when absent
    pub path: Option<PathBuf>,

    /// Key code held to coast without damping (e.g. 274 for the middle
    /// button). The key is consumed and never forwarded. Disabled when
    /// absent.
    pub free_spin_button: Option<u16>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor an environment filter is
    /// given ("error", "warn", "info", "debug", "trace")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}
