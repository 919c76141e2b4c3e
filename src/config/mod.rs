//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::smoother::Options;

pub mod types;

pub use types::{DeviceConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input device selection
    pub device: DeviceConfig,
    /// Wheel smoother tunables
    pub smoother: Options,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let smoother = &self.smoother;

        if smoother.tick_interval_microseconds == 0 {
            anyhow::bail!("tick_interval_microseconds must be positive");
        }
        if smoother.speed_smooth_window_microseconds == 0 {
            anyhow::bail!("speed_smooth_window_microseconds must be positive");
        }
        if smoother.speed_factor <= 0.0 || smoother.speed_factor.is_nan() {
            anyhow::bail!("speed_factor must be positive");
        }
        if smoother.max_braking_times == 0 {
            anyhow::bail!("max_braking_times must be at least 1");
        }
        if smoother.max_deceleration < smoother.min_deceleration {
            anyhow::bail!("max_deceleration must not be below min_deceleration");
        }
        if smoother.mouse_movement_dejitter_distance < 0 {
            anyhow::bail!("mouse_movement_dejitter_distance must not be negative");
        }

        let rates = [
            ("min_speed", smoother.min_speed),
            ("min_deceleration", smoother.min_deceleration),
            ("max_deceleration", smoother.max_deceleration),
            ("initial_speed", smoother.initial_speed),
            (
                "max_speed_increase_per_wheel_event",
                smoother.max_speed_increase_per_wheel_event,
            ),
            (
                "max_speed_decrease_per_wheel_event",
                smoother.max_speed_decrease_per_wheel_event,
            ),
            ("damping", smoother.damping),
            ("braking_cut_off_speed", smoother.braking_cut_off_speed),
            (
                "speed_decrease_per_braking",
                smoother.speed_decrease_per_braking,
            ),
            (
                "mouse_movement_braking_cut_off_speed",
                smoother.mouse_movement_braking_cut_off_speed,
            ),
            (
                "speed_decrease_per_mouse_movement",
                smoother.speed_decrease_per_mouse_movement,
            ),
        ];
        for (name, value) in rates {
            if value < 0.0 || value.is_nan() {
                anyhow::bail!("{name} must be a non-negative number");
            }
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, device: Option<PathBuf>) -> Self {
        if let Some(path) = device {
            self.device.path = Some(path);
        }
        self
    }
}
