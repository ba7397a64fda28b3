/*
 * This file is part of Gpiofan.
 *
 * Copyright (C) 2025 Gpiofan contributors
 *
 * Gpiofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Gpiofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Gpiofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Controller configuration.
//!
//! There is no configuration file: the chip, line, thresholds and poll
//! interval are fixed properties of the deployment. They live in an
//! explicit struct (rather than bare constants) so the loop and its
//! collaborators can be exercised in tests with substituted values.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ControlError, Result};

/// GPIO chip exposing the fan switch line
pub const DEFAULT_CHIP: &str = "gpiochip1";

/// Line offset of the fan switch on the chip
pub const DEFAULT_LINE: u32 = 78;

/// Consumer label attached when claiming the line, visible in `gpioinfo`
pub const DEFAULT_CONSUMER: &str = "cpu_temp_fan_control";

/// Thermal zone file exposing the CPU temperature in millidegrees
pub const DEFAULT_SENSOR_PATH: &str = "/sys/class/thermal/thermal_zone2/temp";

/// Fan switches on at or above this temperature (Celsius)
pub const DEFAULT_ON_THRESHOLD_C: f64 = 51.0;

/// Fan switches off at or below this temperature (Celsius)
pub const DEFAULT_OFF_THRESHOLD_C: f64 = 50.5;

/// Seconds between polls, constant whether or not the fan switched
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Immutable controller configuration, built once at startup and passed
/// to the control loop.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// GPIO chip name under /dev, e.g. "gpiochip1"
    pub chip: String,
    /// Line offset on the chip
    pub line: u32,
    /// Consumer label claiming the line
    pub consumer: String,
    /// Sysfs file with the CPU temperature in millidegrees Celsius
    pub sensor_path: PathBuf,
    /// Fan turns on at or above this temperature
    pub on_threshold_c: f64,
    /// Fan turns off at or below this temperature
    pub off_threshold_c: f64,
    /// Delay between poll cycles
    pub poll_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            chip: DEFAULT_CHIP.to_string(),
            line: DEFAULT_LINE,
            consumer: DEFAULT_CONSUMER.to_string(),
            sensor_path: PathBuf::from(DEFAULT_SENSOR_PATH),
            on_threshold_c: DEFAULT_ON_THRESHOLD_C,
            off_threshold_c: DEFAULT_OFF_THRESHOLD_C,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl ControllerConfig {
    /// Path of the GPIO character device for this chip.
    pub fn chip_path(&self) -> PathBuf {
        PathBuf::from("/dev").join(&self.chip)
    }

    /// Validate the configuration before the loop starts.
    ///
    /// The off threshold must sit strictly below the on threshold: with a
    /// zero or negative gap the inclusive comparisons on both sides would
    /// flip the fan every poll when the temperature sits on the boundary.
    pub fn validate(&self) -> Result<()> {
        if !self.on_threshold_c.is_finite() || !self.off_threshold_c.is_finite() {
            return Err(ControlError::InvalidConfig {
                field: "thresholds",
                reason: "thresholds must be finite".to_string(),
            });
        }
        if self.off_threshold_c >= self.on_threshold_c {
            return Err(ControlError::InvalidConfig {
                field: "off_threshold_c",
                reason: format!(
                    "must be strictly below on_threshold_c ({} >= {})",
                    self.off_threshold_c, self.on_threshold_c
                ),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(ControlError::InvalidConfig {
                field: "poll_interval",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.chip.is_empty() {
            return Err(ControlError::InvalidConfig {
                field: "chip",
                reason: "must name a GPIO chip".to_string(),
            });
        }
        if self.consumer.is_empty() {
            return Err(ControlError::InvalidConfig {
                field: "consumer",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
