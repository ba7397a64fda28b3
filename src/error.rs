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

//! Unified error handling for Gpiofan.
//!
//! A single error type used across the daemon. Sensor failures are
//! transient (the control loop skips the cycle and retries after the
//! normal interval); GPIO acquisition failures are fatal; GPIO write
//! failures end the loop through the shutdown path.

use std::io;
use std::path::PathBuf;

/// Result type alias using ControlError
pub type Result<T> = std::result::Result<T, ControlError>;

/// Unified error type for all Gpiofan operations
#[derive(thiserror::Error, Debug)]
pub enum ControlError {
    #[error("CPU temperature file not found at {0}")]
    SensorNotFound(PathBuf),

    #[error("could not read temperature from {path}: {source}")]
    SensorRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("could not parse temperature from {path}: {raw:?} is not a millidegree integer")]
    SensorParse {
        path: PathBuf,
        raw: String,
    },

    #[error("could not acquire GPIO line {line} on chip {chip}: {reason}")]
    GpioAcquire {
        chip: String,
        line: u32,
        reason: String,
    },

    #[error("could not drive GPIO line: {reason}")]
    GpioWrite {
        reason: String,
    },

    #[error("invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl ControlError {
    /// Whether the failure is transient: the loop logs it, skips the
    /// decide/act step for the cycle, and retries after the normal
    /// interval. Everything else terminates the loop.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::SensorNotFound(_) | Self::SensorRead { .. } | Self::SensorParse { .. }
        )
    }
}
