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

//! CPU temperature source.
//!
//! The kernel thermal subsystem exposes zone temperatures as a decimal
//! millidegree integer in a single sysfs file. A failed read is
//! transient: the caller skips the cycle and retries after the normal
//! poll interval.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::{ControlError, Result};

/// Source of temperature samples for the control loop.
pub trait TempSource {
    /// Current temperature in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f64>;
}

/// Reads the CPU temperature from a fixed thermal zone file.
#[derive(Debug, Clone)]
pub struct CpuTempSensor {
    path: PathBuf,
}

impl CpuTempSensor {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TempSource for CpuTempSensor {
    fn read_celsius(&mut self) -> Result<f64> {
        let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ControlError::SensorNotFound(self.path.clone()),
            _ => ControlError::SensorRead {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let millidegrees: i64 = raw.trim().parse().map_err(|_| ControlError::SensorParse {
            path: self.path.clone(),
            raw: raw.trim().to_string(),
        })?;

        Ok(millidegrees as f64 / 1000.0)
    }
}
