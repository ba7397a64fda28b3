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

//! Fan actuator on a GPIO line.
//!
//! The fan switch hangs off one output line of a GPIO chip, claimed
//! through the character-device uAPI with a consumer label so `gpioinfo`
//! shows who owns it. The line is held for the lifetime of the daemon;
//! dropping the handle forces the fan off and relinquishes ownership, on
//! every exit path.

use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::{ControlError, Result};

/// Binary fan actuator seam; implemented by the GPIO line and by test
/// doubles.
pub trait FanOutput {
    /// Drive the fan line high (on) or low (off).
    fn set(&mut self, on: bool) -> Result<()>;
}

/// Exclusive handle on the fan switch line.
///
/// Acquisition requests the line as an output and forces it low, so the
/// controller starts from a known OFF baseline regardless of the physical
/// fan state. Release happens in `Drop`: force low, then give the line
/// back to the kernel.
pub struct FanGpio {
    handle: LineHandle,
    chip: String,
    line: u32,
}

impl FanGpio {
    /// Claim the configured line as an output, labeled with the consumer
    /// tag. Fails if the chip is absent, the line is already claimed by
    /// another process, or the caller lacks permission; all of these are
    /// fatal and never retried.
    pub fn acquire(cfg: &ControllerConfig) -> Result<Self> {
        let mut chip = Chip::new(cfg.chip_path()).map_err(|e| acquire_error(cfg, e))?;
        let line = chip.get_line(cfg.line).map_err(|e| acquire_error(cfg, e))?;
        let handle = line
            .request(LineRequestFlags::OUTPUT, 0, &cfg.consumer)
            .map_err(|e| acquire_error(cfg, e))?;

        // Requested with a low default, but force it explicitly so the
        // OFF baseline does not depend on request semantics.
        handle.set_value(0).map_err(|e| ControlError::GpioWrite {
            reason: e.to_string(),
        })?;

        info!(chip = %cfg.chip, line = cfg.line, consumer = %cfg.consumer, "GPIO line acquired, fan forced off");

        Ok(Self {
            handle,
            chip: cfg.chip.clone(),
            line: cfg.line,
        })
    }
}

fn acquire_error(cfg: &ControllerConfig, source: gpio_cdev::Error) -> ControlError {
    ControlError::GpioAcquire {
        chip: cfg.chip.clone(),
        line: cfg.line,
        reason: source.to_string(),
    }
}

impl FanOutput for FanGpio {
    fn set(&mut self, on: bool) -> Result<()> {
        self.handle
            .set_value(u8::from(on))
            .map_err(|e| ControlError::GpioWrite {
                reason: e.to_string(),
            })
    }
}

impl Drop for FanGpio {
    fn drop(&mut self) {
        // Guaranteed cleanup: never leave the fan running after the
        // process lets go of the line.
        if let Err(e) = self.handle.set_value(0) {
            warn!(chip = %self.chip, line = self.line, "could not force fan off on release: {}", e);
        }
        debug!(chip = %self.chip, line = self.line, "GPIO line released");
    }
}
