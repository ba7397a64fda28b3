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

//! Mock collaborators shared across test modules.
//!
//! The control loop is generic over its two hardware seams, so tests
//! drive it with a scripted temperature source and a fan that records
//! every command into a shared log, including the forced-off and release
//! performed on drop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ControlError, Result};
use crate::gpio::FanOutput;
use crate::sensor::TempSource;

/// One observable actuator event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCmd {
    /// Explicit `set` command from the control loop
    Set(bool),
    /// Line driven low during release
    ForcedOff,
    /// Ownership of the line relinquished
    Released,
}

pub type CommandLog = Rc<RefCell<Vec<FanCmd>>>;

pub fn new_command_log() -> CommandLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Only the explicit `set` commands, in order.
pub fn set_commands(log: &[FanCmd]) -> Vec<bool> {
    log.iter()
        .filter_map(|c| match c {
            FanCmd::Set(on) => Some(*on),
            _ => None,
        })
        .collect()
}

/// Temperature source that replays a fixed script of readings and raises
/// the shutdown flag once the script is exhausted, so loop tests
/// terminate without a real signal.
pub struct ScriptedSensor {
    readings: VecDeque<Result<f64>>,
    shutdown: Arc<AtomicBool>,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<Result<f64>>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            readings: readings.into(),
            shutdown,
        }
    }
}

impl TempSource for ScriptedSensor {
    fn read_celsius(&mut self) -> Result<f64> {
        let next = self.readings.pop_front();
        if self.readings.is_empty() {
            self.shutdown.store(true, Ordering::SeqCst);
        }
        next.unwrap_or_else(|| {
            Err(ControlError::SensorNotFound(PathBuf::from(
                "script exhausted",
            )))
        })
    }
}

/// Fan actuator that records every command. Drop mirrors the real GPIO
/// handle: force the line low, then release it.
pub struct RecordingFan {
    log: CommandLog,
    fail_sets: bool,
}

impl RecordingFan {
    pub fn new(log: CommandLog) -> Self {
        Self {
            log,
            fail_sets: false,
        }
    }

    /// A fan whose `set` always fails, for exercising the runtime-fault
    /// path. Failed commands are not recorded.
    pub fn failing(log: CommandLog) -> Self {
        Self {
            log,
            fail_sets: true,
        }
    }
}

impl FanOutput for RecordingFan {
    fn set(&mut self, on: bool) -> Result<()> {
        if self.fail_sets {
            return Err(ControlError::GpioWrite {
                reason: "injected fault".to_string(),
            });
        }
        self.log.borrow_mut().push(FanCmd::Set(on));
        Ok(())
    }
}

impl Drop for RecordingFan {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.push(FanCmd::ForcedOff);
        log.push(FanCmd::Released);
    }
}
