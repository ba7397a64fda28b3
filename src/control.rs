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

//! Hysteresis controller and control loop.
//!
//! Two thresholds with a strict gap between them: the fan turns on at or
//! above the upper one and off at or below the lower one. Inside the
//! band nothing changes, so a temperature hovering around a single value
//! cannot chatter the fan relay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::Result;
use crate::gpio::FanOutput;
use crate::sensor::TempSource;

/// How often the poll sleep re-checks the shutdown flag. An operator
/// interruption must not wait out the full poll interval.
const SHUTDOWN_POLL_SLICE: Duration = Duration::from_millis(100);

/// Fan switch state as commanded by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanState {
    On,
    Off,
}

/// Apply the hysteresis rule to one temperature sample.
///
/// Both comparisons are inclusive; the strict gap between the thresholds
/// (enforced by [`ControllerConfig::validate`]) is what keeps the exact
/// boundary values from oscillating. Pure function: all actuation is the
/// caller's job.
pub fn decide(current: FanState, temp_c: f64, cfg: &ControllerConfig) -> FanState {
    match current {
        FanState::Off if temp_c >= cfg.on_threshold_c => FanState::On,
        FanState::On if temp_c <= cfg.off_threshold_c => FanState::Off,
        _ => current,
    }
}

/// Poll-decide-act-sleep loop.
///
/// Runs until the shutdown flag is raised (operator interruption, clean
/// return) or the actuator rejects a write (runtime fault, error
/// return). The caller owns the actuator handle; its release is not this
/// function's concern. Transient sensor failures skip the decide/act
/// step for the cycle but still wait the normal interval.
///
/// Assumes the line was forced off at acquisition: the loop starts from
/// [`FanState::Off`] and only touches the actuator on a state change, so
/// actuation in any cycle reflects exactly that cycle's sample.
pub fn run<S, F>(
    cfg: &ControllerConfig,
    sensor: &mut S,
    fan: &mut F,
    shutdown: &AtomicBool,
) -> Result<()>
where
    S: TempSource,
    F: FanOutput,
{
    let mut state = FanState::Off;

    info!(
        on_threshold_c = cfg.on_threshold_c,
        off_threshold_c = cfg.off_threshold_c,
        poll_interval_s = cfg.poll_interval.as_secs_f64(),
        "control loop running"
    );

    while !shutdown.load(Ordering::SeqCst) {
        match sensor.read_celsius() {
            Ok(temp_c) => {
                let next = decide(state, temp_c, cfg);
                if next != state {
                    info!(temp_c, fan_on = (next == FanState::On), "fan state change");
                    fan.set(next == FanState::On)?;
                    state = next;
                } else {
                    debug!(temp_c, fan_on = (state == FanState::On), "no transition");
                }
            }
            Err(e) => warn!("{}", e),
        }

        sleep_with_shutdown(cfg.poll_interval, shutdown);
    }

    info!("control loop stopped");
    Ok(())
}

/// Sleep for the poll interval, returning early once the shutdown flag
/// is raised.
fn sleep_with_shutdown(total: Duration, shutdown: &AtomicBool) {
    let deadline = Instant::now() + total;
    while !shutdown.load(Ordering::SeqCst) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(remaining.min(SHUTDOWN_POLL_SLICE));
    }
}
