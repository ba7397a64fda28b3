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

//! Gpiofan daemon (gpiofand)
//!
//! Lifecycle: acquire the fan GPIO line with the fan forced off, run the
//! hysteresis control loop until interrupted or faulted, then force the
//! fan off and release the line. Release is guaranteed on every exit
//! path; SIGINT/SIGTERM exit 0 without an error report, faults print a
//! diagnostic to stderr and exit 1. All output goes to stderr.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tracing::{error, info, warn};

use gpiofan::config::ControllerConfig;
use gpiofan::control;
use gpiofan::gpio::FanGpio;
use gpiofan::sensor::CpuTempSensor;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Global shutdown flag, raised by the signal handler and polled by the
/// control loop. Cleanup stays on the main thread so the actuator is
/// released in order.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

fn main() {
    // Logging first so every later failure is reported. Diagnostics go
    // to stderr only; stdout stays clean.
    let log_level = std::env::var("GPIOFAN_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_daemon() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_daemon() -> anyhow::Result<()> {
    info!("gpiofand {} starting", VERSION);

    let cfg = ControllerConfig::default();
    cfg.validate().context("configuration rejected")?;

    if let Err(e) = ctrlc::set_handler(|| SHUTDOWN.store(true, Ordering::SeqCst)) {
        warn!(
            "Failed to set signal handler: {}. Shutdown via signals may not work cleanly.",
            e
        );
    }

    let mut fan = match FanGpio::acquire(&cfg) {
        Ok(fan) => fan,
        Err(e) => {
            error!(
                "Make sure line {} on {} is not in use by another process (check `gpioinfo {}`).",
                cfg.line, cfg.chip, cfg.chip
            );
            // SAFETY: geteuid is always safe - it just returns the process's effective user ID.
            if unsafe { libc::geteuid() } != 0 {
                error!("Not running as root; GPIO character devices usually require elevated privileges.");
            }
            return Err(e.into());
        }
    };

    let mut sensor = CpuTempSensor::new(cfg.sensor_path.clone());

    let result = control::run(&cfg, &mut sensor, &mut fan, &SHUTDOWN);

    // Force the fan off and give the line back before reporting anything
    drop(fan);

    result.context("control loop aborted")?;

    info!("gpiofand terminated gracefully");
    Ok(())
}
