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

//! Gpiofan - hysteresis fan control daemon for Linux
//!
//! Polls a CPU temperature sensor exposed by the kernel thermal subsystem
//! and switches a fan on or off through a single GPIO line, with a
//! two-threshold hysteresis band to avoid relay chatter at the boundary.

pub mod config;
pub mod control;
pub mod error;
pub mod gpio;
pub mod sensor;

#[cfg(test)]
pub mod test_utils;
