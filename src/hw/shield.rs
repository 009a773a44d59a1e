// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arduino CNC shield outputs on the Nucleo header.
//!
//! Maps the engine's [`PinId`] handles onto GPIO lines and owns the tick timer, so the engine
//! reaches all hardware through [`CncShield`].

use stm32f7xx_hal::gpio::PinState;

use crate::config::shield;
use crate::hw::pins::ShieldPins;
use crate::hw::timer::TickTimer;
use crate::pfm::{CncShield, PinId};

pub struct NucleoShield {
    pins: ShieldPins,
    timer: TickTimer,
}

impl NucleoShield {
    /// Take the shield lines with every output low and the drivers disabled.
    pub fn new(mut pins: ShieldPins, timer: TickTimer) -> Self {
        pins.x_step.set_low();
        pins.y_step.set_low();
        pins.z_step.set_low();
        pins.x_dir.set_low();
        pins.y_dir.set_low();
        pins.z_dir.set_low();
        pins.enable.set_high();

        Self { pins, timer }
    }
}

impl CncShield for NucleoShield {
    fn write_pin(&mut self, pin: PinId, high: bool) {
        let state = if high { PinState::High } else { PinState::Low };
        match pin {
            shield::X_STEP => self.pins.x_step.set_state(state),
            shield::Y_STEP => self.pins.y_step.set_state(state),
            shield::Z_STEP => self.pins.z_step.set_state(state),
            shield::X_DIR => self.pins.x_dir.set_state(state),
            shield::Y_DIR => self.pins.y_dir.set_state(state),
            shield::Z_DIR => self.pins.z_dir.set_state(state),
            _ => {}
        }
    }

    fn set_outputs_enabled(&mut self, enabled: bool) {
        // EN is active-low on the shield
        if enabled {
            self.pins.enable.set_low();
        } else {
            self.pins.enable.set_high();
        }
    }

    fn apply_tick_rate(&mut self, hz: u16) -> u16 {
        self.timer.start(hz)
    }
}
