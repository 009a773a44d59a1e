// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for the CNC shield firmware.
//!
//! Everything here is fixed at build time; nothing is persisted on the device.

use crate::pfm::{AxisPins, PinId};

/// Number of stepper axes on the shield (X, Y, Z).
pub const AXIS_COUNT: usize = 3;

/// Target frequency value that means "emit no pulses".
pub const INACTIVE_FREQ: u16 = 65535;

/// Tick rate (Hz) programmed into the pulse timer at bring-up.
pub const DEFAULT_TICK_RATE: u16 = 6400;

/// IMU averaging window is `1 << IMU_LOG2_WINDOW` samples.
pub const IMU_LOG2_WINDOW: u32 = 5;
pub const IMU_WINDOW: usize = 1 << IMU_LOG2_WINDOW;

/// Rate (Hz) at which the main loop reads the IMU; matches the AK8963 continuous mode 2 rate.
pub const IMU_SAMPLE_RATE_HZ: u32 = 100;

/// Host link baud rate.
pub const HOST_BAUD_RATE: u32 = 115_200;

/// Bytes buffered between the USART receive interrupt and the main loop.
pub const RX_QUEUE_LEN: usize = 64;

/// Largest request payload accepted by the link parser.
pub const MAX_PAYLOAD: usize = 32;

/// Largest response payload produced by the dispatcher (IMU measurement).
pub const MAX_RESPONSE: usize = 18;

/// Arduino header numbering of the CNC shield lines.
pub mod shield {
    use super::PinId;

    pub const X_STEP: PinId = PinId(2);
    pub const Y_STEP: PinId = PinId(3);
    pub const Z_STEP: PinId = PinId(4);
    pub const X_DIR: PinId = PinId(5);
    pub const Y_DIR: PinId = PinId(6);
    pub const Z_DIR: PinId = PinId(7);
}

/// Step/direction bindings for X, Y, Z in that order.
pub const CNC_SHIELD_PINS: [AxisPins; AXIS_COUNT] = [
    AxisPins {
        step: shield::X_STEP,
        dir: shield::X_DIR,
    },
    AxisPins {
        step: shield::Y_STEP,
        dir: shield::Y_DIR,
    },
    AxisPins {
        step: shield::Z_STEP,
        dir: shield::Z_DIR,
    },
];
