// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board support for the Nucleo-F767ZI carrying an Arduino CNC shield.

pub mod pins;
pub mod shield;
pub mod timer;
pub mod usart;

pub use pins::BoardPins;
pub use shield::NucleoShield;
pub use timer::TickTimer;
pub use usart::{HostRx, HostSerial};
