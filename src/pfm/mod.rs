// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Pulse Generation
//!
//! Timer-driven pulse-frequency modulation for the three shield axes.
//!
//! ## Modules
//!
//! - [`axis`] - Axis identifiers, selection mask and per-axis state.
//! - [`engine`] - The `PulseEngine` ticked from the timer interrupt.

pub mod axis;
pub mod engine;

pub use axis::{Axis, AxisMask, AxisPins, AxisState, ControlMode, PinId};
pub use engine::{CncShield, PulseEngine, SuspendGuard};
