// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # CNC Shield PFM Firmware
//!
//! Firmware for driving a 3-axis Arduino CNC shield from a host over a binary serial link, while
//! sampling a 9-axis IMU. Written in Rust, targeting an STM32F767ZI Nucleo-144 board.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`pfm`] | Timer-driven pulse engine for the X/Y/Z stepper axes |
//! | [`protocol`] | Host packet framing, command decoding and dispatch |
//! | [`imu`] | MPU-9250 driver and windowed averaging |
//! | [`config`] | Compile-time constants |
//! | `hw` | MCU-level wrappers (pins, timer, USART), `board` feature only |
//!
//! Everything except `hw` is hardware-agnostic and tested on the host.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod imu;
pub mod pfm;
pub mod protocol;

#[cfg(feature = "board")]
pub mod hw;
