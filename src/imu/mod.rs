// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Inertial Measurement
//!
//! ## Modules
//!
//! - [`frame`] - Raw 9-axis sample type.
//! - [`window`] - Ring-buffer averaging sampler.
//! - [`mpu9250`] - MPU-9250 I2C driver.

pub mod frame;
pub mod mpu9250;
pub mod window;

pub use frame::ImuFrame;
pub use mpu9250::{Mpu9250, Mpu9250Error};
pub use window::{ImuSampler, ImuWindow};

/// A sensor that can produce one raw 9-axis frame on demand.
pub trait MotionSensor {
    type Error;

    fn read_motion9(&mut self) -> Result<ImuFrame, Self::Error>;
}

/// Source of the averaged measurement returned to the host.
pub trait ImuSource {
    fn measurement(&mut self) -> ImuFrame;
}
