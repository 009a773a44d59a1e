// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Raw 9-axis inertial sample.

/// Number of channels in one frame.
pub const CHANNELS: usize = 9;

/// One accelerometer + gyroscope + magnetometer reading, raw sensor counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuFrame {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub mag: [i16; 3],
}

impl ImuFrame {
    /// Channels in wire order: ax, ay, az, gx, gy, gz, mx, my, mz.
    pub fn channels(&self) -> [i16; CHANNELS] {
        let [ax, ay, az] = self.accel;
        let [gx, gy, gz] = self.gyro;
        let [mx, my, mz] = self.mag;
        [ax, ay, az, gx, gy, gz, mx, my, mz]
    }

    pub fn from_channels(ch: [i16; CHANNELS]) -> Self {
        Self {
            accel: [ch[0], ch[1], ch[2]],
            gyro: [ch[3], ch[4], ch[5]],
            mag: [ch[6], ch[7], ch[8]],
        }
    }
}
