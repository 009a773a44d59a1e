// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Windowed moving average over the most recent IMU frames.
//!
//! Works in `no_std` and does not allocate memory. The window length must be a power of two so
//! the average is a right shift of the per-channel sum.

use crate::imu::frame::{ImuFrame, CHANNELS};
use crate::imu::{ImuSource, MotionSensor};

/// Ring buffer of the last `W` frames.
pub struct ImuWindow<const W: usize> {
    slots: [ImuFrame; W],
    next: usize,
}

impl<const W: usize> ImuWindow<W> {
    const LOG2: u32 = {
        assert!(W.is_power_of_two(), "IMU window must be a power of two");
        assert!(W <= 1 << 16, "IMU window too large for an i32 accumulator");
        W.trailing_zeros()
    };

    /// Create a window filled with zero frames.
    pub fn new() -> Self {
        let _ = Self::LOG2;
        Self {
            slots: [ImuFrame::default(); W],
            next: 0,
        }
    }

    /// Overwrite the oldest slot.
    pub fn push(&mut self, frame: ImuFrame) {
        self.slots[self.next] = frame;
        self.next = (self.next + 1) % W;
    }

    /// Per-channel floor of the window mean.
    pub fn average(&self) -> ImuFrame {
        let mut sums = [0i32; CHANNELS];
        for slot in &self.slots {
            for (sum, value) in sums.iter_mut().zip(slot.channels()) {
                *sum += i32::from(value);
            }
        }

        // Arithmetic shift: floors toward negative infinity.
        ImuFrame::from_channels(sums.map(|sum| (sum >> Self::LOG2) as i16))
    }
}

impl<const W: usize> Default for ImuWindow<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize> ImuSource for ImuWindow<W> {
    fn measurement(&mut self) -> ImuFrame {
        self.average()
    }
}

/// Couples a sensor with its averaging window.
pub struct ImuSampler<S, const W: usize> {
    sensor: S,
    window: ImuWindow<W>,
}

impl<S: MotionSensor, const W: usize> ImuSampler<S, W> {
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            window: ImuWindow::new(),
        }
    }

    /// Read one frame into the window. On a read error the window is left unchanged.
    pub fn sample(&mut self) -> Result<(), S::Error> {
        let frame = self.sensor.read_motion9()?;
        self.window.push(frame);
        Ok(())
    }

    #[inline]
    pub fn average(&self) -> ImuFrame {
        self.window.average()
    }
}

impl<S: MotionSensor, const W: usize> ImuSource for ImuSampler<S, W> {
    fn measurement(&mut self) -> ImuFrame {
        self.average()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_averages_to_zero() {
        let window: ImuWindow<4> = ImuWindow::new();
        assert_eq!(window.average(), ImuFrame::default());
    }

    #[test]
    fn single_slot_window_is_identity() {
        let mut window: ImuWindow<1> = ImuWindow::new();
        let frame = ImuFrame::from_channels([1, -2, 3, -4, 5, -6, 7, -8, i16::MIN]);
        window.push(frame);
        assert_eq!(window.average(), frame);
    }

    #[test]
    fn push_wraps_to_oldest_slot() {
        let mut window: ImuWindow<2> = ImuWindow::new();
        for value in [10, 20, 30] {
            window.push(ImuFrame::from_channels([value; CHANNELS]));
        }
        // slots hold 30 and 20
        assert_eq!(window.average().accel, [25; 3]);
    }
}
