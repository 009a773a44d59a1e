// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use std::collections::HashMap;

use cnc_pfm::config::IMU_WINDOW;
use cnc_pfm::imu::frame::CHANNELS;
use cnc_pfm::imu::mpu9250::{mag_reg, reg, AK8963_ADDRESS, DEFAULT_ADDRESS};
use cnc_pfm::imu::{ImuFrame, ImuSampler, ImuSource, ImuWindow, MotionSensor, Mpu9250, Mpu9250Error};
use embedded_hal::blocking::i2c::{Write, WriteRead};
use proptest::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BusFault;

/// Register-file I2C bus. Reads auto-increment from the addressed register.
#[derive(Default)]
struct MockI2c {
    registers: HashMap<(u8, u8), u8>,
    writes: Vec<(u8, Vec<u8>)>,
    fail: bool,
}

impl MockI2c {
    fn with_block(mut self, address: u8, start: u8, bytes: &[u8]) -> Self {
        for (i, &b) in bytes.iter().enumerate() {
            self.registers.insert((address, start + i as u8), b);
        }
        self
    }
}

impl Write for MockI2c {
    type Error = BusFault;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusFault> {
        if self.fail {
            return Err(BusFault);
        }
        self.writes.push((address, bytes.to_vec()));
        Ok(())
    }
}

impl WriteRead for MockI2c {
    type Error = BusFault;

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), BusFault> {
        if self.fail {
            return Err(BusFault);
        }
        let start = bytes[0];
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self
                .registers
                .get(&(address, start + i as u8))
                .copied()
                .unwrap_or(0);
        }
        Ok(())
    }
}

/// Sensor that replays a list of frames, then fails.
struct ScriptedSensor {
    frames: Vec<ImuFrame>,
}

impl MotionSensor for ScriptedSensor {
    type Error = BusFault;

    fn read_motion9(&mut self) -> Result<ImuFrame, BusFault> {
        if self.frames.is_empty() {
            Err(BusFault)
        } else {
            Ok(self.frames.remove(0))
        }
    }
}

#[rstest]
#[case(0x71)]
#[case(0x73)]
fn initialize_configures_device(#[case] who_am_i: u8) {
    let bus = MockI2c::default().with_block(DEFAULT_ADDRESS, reg::WHO_AM_I, &[who_am_i]);
    let mut mpu = Mpu9250::new(bus);

    assert!(mpu.initialize().is_ok());

    let bus = mpu.free();
    assert_eq!(
        bus.writes,
        vec![
            (DEFAULT_ADDRESS, vec![reg::PWR_MGMT_1, 0x01]),
            (DEFAULT_ADDRESS, vec![reg::GYRO_CONFIG, 0x00]),
            (DEFAULT_ADDRESS, vec![reg::ACCEL_CONFIG, 0x00]),
            (DEFAULT_ADDRESS, vec![reg::INT_PIN_CFG, 0x02]),
            (AK8963_ADDRESS, vec![mag_reg::CNTL1, 0x16]),
        ]
    );
}

#[test]
fn wrong_device_is_reported_before_any_write() {
    let bus = MockI2c::default().with_block(DEFAULT_ADDRESS, reg::WHO_AM_I, &[0x68]);
    let mut mpu = Mpu9250::new(bus);

    assert!(matches!(
        mpu.initialize(),
        Err(Mpu9250Error::WrongDevice(0x68))
    ));
    assert!(mpu.free().writes.is_empty());
}

#[test]
fn bus_errors_propagate() {
    let mut mpu = Mpu9250::new(MockI2c {
        fail: true,
        ..MockI2c::default()
    });
    assert!(matches!(mpu.working_status(), Err(Mpu9250Error::Bus(BusFault))));
    assert!(matches!(mpu.read_motion9(), Err(Mpu9250Error::Bus(BusFault))));
}

#[test]
fn motion9_decodes_both_byte_orders() {
    let bus = MockI2c::default()
        .with_block(
            DEFAULT_ADDRESS,
            reg::ACCEL_XOUT_H,
            &[
                0x01, 0x02, // ax
                0xFF, 0xFE, // ay
                0x7F, 0xFF, // az
                0x12, 0x34, // temperature, skipped
                0x80, 0x00, // gx
                0x00, 0x10, // gy
                0xFF, 0xFF, // gz
            ],
        )
        .with_block(
            AK8963_ADDRESS,
            mag_reg::HXL,
            &[
                0x02, 0x01, // mx
                0xFE, 0xFF, // my
                0x00, 0x80, // mz
                0x00, // ST2
            ],
        );
    let mut mpu = Mpu9250::new(bus);

    let frame = mpu.read_motion9().unwrap();

    assert_eq!(frame.accel, [0x0102, -2, i16::MAX]);
    assert_eq!(frame.gyro, [i16::MIN, 0x0010, -1]);
    assert_eq!(frame.mag, [0x0102, -2, i16::MIN]);
}

#[test]
fn window_average_floors_negative_sums() {
    let mut window: ImuWindow<IMU_WINDOW> = ImuWindow::new();
    window.push(ImuFrame::from_channels([-1, 1, -31, 31, -32, 32, -33, 33, 0]));

    assert_eq!(
        window.average().channels(),
        [-1, 0, -1, 0, -1, 1, -2, 1, 0]
    );
}

#[test]
fn sampler_keeps_window_on_read_error() {
    let frame = ImuFrame::from_channels([64; CHANNELS]);
    let mut sampler: ImuSampler<_, 2> = ImuSampler::new(ScriptedSensor {
        frames: vec![frame, frame],
    });

    sampler.sample().unwrap();
    sampler.sample().unwrap();
    assert_eq!(sampler.sample(), Err(BusFault));
    assert_eq!(sampler.measurement(), frame);
}

#[test]
fn sampler_ramps_up_from_zero() {
    let frame = ImuFrame::from_channels([400; CHANNELS]);
    let mut sampler: ImuSampler<_, 4> = ImuSampler::new(ScriptedSensor {
        frames: vec![frame; 3],
    });

    let mut seen = Vec::new();
    while sampler.sample().is_ok() {
        seen.push(sampler.average().accel[0]);
    }
    assert_eq!(seen, vec![100, 200, 300]);
}

fn frame_strategy() -> impl Strategy<Value = ImuFrame> {
    prop::array::uniform9(any::<i16>()).prop_map(ImuFrame::from_channels)
}

proptest! {
    #[test]
    fn average_is_floor_of_window_mean(
        frames in prop::collection::vec(frame_strategy(), 0..100),
    ) {
        let mut window: ImuWindow<IMU_WINDOW> = ImuWindow::new();
        for frame in &frames {
            window.push(*frame);
        }

        // The window holds the last IMU_WINDOW frames, zero-padded while filling up.
        let recent = &frames[frames.len().saturating_sub(IMU_WINDOW)..];
        let average = window.average().channels();
        for ch in 0..CHANNELS {
            let sum: i64 = recent.iter().map(|f| i64::from(f.channels()[ch])).sum();
            prop_assert_eq!(i64::from(average[ch]), sum.div_euclid(IMU_WINDOW as i64));
        }
    }
}
