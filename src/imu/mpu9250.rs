// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! InvenSense MPU-9250 9-axis IMU over I2C.
//!
//! Accelerometer and gyroscope are read from the MPU-6500 die; the AK8963 magnetometer is reached
//! through the I2C bypass and sits on the same bus at its own address.
//!
//! Full-scale ranges are left at the reset defaults (±2 g, ±250 °/s, 16-bit magnetometer).

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::imu::frame::ImuFrame;
use crate::imu::MotionSensor;

/// Default I2C address (AD0 low).
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// AK8963 magnetometer address once bypass is enabled.
pub const AK8963_ADDRESS: u8 = 0x0C;

// MPU-9250 register addresses
pub mod reg {
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const INT_PIN_CFG: u8 = 0x37;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

// AK8963 register addresses
pub mod mag_reg {
    pub const HXL: u8 = 0x03;
    pub const CNTL1: u8 = 0x0A;
}

/// WHO_AM_I values of the MPU-9250 and its MPU-9255 sibling.
const WHO_AM_I_VALUES: [u8; 2] = [0x71, 0x73];

/// PWR_MGMT_1: wake, clock from the gyro PLL.
const CLKSEL_PLL: u8 = 0x01;

/// INT_PIN_CFG: expose the auxiliary bus to the host.
const BYPASS_EN: u8 = 1 << 1;

/// CNTL1: 16-bit output, continuous measurement mode 2 (100 Hz).
const MAG_CONTINUOUS_16BIT: u8 = 0x16;

#[derive(Debug, thiserror::Error)]
pub enum Mpu9250Error<E> {
    #[error("i2c bus error: {0:?}")]
    Bus(E),

    #[error("unexpected WHO_AM_I 0x{0:02X}")]
    WrongDevice(u8),
}

/// MPU-9250 driver owning its I2C bus.
pub struct Mpu9250<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Mpu9250<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
        }
    }

    /// Release the I2C bus.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// Wake the device, set full-scale ranges and start the magnetometer.
    pub fn initialize(&mut self) -> Result<(), Mpu9250Error<E>> {
        self.working_status()?;

        self.write_reg(reg::PWR_MGMT_1, CLKSEL_PLL)?;
        self.write_reg(reg::GYRO_CONFIG, 0x00)?;
        self.write_reg(reg::ACCEL_CONFIG, 0x00)?;
        self.write_reg(reg::INT_PIN_CFG, BYPASS_EN)?;

        self.i2c
            .write(AK8963_ADDRESS, &[mag_reg::CNTL1, MAG_CONTINUOUS_16BIT])
            .map_err(Mpu9250Error::Bus)
    }

    /// Check the WHO_AM_I register.
    pub fn working_status(&mut self) -> Result<(), Mpu9250Error<E>> {
        let who = self.read_reg(reg::WHO_AM_I)?;
        if WHO_AM_I_VALUES.contains(&who) {
            Ok(())
        } else {
            Err(Mpu9250Error::WrongDevice(who))
        }
    }

    /// Read accel, gyro and magnetometer in one go.
    pub fn read_motion9(&mut self) -> Result<ImuFrame, Mpu9250Error<E>> {
        // ACCEL_XOUT_H..GYRO_ZOUT_L, big-endian, temperature in the middle
        let mut buf = [0u8; 14];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)
            .map_err(Mpu9250Error::Bus)?;

        let be = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        let accel = [be(0), be(2), be(4)];
        let gyro = [be(8), be(10), be(12)];

        // HXL..HZH little-endian, then ST2 which must be read to latch the next sample
        let mut mag = [0u8; 7];
        self.i2c
            .write_read(AK8963_ADDRESS, &[mag_reg::HXL], &mut mag)
            .map_err(Mpu9250Error::Bus)?;

        let le = |i: usize| i16::from_le_bytes([mag[i], mag[i + 1]]);

        Ok(ImuFrame {
            accel,
            gyro,
            mag: [le(0), le(2), le(4)],
        })
    }

    fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), Mpu9250Error<E>> {
        self.i2c
            .write(self.address, &[addr, value])
            .map_err(Mpu9250Error::Bus)
    }

    fn read_reg(&mut self, addr: u8) -> Result<u8, Mpu9250Error<E>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[addr], &mut buf)
            .map_err(Mpu9250Error::Bus)?;
        Ok(buf[0])
    }
}

impl<I2C, E> MotionSensor for Mpu9250<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    type Error = Mpu9250Error<E>;

    fn read_motion9(&mut self) -> Result<ImuFrame, Self::Error> {
        Mpu9250::read_motion9(self)
    }
}
