// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI Nucleo-144 with an Arduino CNC shield on the Zio header.

use stm32f7xx_hal::{
    gpio::{gpiob, gpiod, gpioe, gpiof, Alternate, OpenDrain, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);
/// ```
pub struct BoardPins {
    pub usart3: Usart3Pins,
    pub shield: ShieldPins,
    pub i2c1: I2c1Pins,
}

/// USART3 routed to the ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// CNC shield step/direction/enable lines (Arduino D2..D8).
pub struct ShieldPins {
    pub x_step: gpiof::PF15<Output<PushPull>>, // D2
    pub y_step: gpioe::PE13<Output<PushPull>>, // D3
    pub z_step: gpiof::PF14<Output<PushPull>>, // D4
    pub x_dir: gpioe::PE11<Output<PushPull>>,  // D5
    pub y_dir: gpioe::PE9<Output<PushPull>>,   // D6
    pub z_dir: gpiof::PF13<Output<PushPull>>,  // D7
    pub enable: gpiof::PF12<Output<PushPull>>, // D8, active-low
}

/// I2C1 on the Arduino SCL/SDA pins, wired to the MPU-9250.
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>, // D15
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>, // D14
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE, gpiof: pac::GPIOF) -> Self {
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();

        Self {
            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            shield: ShieldPins {
                x_step: gpiof.pf15.into_push_pull_output(),
                y_step: gpioe.pe13.into_push_pull_output(),
                z_step: gpiof.pf14.into_push_pull_output(),
                x_dir: gpioe.pe11.into_push_pull_output(),
                y_dir: gpioe.pe9.into_push_pull_output(),
                z_dir: gpiof.pf13.into_push_pull_output(),
                enable: gpiof.pf12.into_push_pull_output(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },
        }
    }
}
