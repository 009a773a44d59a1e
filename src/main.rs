// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::entry;
use critical_section::Mutex;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    i2c::{BlockingI2c, Mode},
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use cnc_pfm::config::{
    CNC_SHIELD_PINS, DEFAULT_TICK_RATE, HOST_BAUD_RATE, IMU_SAMPLE_RATE_HZ, IMU_WINDOW,
};
use cnc_pfm::hw::{BoardPins, HostRx, HostSerial, NucleoShield, TickTimer};
use cnc_pfm::imu::{ImuSampler, Mpu9250};
use cnc_pfm::pfm::PulseEngine;
use cnc_pfm::protocol::{encode_reply, CommandDispatcher, Parser, Response, RxQueue};

/// Shared between the main loop and the TIM2 interrupt.
static ENGINE: Mutex<RefCell<Option<PulseEngine<NucleoShield>>>> = Mutex::new(RefCell::new(None));

/// Receive half of the host link, serviced by the USART3 interrupt.
static HOST_RX: Mutex<RefCell<Option<HostRx<pac::USART3>>>> = Mutex::new(RefCell::new(None));

/// Bytes received from the host, filled by USART3 and drained by the main loop.
static RX_QUEUE: Mutex<RefCell<RxQueue>> = Mutex::new(RefCell::new(RxQueue::new()));

/// I2C data timeout for the IMU bus.
const I2C_TIMEOUT_US: u32 = 1_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb1 = rcc.apb1;

    // GPIO
    let pins = BoardPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: HOST_BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let (mut host, host_rx) = HostSerial::new(serial);
    critical_section::with(|cs| HOST_RX.borrow_ref_mut(cs).replace(host_rx));

    // I2C1 + MPU-9250
    let i2c = BlockingI2c::i2c1(
        dp.I2C1,
        (pins.i2c1.scl, pins.i2c1.sda),
        Mode::fast(400_000.Hz()),
        &clocks,
        &mut apb1,
        I2C_TIMEOUT_US,
    );
    let mut mpu = Mpu9250::new(i2c);
    let imu_ready = match mpu.initialize() {
        Ok(()) => true,
        Err(e) => {
            defmt::error!("imu: init failed: {}", defmt::Debug2Format(&e));
            false
        }
    };
    let mut imu: ImuSampler<_, IMU_WINDOW> = ImuSampler::new(mpu);

    // SysTick paces IMU reads; polled through its wrap flag
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.hclk().raw() / IMU_SAMPLE_RATE_HZ - 1);
    syst.clear_current();
    syst.enable_counter();

    // Pulse engine on TIM2
    let timer = TickTimer::tim2(dp.TIM2, clocks.timclk1().raw());
    let shield = NucleoShield::new(pins.shield, timer);
    let engine = PulseEngine::init(shield, CNC_SHIELD_PINS, [0; 3]);

    critical_section::with(|cs| {
        let mut slot = ENGINE.borrow_ref_mut(cs);
        let engine = slot.insert(engine);
        engine.set_tick_rate(DEFAULT_TICK_RATE);
        defmt::info!("pfm: tick rate {=u16} Hz", engine.tick_rate());
    });

    unsafe {
        NVIC::unmask(pac::Interrupt::TIM2);
        NVIC::unmask(pac::Interrupt::USART3);
    }

    let mut parser = Parser::new();
    let mut response = Response::new();

    loop {
        if imu_ready && syst.has_wrapped() && imu.sample().is_err() {
            defmt::debug!("imu: read failed");
        }

        let Some(byte) = critical_section::with(|cs| RX_QUEUE.borrow_ref_mut(cs).dequeue()) else {
            continue;
        };

        let Some(packet) = parser.push(byte) else {
            continue;
        };

        let result = critical_section::with(|cs| {
            ENGINE.borrow_ref_mut(cs).as_mut().map(|engine| {
                CommandDispatcher::new(engine, &mut imu).process(
                    packet.command,
                    &packet.payload,
                    &mut response,
                )
            })
        });
        let accepted = matches!(result, Some(Ok(())));

        if let Some(frame) = encode_reply(packet.command, accepted, &response) {
            host.write_bytes(&frame);
        }
    }
}

#[interrupt]
fn TIM2() {
    TickTimer::clear_update();

    critical_section::with(|cs| {
        if let Some(engine) = ENGINE.borrow_ref_mut(cs).as_mut() {
            engine.tick();
        }
    });
}

#[interrupt]
fn USART3() {
    critical_section::with(|cs| {
        if let Some(rx) = HOST_RX.borrow_ref_mut(cs).as_mut() {
            rx.receive_into(&mut RX_QUEUE.borrow_ref_mut(cs));
        }
    });
}
