// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic tick interrupt on TIM2 using direct PAC register access.
//!
//! TIM2 is a 32-bit up-counter; with the prescaler at 1:1 the reload value alone sets the rate,
//! so any 16-bit tick rate fits without prescaling.

use stm32f7xx_hal::pac;

pub struct TickTimer {
    tim: pac::TIM2,
    clock_hz: u32,
}

impl TickTimer {
    /// Configure TIM2 for update interrupts. `clock_hz` is the timer kernel clock.
    ///
    /// The counter is left stopped until [`Self::start`].
    pub fn tim2(tim2: pac::TIM2, clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // Prescaler 1:1
        tim.psc.write(|w| w.psc().bits(0));

        // Interrupt on update (overflow)
        tim.dier.modify(|_, w| w.uie().set_bit());

        Self { tim, clock_hz }
    }

    /// (Re)start the counter at `hz`. Returns the rate actually achieved after integer
    /// truncation of the reload value.
    pub fn start(&mut self, hz: u16) -> u16 {
        let reload = (self.clock_hz / u32::from(hz.max(1))).max(1);

        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
        self.tim.arr.write(|w| w.bits(reload - 1));
        self.tim.cnt.write(|w| w.bits(0));

        // Latch ARR/PSC, then drop the update flag that generated
        self.tim.egr.write(|w| w.ug().set_bit());
        self.tim.sr.modify(|_, w| w.uif().clear_bit());

        self.tim.cr1.modify(|_, w| w.cen().set_bit());

        (self.clock_hz / reload).min(u32::from(u16::MAX)) as u16
    }

    /// Clear the pending update flag. Called first thing in the TIM2 handler.
    #[inline]
    pub fn clear_update() {
        let tim = unsafe { &*pac::TIM2::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }
}
