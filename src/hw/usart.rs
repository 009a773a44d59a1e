// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host link over USART.
//!
//! On the Nucleo-144, USART3 is wired to the ST-LINK virtual COM port, so the host sees the board
//! as a USB serial device. The receive half is serviced from the RXNE interrupt into an
//! [`RxQueue`]; transmit blocks per byte from the main loop.

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Event, Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::rx::{receive_pending, RxQueue};

pub struct HostSerial<U: Instance> {
    tx: Tx<U>,
}

/// Receive half, owned by the USART interrupt.
pub struct HostRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> HostSerial<U> {
    /// Split the port with the receive interrupt enabled. The NVIC line is left to the caller.
    pub fn new<PINS: Pins<U>>(mut serial: Serial<U, PINS>) -> (Self, HostRx<U>) {
        serial.listen(Event::Rxne);
        let (tx, rx) = serial.split();
        (Self { tx }, HostRx { rx })
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

impl<U: Instance> HostRx<U> {
    /// Drain the receiver into `queue`. Called from the USART interrupt.
    pub fn receive_into(&mut self, queue: &mut RxQueue) {
        let _stats = receive_pending(&mut self.rx, queue);

        #[cfg(feature = "defmt")]
        {
            if _stats.overflowed > 0 || _stats.line_errors > 0 {
                defmt::warn!(
                    "host rx: {=usize} bytes dropped, {=usize} line errors",
                    _stats.overflowed,
                    _stats.line_errors
                );
            }
        }
    }
}
