// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Receive queue between the USART interrupt and the main loop.
//!
//! The interrupt drains the receiver into the queue as soon as a byte lands, so slow work in the
//! main loop (blocking I2C reads) never overruns the one-byte receive register.

use embedded_hal::serial::Read;
use heapless::spsc::Queue;

use crate::config::RX_QUEUE_LEN;

pub type RxQueue = Queue<u8, RX_QUEUE_LEN>;

/// What one drain pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RxStats {
    pub received: usize,
    /// Bytes lost because the queue was full.
    pub overflowed: usize,
    /// Overrun, framing, noise or parity errors reported by the receiver.
    pub line_errors: usize,
}

/// Move every byte `rx` currently holds into `queue`.
pub fn receive_pending<R: Read<u8>>(rx: &mut R, queue: &mut RxQueue) -> RxStats {
    let mut stats = RxStats::default();
    loop {
        match rx.read() {
            Ok(byte) => match queue.enqueue(byte) {
                Ok(()) => stats.received += 1,
                Err(_) => stats.overflowed += 1,
            },
            Err(nb::Error::WouldBlock) => return stats,
            Err(nb::Error::Other(_)) => stats.line_errors += 1,
        }
    }
}
