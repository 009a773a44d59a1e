// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Packet parser for the host link.
//!
//! Frames look like
//!
//! ```text
//! 0xAA 0xBB | size | command | data (size - 1 bytes) | 0xCC 0xDD
//! ```
//!
//! where `size` counts the command byte plus data. The parser is fed one byte at a time and
//! resynchronises on the next start marker after a malformed frame.

use heapless::Vec;

use crate::config::MAX_PAYLOAD;
use crate::protocol::messages::{END_BYTES, START_BYTES};

/// A deframed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub command: u8,
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

enum State {
    WaitStart,
    WaitStartSecond,
    WaitSize,
    WaitCommand { remaining: u8 },
    WaitData { remaining: u8 },
    WaitEnd,
    WaitEndSecond,
}

pub struct Parser {
    state: State,
    command: u8,
    payload: Vec<u8, MAX_PAYLOAD>,
    dropped: u32,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            command: 0,
            payload: Vec::new(),
            dropped: 0,
        }
    }

    /// Frames discarded since start-up.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Process a single incoming byte. Returns `Some(Packet)` when a complete frame is received.
    pub fn push(&mut self, byte: u8) -> Option<Packet> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTES[0] {
                    self.state = State::WaitStartSecond;
                }
            }
            State::WaitStartSecond => {
                self.state = if byte == START_BYTES[1] {
                    State::WaitSize
                } else if byte == START_BYTES[0] {
                    State::WaitStartSecond
                } else {
                    State::WaitStart
                };
            }
            State::WaitSize => {
                let data_len = usize::from(byte).saturating_sub(1);
                if byte == 0 || data_len > MAX_PAYLOAD {
                    self.reject(byte);
                } else {
                    self.payload.clear();
                    self.state = State::WaitCommand { remaining: byte - 1 };
                }
            }
            State::WaitCommand { remaining } => {
                self.command = byte;
                self.state = if remaining == 0 {
                    State::WaitEnd
                } else {
                    State::WaitData { remaining }
                };
            }
            State::WaitData { remaining } => {
                // Capacity was checked against `size` already.
                let _ = self.payload.push(byte);
                self.state = if remaining == 1 {
                    State::WaitEnd
                } else {
                    State::WaitData {
                        remaining: remaining - 1,
                    }
                };
            }
            State::WaitEnd => {
                if byte == END_BYTES[0] {
                    self.state = State::WaitEndSecond;
                } else {
                    self.reject(byte);
                }
            }
            State::WaitEndSecond => {
                if byte == END_BYTES[1] {
                    self.state = State::WaitStart;
                    return Some(Packet {
                        command: self.command,
                        payload: core::mem::take(&mut self.payload),
                    });
                }
                self.reject(byte);
            }
        }
        None
    }

    /// Drop the frame in progress. The offending byte may itself open the next frame.
    fn reject(&mut self, byte: u8) {
        self.dropped = self.dropped.wrapping_add(1);
        self.payload.clear();
        self.state = if byte == START_BYTES[0] {
            State::WaitStartSecond
        } else {
            State::WaitStart
        };

        #[cfg(feature = "defmt")]
        defmt::warn!("link: dropped malformed frame ({=u32} total)", self.dropped);
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut Parser, bytes: &[u8]) -> Option<Packet> {
        bytes.iter().find_map(|&b| parser.push(b))
    }

    #[test]
    fn command_without_data() {
        let mut parser = Parser::new();
        let packet = feed(&mut parser, &[0xAA, 0xBB, 0x01, 0x06, 0xCC, 0xDD]);
        assert_eq!(packet.map(|p| (p.command, p.payload.len())), Some((0x06, 0)));
    }

    #[test]
    fn zero_size_is_dropped() {
        let mut parser = Parser::new();
        assert_eq!(feed(&mut parser, &[0xAA, 0xBB, 0x00, 0xCC, 0xDD]), None);
        assert_eq!(parser.dropped(), 1);
    }

    #[test]
    fn repeated_start_byte_still_syncs() {
        let mut parser = Parser::new();
        let packet = feed(&mut parser, &[0xAA, 0xAA, 0xBB, 0x01, 0x0A, 0xCC, 0xDD]);
        assert_eq!(packet.map(|p| p.command), Some(0x0A));
    }
}
