// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

/// Why a command was rejected. Rejected commands never touch the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    #[error("unknown command 0x{0:02X}")]
    UnknownCommand(u8),

    #[error("command 0x{command:02X} expects {expected} payload bytes, got {actual}")]
    InvalidPayloadSize {
        command: u8,
        expected: usize,
        actual: usize,
    },

    #[error("command 0x{command:02X} carries a zero frequency")]
    ZeroFrequency { command: u8 },

    #[error("response to command 0x{command:02X} does not fit the response buffer")]
    ResponseOverflow { command: u8 },
}
