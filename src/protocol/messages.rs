// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command message protocol spoken with the host.
//!
//! Request fields are little-endian. Payload sizes are fixed per command.

use num_enum::TryFromPrimitive;

use crate::pfm::AxisMask;
use crate::protocol::codec::{read_i32_le, read_u16_le};
use crate::protocol::error::DispatchError;

/// Packet start marker.
pub const START_BYTES: [u8; 2] = [0xAA, 0xBB];
/// Packet end marker.
pub const END_BYTES: [u8; 2] = [0xCC, 0xDD];

/// Reply data for a successful command without response bytes.
pub const PKT_ACK: u8 = 0xAA;
/// Reply data for a rejected command.
pub const PKT_NACK: u8 = 0xAB;

// Message IDs
pub const CMD_SET_TARGET_FREQ: u8 = 0x01;
pub const CMD_SET_TARGET_DELTA: u8 = 0x02;
pub const CMD_GET_DELTA_STEPS: u8 = 0x03;
pub const CMD_GET_IMU_MEASUREMENT: u8 = 0x04;
pub const CMD_SET_ISR_FREQ: u8 = 0x05;
pub const CMD_ENABLE_CNC: u8 = 0x06;
pub const CMD_DISABLE_CNC: u8 = 0x07;
pub const CMD_SET_DELTA_STEPS: u8 = 0x08;
pub const CMD_GET_ISR_FREQ: u8 = 0x0A;

/// Known command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandId {
    SetTargetFreq = 0x01,
    SetTargetDelta = 0x02,
    GetDeltaSteps = 0x03,
    GetImuMeasurement = 0x04,
    SetIsrFreq = 0x05,
    EnableCnc = 0x06,
    DisableCnc = 0x07,
    SetDeltaSteps = 0x08,
    // 0x09 (stop) is reserved by the host tooling but never handled.
    GetIsrFreq = 0x0A,
}

impl CommandId {
    /// Exact payload length the command must carry.
    pub const fn payload_size(self) -> usize {
        match self {
            CommandId::SetTargetFreq => 4,
            CommandId::SetTargetDelta => 7,
            CommandId::GetDeltaSteps => 1,
            CommandId::GetImuMeasurement => 0,
            CommandId::SetIsrFreq => 2,
            CommandId::EnableCnc => 0,
            CommandId::DisableCnc => 0,
            CommandId::SetDeltaSteps => 5,
            CommandId::GetIsrFreq => 0,
        }
    }
}

/// A fully decoded and validated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    SetTargetFreq {
        axes: AxisMask,
        freq: u16,
        direction: bool,
    },
    SetTargetDelta {
        axes: AxisMask,
        freq: u16,
        target_delta: i32,
    },
    GetDeltaSteps {
        axes: AxisMask,
    },
    GetImuMeasurement,
    SetIsrFreq {
        freq: u16,
    },
    EnableCnc,
    DisableCnc,
    SetDeltaSteps {
        axes: AxisMask,
        value: i32,
    },
    GetIsrFreq,
}

impl Request {
    /// Decode `payload` for `command`. Nothing is applied here.
    ///
    /// Layouts:
    ///
    /// | Command | Bytes |
    /// | ------- | ----- |
    /// | SET_TARGET_FREQ  | mask, freq (2), direction |
    /// | SET_TARGET_DELTA | mask, freq (2), target (4) |
    /// | GET_DELTA_STEPS  | mask |
    /// | SET_ISR_FREQ     | freq (2) |
    /// | SET_DELTA_STEPS  | mask, value (4) |
    pub fn decode(command: u8, payload: &[u8]) -> Result<Self, DispatchError> {
        let id =
            CommandId::try_from(command).map_err(|_| DispatchError::UnknownCommand(command))?;

        let expected = id.payload_size();
        if payload.len() != expected {
            return Err(DispatchError::InvalidPayloadSize {
                command,
                expected,
                actual: payload.len(),
            });
        }

        let request = match id {
            CommandId::SetTargetFreq => Request::SetTargetFreq {
                axes: AxisMask::from_bits_retain(payload[0]),
                freq: nonzero_freq(command, read_u16_le(payload, 1))?,
                direction: payload[3] != 0,
            },
            CommandId::SetTargetDelta => Request::SetTargetDelta {
                axes: AxisMask::from_bits_retain(payload[0]),
                freq: nonzero_freq(command, read_u16_le(payload, 1))?,
                target_delta: read_i32_le(payload, 3),
            },
            CommandId::GetDeltaSteps => Request::GetDeltaSteps {
                axes: AxisMask::from_bits_retain(payload[0]),
            },
            CommandId::GetImuMeasurement => Request::GetImuMeasurement,
            CommandId::SetIsrFreq => Request::SetIsrFreq {
                freq: nonzero_freq(command, read_u16_le(payload, 0))?,
            },
            CommandId::EnableCnc => Request::EnableCnc,
            CommandId::DisableCnc => Request::DisableCnc,
            CommandId::SetDeltaSteps => Request::SetDeltaSteps {
                axes: AxisMask::from_bits_retain(payload[0]),
                value: read_i32_le(payload, 1),
            },
            CommandId::GetIsrFreq => Request::GetIsrFreq,
        };

        Ok(request)
    }
}

#[inline]
fn nonzero_freq(command: u8, freq: u16) -> Result<u16, DispatchError> {
    if freq == 0 {
        Err(DispatchError::ZeroFrequency { command })
    } else {
        Ok(freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_set_target_delta_fields() {
        let payload = [0x05, 0x20, 0x03, 0xFE, 0xFF, 0xFF, 0xFF];
        let request = Request::decode(CMD_SET_TARGET_DELTA, &payload);
        assert_eq!(
            request,
            Ok(Request::SetTargetDelta {
                axes: AxisMask::X | AxisMask::Z,
                freq: 800,
                target_delta: -2,
            })
        );
    }

    #[test]
    fn stop_command_is_not_implemented() {
        assert_eq!(
            Request::decode(0x09, &[]),
            Err(DispatchError::UnknownCommand(0x09))
        );
    }

    #[test]
    fn size_is_checked_before_fields() {
        assert_eq!(
            Request::decode(CMD_SET_ISR_FREQ, &[0x00]),
            Err(DispatchError::InvalidPayloadSize {
                command: CMD_SET_ISR_FREQ,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn any_nonzero_direction_byte_is_forward() {
        let request = Request::decode(CMD_SET_TARGET_FREQ, &[0x01, 0x10, 0x00, 0x7F]);
        assert!(matches!(
            request,
            Ok(Request::SetTargetFreq {
                direction: true,
                ..
            })
        ));
    }
}
