// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reply framing.
//!
//! Replies use the request framing with the command byte echoed. The data section is the
//! command's response bytes, or a single ACK/NACK byte when there are none.

use heapless::Vec;

use crate::config::MAX_PAYLOAD;
use crate::protocol::messages::{END_BYTES, PKT_ACK, PKT_NACK, START_BYTES};

/// Start marker, size, command and end marker.
const OVERHEAD: usize = START_BYTES.len() + 2 + END_BYTES.len();

pub const FRAME_CAPACITY: usize = MAX_PAYLOAD + OVERHEAD;

pub type Frame = Vec<u8, FRAME_CAPACITY>;

/// Frame `command` + `data`. Returns `None` if `data` exceeds [`MAX_PAYLOAD`].
pub fn encode_packet(command: u8, data: &[u8]) -> Option<Frame> {
    if data.len() > MAX_PAYLOAD {
        return None;
    }

    let mut frame = Frame::new();
    frame.extend_from_slice(&START_BYTES).ok()?;
    frame.push(data.len() as u8 + 1).ok()?;
    frame.push(command).ok()?;
    frame.extend_from_slice(data).ok()?;
    frame.extend_from_slice(&END_BYTES).ok()?;
    Some(frame)
}

/// Build the reply for a processed command.
pub fn encode_reply(command: u8, accepted: bool, data: &[u8]) -> Option<Frame> {
    match (accepted, data.is_empty()) {
        (true, false) => encode_packet(command, data),
        (true, true) => encode_packet(command, &[PKT_ACK]),
        (false, _) => encode_packet(command, &[PKT_NACK]),
    }
}
