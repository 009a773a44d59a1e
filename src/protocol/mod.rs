// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Host Protocol
//!
//! ## Modules
//!
//! - [`messages`] - Command ids, payload layouts and request decoding.
//! - [`codec`] - Little-endian byte composition helpers.
//! - [`dispatcher`] - Applies decoded requests to the pulse engine.
//! - [`parser`] - Byte-wise packet deframer.
//! - [`response`] - Reply framing with ACK/NACK.
//! - [`rx`] - Interrupt-fed receive queue.

pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod parser;
pub mod response;
pub mod rx;

pub use dispatcher::{CommandDispatcher, Response};
pub use error::DispatchError;
pub use messages::{CommandId, Request};
pub use parser::{Packet, Parser};
pub use response::{encode_packet, encode_reply, Frame};
pub use rx::{receive_pending, RxQueue, RxStats};
