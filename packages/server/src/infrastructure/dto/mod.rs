//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: routing header of inbound WebSocket envelopes
//! - `http`: HTTP inspection API responses

pub mod conversion;
pub mod http;
pub mod websocket;

pub use conversion::{EnvelopeError, decode_envelope};
