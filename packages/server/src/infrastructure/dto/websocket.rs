//! WebSocket envelope DTOs.

use serde::Deserialize;

/// Routing directive carried in `back_type`.
///
/// Kept apart from the payload's own `type` field, which belongs to the
/// whiteboard and is never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackType {
    Join,
    Leave,
    SendMessage,
}

/// The fields the relay reads from an inbound envelope.
///
/// Any other field is ignored during decoding and survives in the raw text
/// that gets forwarded.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeHeader {
    pub back_type: BackType,
    pub room: String,
}
