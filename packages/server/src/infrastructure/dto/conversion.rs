//! Conversion between wire DTOs and domain types.

use std::sync::Arc;

use kokuban_shared::time::millis_to_rfc3339;
use thiserror::Error;

use crate::domain::{Connection, ConnectionState, Envelope, RoomKey, RoomSummary};

use super::{
    http::{MemberDto, RoomSummaryDto},
    websocket::{BackType, EnvelopeHeader},
};

/// Reasons an inbound frame is not a routable envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("envelope is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("envelope is not a JSON object")]
    NotAnObject,

    #[error("envelope has no usable routing header: {0}")]
    InvalidHeader(#[source] serde_json::Error),
}

/// Decode an inbound text frame into its routing view.
///
/// Decoding is permissive: unknown fields are ignored. It fails only when
/// the frame is not a JSON object or when `back_type` or `room` is missing,
/// has the wrong type, or names an unknown action.
pub fn decode_envelope(text: &str) -> Result<Envelope, EnvelopeError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(EnvelopeError::InvalidJson)?;
    if !value.is_object() {
        return Err(EnvelopeError::NotAnObject);
    }

    let header: EnvelopeHeader =
        serde_json::from_value(value).map_err(EnvelopeError::InvalidHeader)?;
    Ok(header.into_envelope(text))
}

impl EnvelopeHeader {
    /// Combine the header with the original frame text.
    pub fn into_envelope(self, raw: &str) -> Envelope {
        let room = RoomKey::from(self.room);
        match self.back_type {
            BackType::Join => Envelope::Join { room },
            BackType::Leave => Envelope::Leave { room },
            BackType::SendMessage => Envelope::Broadcast {
                room,
                payload: raw.to_string(),
            },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room: summary.room.into_string(),
            members: summary.member_count,
        }
    }
}

impl From<&Arc<Connection>> for MemberDto {
    fn from(connection: &Arc<Connection>) -> Self {
        let state = match connection.state() {
            ConnectionState::Open => "open",
            ConnectionState::Closing => "closing",
            ConnectionState::Closed => "closed",
        };
        Self {
            connection_id: connection.id().to_string(),
            connected_at: millis_to_rfc3339(connection.connected_at().value()),
            state: state.to_string(),
        }
    }
}
