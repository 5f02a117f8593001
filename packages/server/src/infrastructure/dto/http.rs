//! HTTP API response DTOs.

use serde::Serialize;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub members: usize,
}

/// Room member detail
#[derive(Debug, Clone, Serialize)]
pub struct MemberDto {
    pub connection_id: String,
    /// RFC 3339, `null` if the timestamp cannot be rendered
    pub connected_at: Option<String>,
    pub state: String,
}

/// Room detail for the detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RoomDetailDto {
    pub room: String,
    pub members: Vec<MemberDto>,
}
