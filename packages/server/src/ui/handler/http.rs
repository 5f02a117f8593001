//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{HealthDto, MemberDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::RoomQueryError,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

/// Get list of non-empty rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get the members of one room
///
/// The rest of the path is the room key, percent-decoded, so keys containing
/// `/` are addressable. The empty key has no URL and is only visible in the
/// room list.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room.clone()).await {
        Ok(members) => Ok(Json(RoomDetailDto {
            room,
            members: members.iter().map(MemberDto::from).collect(),
        })),
        Err(RoomQueryError::RoomNotFound(room)) => {
            tracing::debug!(%room, "Room detail requested for empty room");
            Err(StatusCode::NOT_FOUND)
        }
    }
}
