//! UseCase layer errors.

use thiserror::Error;

/// Errors from read-only room queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomQueryError {
    /// No live member is in the room (empty rooms are not kept)
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
