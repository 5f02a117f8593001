//! Error types for the relay client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL could not be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Could not establish the connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
}

/// Errors from parsing a line of user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: /{0} <room>")]
    MissingRoom(&'static str),

    #[error("Unknown command: /{0}")]
    UnknownCommand(String),
}
