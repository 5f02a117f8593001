//! Room-scoped WebSocket relay for the Kokuban whiteboard.
//!
//! Clients join named rooms and every `send_message` envelope is forwarded
//! verbatim to the current members of its room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
