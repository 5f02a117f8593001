//! Utilities shared by the Kokuban relay server and CLI client.

pub mod logger;
pub mod time;
