//! WebSocket relay server implementation.

pub mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::ServerConfig;
pub use server::Server;
pub use signal::shutdown_signal;
