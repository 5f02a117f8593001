//! Terminal client for the Kokuban relay with reconnection support.
//!
//! Joins a room, sends each stdin line to the current room as a
//! `send_message` envelope, and prints everything relayed back.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval) and re-joins its rooms.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-client -- --room alpha
//! cargo run --bin kokuban-client -- -r alpha -u ws://127.0.0.1:8080/
//! ```

use clap::Parser;

use kokuban_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kokuban-client")]
#[command(about = "Terminal client for the Kokuban room relay", long_about = None)]
struct Args {
    /// Room to join on connect
    #[arg(short = 'r', long)]
    room: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "KOKUBAN_URL", default_value = "ws://127.0.0.1:8080/")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = kokuban_client::run_client(args.url, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
