//! Room-scoped WebSocket relay server.
//!
//! Clients send `{"back_type": "join" | "leave" | "send_message", "room": ...}`
//! envelopes; `send_message` envelopes are forwarded verbatim to every member
//! of the room, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-server
//! cargo run --bin kokuban-server -- --host 0.0.0.0 --port 3000
//! PORT=10000 cargo run --bin kokuban-server
//! ```

use std::sync::Arc;

use clap::Parser;
use kokuban_server::{
    domain::RoomRegistry,
    infrastructure::repository::InMemoryRoomRegistry,
    ui::{Server, ServerConfig},
    usecase::{
        BroadcastMessageUseCase, DisconnectConnectionUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MessageRouter,
    },
};
use kokuban_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "kokuban-server")]
#[command(about = "Room-scoped WebSocket relay for the Kokuban whiteboard", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "KOKUBAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Envelopes buffered per connection before further sends to it are dropped
    #[arg(
        long,
        env = "KOKUBAN_OUTBOUND_CAPACITY",
        default_value = "64",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    outbound_capacity: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ServerConfig::new(args.host, args.port, usize::from(args.outbound_capacity));

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. MessageRouter
    // 4. Server

    // 1. Create Registry (in-memory, lives as long as the server)
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let broadcast_message_usecase = Arc::new(BroadcastMessageUseCase::new(registry.clone()));
    let disconnect_connection_usecase =
        Arc::new(DisconnectConnectionUseCase::new(registry.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry));

    // 3. Create MessageRouter
    let message_router = Arc::new(MessageRouter::new(
        join_room_usecase,
        leave_room_usecase,
        broadcast_message_usecase,
    ));

    // 4. Create and run the server
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let server = Server::new(
        config,
        message_router,
        disconnect_connection_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        clock,
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
