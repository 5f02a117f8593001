//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use kokuban_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    DisconnectConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, MessageRouter,
};

use super::{
    config::ServerConfig,
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket relay server
///
/// Accepts WebSocket upgrades on `/` and `/ws`; every connection is wired to
/// the message router and purged from the registry when it ends.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     config,
///     message_router,
///     disconnect_connection_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
///     clock,
/// );
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// MessageRouter（エンベロープの振り分け）
    message_router: Arc<MessageRouter>,
    /// DisconnectConnectionUseCase（接続切断のユースケース）
    disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    clock: Arc<dyn Clock>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        config: ServerConfig,
        message_router: Arc<MessageRouter>,
        disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            message_router,
            disconnect_connection_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            clock,
        }
    }

    /// Build the axum application with all routes.
    pub fn app(&self) -> Router {
        let app_state = Arc::new(AppState {
            message_router: self.message_router.clone(),
            disconnect_connection_usecase: self.disconnect_connection_usecase.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
            get_room_detail_usecase: self.get_room_detail_usecase.clone(),
            outbound_capacity: self.config.outbound_capacity,
            clock: self.clock.clone(),
        });

        Router::new()
            // WebSocket エンドポイント（ホワイトボードはホスト直下に接続する）
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{*room}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
