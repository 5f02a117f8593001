//! Helpers for in-process integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use kokuban_server::{
    domain::RoomRegistry,
    infrastructure::repository::InMemoryRoomRegistry,
    ui::{Server, ServerConfig},
    usecase::{
        BroadcastMessageUseCase, DisconnectConnectionUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MessageRouter,
    },
};
use kokuban_shared::time::{Clock, SystemClock};
use tokio::{net::TcpListener, net::TcpStream, sync::oneshot, time::timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long to wait before concluding that nothing will arrive.
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Relay server running on an ephemeral port for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(16, Arc::new(SystemClock)).await
    }

    pub async fn start_with_capacity(outbound_capacity: usize) -> Self {
        Self::start_with(outbound_capacity, Arc::new(SystemClock)).await
    }

    pub async fn start_with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::start_with(16, clock).await
    }

    async fn start_with(outbound_capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        let config = ServerConfig::new("127.0.0.1", addr.port(), outbound_capacity);
        let server = build_server(config, clock);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve(listener, shutdown).await {
                eprintln!("test server error: {}", e);
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn connect(&self) -> Client {
        let (stream, _) = connect_async(self.ws_url("/"))
            .await
            .expect("Failed to connect to test server");
        stream
    }

    /// Fetch `/api/rooms/{room}` and return the member count (0 on 404).
    pub async fn member_count(&self, room: &str) -> usize {
        let response = reqwest::get(self.http_url(&format!("/api/rooms/{}", room)))
            .await
            .expect("HTTP request failed");
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return 0;
        }
        let body: serde_json::Value = response.json().await.expect("Invalid JSON body");
        body["members"].as_array().map(|m| m.len()).unwrap_or(0)
    }

    /// Poll until `room` has exactly `expected` members.
    pub async fn wait_for_members(&self, room: &str, expected: usize) {
        let result = timeout(RECEIVE_TIMEOUT, async {
            loop {
                if self.member_count(room).await == expected {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await;
        assert!(
            result.is_ok(),
            "room '{}' never reached {} members",
            room,
            expected
        );
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn build_server(config: ServerConfig, clock: Arc<dyn Clock>) -> Server {
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());
    let message_router = Arc::new(MessageRouter::new(
        Arc::new(JoinRoomUseCase::new(registry.clone())),
        Arc::new(LeaveRoomUseCase::new(registry.clone())),
        Arc::new(BroadcastMessageUseCase::new(registry.clone())),
    ));
    Server::new(
        config,
        message_router,
        Arc::new(DisconnectConnectionUseCase::new(registry.clone())),
        Arc::new(GetRoomsUseCase::new(registry.clone())),
        Arc::new(GetRoomDetailUseCase::new(registry)),
        clock,
    )
}

pub fn join_envelope(room: &str) -> String {
    serde_json::json!({"back_type": "join", "room": room}).to_string()
}

pub fn leave_envelope(room: &str) -> String {
    serde_json::json!({"back_type": "leave", "room": room}).to_string()
}

pub async fn send_text(client: &mut Client, text: &str) {
    client
        .send(Message::text(text))
        .await
        .expect("Failed to send frame");
}

/// Wait for the next text frame.
pub async fn recv_text(client: &mut Client) -> String {
    loop {
        let next = timeout(RECEIVE_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Connection closed")
            .expect("WebSocket error");
        match next {
            Message::Text(text) => return text.as_str().to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

/// Assert that no text frame arrives within the quiet period.
pub async fn assert_silent(client: &mut Client) {
    if let Ok(Some(Ok(Message::Text(text)))) = timeout(QUIET_PERIOD, client.next()).await {
        panic!("expected no frame, got: {}", text);
    }
}
