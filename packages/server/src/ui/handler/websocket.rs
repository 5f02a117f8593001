//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionId, OutboundReceiver, Timestamp},
    infrastructure::dto::decode_envelope,
    ui::state::AppState,
    usecase::MessageRouter,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sink.
///
/// The task ends when the peer stops accepting frames.
fn pusher_loop(
    mut rx: OutboundReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
        // Best effort; the peer may already be gone.
        let _ = sender.close().await;
    })
}

/// Decode one inbound frame and hand it to the router.
///
/// Malformed envelopes are dropped; the sender stays connected.
async fn route_frame(router: &MessageRouter, connection: &Arc<Connection>, text: &str) {
    match decode_envelope(text) {
        Ok(envelope) => {
            let outcome = router.route(connection, envelope).await;
            tracing::debug!(connection_id = %connection.id(), ?outcome, "Envelope routed");
        }
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %e,
                "Dropping malformed envelope"
            );
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::channel(state.outbound_capacity);
    let connection = Arc::new(Connection::new(
        ConnectionId::generate(),
        Timestamp::new(state.clock.now_millis()),
        tx,
    ));
    let connection_id = connection.id();
    tracing::info!(%connection_id, "New client connected");

    let (sender, mut receiver) = socket.split();

    // Spawn a task to push queued envelopes to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to route envelopes received from this client
    let router = state.message_router.clone();
    let connection_for_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(%connection_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    route_frame(&router, &connection_for_recv, text.as_str()).await;
                }
                Message::Binary(data) => match std::str::from_utf8(&data) {
                    Ok(text) => route_frame(&router, &connection_for_recv, text).await,
                    Err(_) => {
                        tracing::debug!(
                            %connection_id,
                            bytes = data.len(),
                            "Dropping non UTF-8 binary frame"
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!(%connection_id, "Client requested close");
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other and wait for it, so
    // nothing routes on behalf of this connection once teardown starts
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };

    state
        .disconnect_connection_usecase
        .execute(&connection)
        .await;
}
