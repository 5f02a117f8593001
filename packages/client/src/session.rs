//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use kokuban_shared::time::now_millis;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::{Command, join_envelope, leave_envelope, parse_command, send_envelope},
    domain::JoinedRooms,
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::print_and_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run one connected session.
///
/// Returns `Ok(())` when the user quits or input ends. Errors distinguish a
/// failed connect (`ConnectionError`, `InvalidUrl`) from a session that was
/// established and then dropped (`ConnectionLost`).
pub async fn run_client_session(
    url: &str,
    rooms: &mut JoinedRooms,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => ClientError::InvalidUrl(e.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to relay at {}", url);

    let (mut write, mut read) = ws_stream.split();

    // Restore memberships, oldest first so the current room stays current
    for room in rooms.iter() {
        send_frame(&mut write, join_envelope(room)).await?;
        tracing::debug!("Joined room '{}'", room);
    }

    println!(
        "\nRooms: {}. Type messages and press Enter to send to '{}'. /join, /leave, /rooms, /quit. Press Ctrl+C to exit.\n",
        rooms.iter().collect::<Vec<_>>().join(", "),
        rooms.current().unwrap_or("-")
    );

    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print_and_prompt(&MessageFormatter::format_received(&text, now_millis()));
                }
                Ok(Message::Binary(data)) => {
                    print_and_prompt(&MessageFormatter::format_binary_message(data.len()));
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return "closed by server".to_string();
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return e.to_string();
                }
                _ => {}
            }
        }
        "stream ended".to_string()
    });

    loop {
        tokio::select! {
            reason = &mut read_task => {
                let reason = reason.unwrap_or_else(|e| e.to_string());
                return Err(ClientError::ConnectionLost(reason));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Input closed (Ctrl+C / Ctrl+D)
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => {
                        read_task.abort();
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Ok(Command::Join(room)) => {
                        send_frame(&mut write, join_envelope(&room)).await?;
                        print_and_prompt(&MessageFormatter::format_joined(&room));
                        rooms.join(room);
                    }
                    Ok(Command::Leave(room)) => {
                        send_frame(&mut write, leave_envelope(&room)).await?;
                        if !rooms.leave(&room) {
                            tracing::debug!("Left room '{}' that was not joined", room);
                        }
                        print_and_prompt(&MessageFormatter::format_left(&room, rooms.current()));
                    }
                    Ok(Command::ListRooms) => {
                        print_and_prompt(&MessageFormatter::format_room_list(
                            rooms.iter(),
                            rooms.current(),
                        ));
                    }
                    Ok(Command::Send(fields)) => {
                        let Some(room) = rooms.current() else {
                            print_and_prompt("\nNot in any room. Use /join <room> first.\n");
                            continue;
                        };
                        let envelope = send_envelope(room, fields);
                        send_frame(&mut write, envelope).await?;
                    }
                    Err(e) => {
                        print_and_prompt(&format!("\n{}\n", e));
                    }
                }
            }
        }
    }
}

async fn send_frame(write: &mut WsSink, text: String) -> Result<(), ClientError> {
    write.send(Message::text(text)).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionLost(e.to_string())
    })
}
