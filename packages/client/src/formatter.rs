//! Message formatting utilities for client display.

use kokuban_shared::time::millis_to_clock_time;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Relayed envelope as seen by a receiving client.
#[derive(Debug, Deserialize)]
struct ReceivedEnvelope {
    room: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed text frame received at `received_at` (milliseconds).
    ///
    /// Text payloads print as `[room] text`; other envelopes print their type
    /// and remaining fields. Anything that is not an envelope prints raw.
    pub fn format_received(text: &str, received_at: i64) -> String {
        let time = Self::clock_time(received_at);
        let Ok(envelope) = serde_json::from_str::<ReceivedEnvelope>(text) else {
            return Self::format_raw_message(text);
        };

        match (envelope.kind.as_deref(), envelope.text) {
            (Some("text"), Some(body)) => {
                format!("\n[{}] {} | {}\n", envelope.room, time, body)
            }
            (kind, body) => {
                let mut rest = envelope.rest;
                rest.remove("back_type");
                if let Some(body) = body {
                    rest.insert("text".to_string(), Value::from(body));
                }
                format!(
                    "\n[{}] {} | <{}> {}\n",
                    envelope.room,
                    time,
                    kind.unwrap_or("untyped"),
                    Value::Object(rest)
                )
            }
        }
    }

    /// Format a local notice after joining a room
    pub fn format_joined(room: &str) -> String {
        format!("\n+ joined '{}' (messages now go here)\n", room)
    }

    /// Format a local notice after leaving a room
    pub fn format_left(room: &str, current: Option<&str>) -> String {
        match current {
            Some(current) => format!("\n- left '{}' (messages now go to '{}')\n", room, current),
            None => format!("\n- left '{}' (no room joined, use /join <room>)\n", room),
        }
    }

    /// Format the list of joined rooms, marking the current one
    pub fn format_room_list<'a>(
        rooms: impl Iterator<Item = &'a str>,
        current: Option<&str>,
    ) -> String {
        let mut output = String::from("\nRooms:\n");
        let mut any = false;
        for room in rooms {
            any = true;
            let marker = if Some(room) == current { " (current)" } else { "" };
            output.push_str(&format!("  {}{}\n", room, marker));
        }
        if !any {
            output.push_str("  (none)\n");
        }
        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    fn clock_time(millis: i64) -> String {
        millis_to_clock_time(millis).unwrap_or_else(|| "--:--:--".to_string())
    }
}
