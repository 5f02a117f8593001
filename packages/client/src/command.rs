//! Parsing of user input lines and construction of outgoing envelopes.

use serde_json::{Map, Value, json};

use crate::error::CommandError;

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join(String),
    Leave(String),
    ListRooms,
    Quit,
    /// Payload fields for a `send_message` envelope
    Send(Map<String, Value>),
}

/// Parse one line of input.
///
/// Lines starting with `/` are commands. Any other line is a message: a JSON
/// object is sent as-is, everything else becomes `{"type":"text","text":...}`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        return match name {
            "join" => arg
                .map(|room| Command::Join(room.to_string()))
                .ok_or(CommandError::MissingRoom("join")),
            "leave" => arg
                .map(|room| Command::Leave(room.to_string()))
                .ok_or(CommandError::MissingRoom("leave")),
            "rooms" => Ok(Command::ListRooms),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        };
    }

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(line) {
        return Ok(Command::Send(fields));
    }

    let mut fields = Map::new();
    fields.insert("type".to_string(), Value::from("text"));
    fields.insert("text".to_string(), Value::from(line));
    Ok(Command::Send(fields))
}

pub fn join_envelope(room: &str) -> String {
    json!({"back_type": "join", "room": room}).to_string()
}

pub fn leave_envelope(room: &str) -> String {
    json!({"back_type": "leave", "room": room}).to_string()
}

/// Build a `send_message` envelope. The header fields override any payload
/// fields of the same name.
pub fn send_envelope(room: &str, mut fields: Map<String, Value>) -> String {
    fields.insert("back_type".to_string(), Value::from("send_message"));
    fields.insert("room".to_string(), Value::from(room));
    Value::Object(fields).to_string()
}
