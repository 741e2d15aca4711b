//! Protocol module - line-delimited JSON between host and driver
//!
//! Every inbound line is one of:
//!
//! ```text
//! {"type":"action","action":"moveLeft"}
//! {"type":"tap"}
//! {"type":"swipe","dx":-96.0,"dy":4.0,"duration_ms":120}
//! {"type":"quit"}
//! moveLeft
//! ```
//!
//! The last form is a bare action name, for typing commands by hand. Outbound
//! lines are `{"type":"snapshot",...}` after every state change and
//! `{"type":"error","message":"..."}` for input that could not be parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::GameAction;
use mini_tetris_core::GameSnapshot;

/// Event delivered to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    Action { action: GameAction },
    Tap,
    Swipe { dx: f32, dy: f32, duration_ms: u64 },
    Quit,
}

impl From<GameAction> for HostEvent {
    fn from(action: GameAction) -> Self {
        HostEvent::Action { action }
    }
}

/// Message written back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Snapshot(GameSnapshot),
    Error { message: String },
}

impl OutboundMessage {
    pub fn error(message: impl Into<String>) -> Self {
        OutboundMessage::Error {
            message: message.into(),
        }
    }
}

/// Why an inbound line was rejected.
#[derive(Debug)]
pub enum LineError {
    /// The line is not valid UTF-8.
    Encoding(std::str::Utf8Error),
    /// The line is text but not a known event.
    Parse(serde_json::Error),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Encoding(err) => write!(f, "invalid UTF-8: {err}"),
            LineError::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LineError::Encoding(err) => Some(err),
            LineError::Parse(err) => Some(err),
        }
    }
}

/// Decode and parse one raw inbound line.
pub fn parse_bytes(line: &[u8]) -> Result<HostEvent, LineError> {
    let line = std::str::from_utf8(line).map_err(LineError::Encoding)?;
    parse_line(line).map_err(LineError::Parse)
}

/// Parse one inbound line.
pub fn parse_line(line: &str) -> Result<HostEvent, serde_json::Error> {
    let line = line.trim();
    if let Some(action) = GameAction::from_str(line) {
        return Ok(action.into());
    }
    if line.starts_with('"') {
        return serde_json::from_str::<GameAction>(line).map(HostEvent::from);
    }
    serde_json::from_str(line)
}

/// Serialize one outbound message as a single line (no trailing newline).
pub fn encode(message: &OutboundMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}
