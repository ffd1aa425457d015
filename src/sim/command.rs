//! Chat command surface
//!
//! The transport layer hands the engine one parsed `(username, command,
//! value)` tuple per chat message. Joins and movement votes are routed into
//! the simulation; everything else is ignored here and left to the display
//! layer.

use serde::{Deserialize, Serialize};

use super::state::{ArenaState, Direction};

/// One chat message, as delivered by the transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    pub username: String,
    pub command: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl ChatEvent {
    pub fn new(username: &str, command: &str, value: Option<&str>) -> Self {
        Self {
            username: username.to_string(),
            command: command.to_string(),
            value: value.map(str::to_string),
        }
    }
}

impl Direction {
    /// Parse a movement command like `!up`
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "!up" => Some(Direction::Up),
            "!down" => Some(Direction::Down),
            "!left" => Some(Direction::Left),
            "!right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl ArenaState {
    /// Route one chat event into the engine
    pub fn apply_chat(&mut self, event: &ChatEvent) {
        if event.command == "!join" {
            match event.value.as_deref() {
                Some(name) if !name.is_empty() => self.request_join(name, &event.username),
                _ => log::debug!("{} sent !join without a faction name", event.username),
            }
        } else if let Some(direction) = Direction::from_command(&event.command) {
            self.move_blob(&event.username, direction);
        } else {
            log::debug!("ignoring {:?} from {}", event.command, event.username);
        }
    }
}
