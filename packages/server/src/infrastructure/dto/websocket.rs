//! WebSocket message DTOs.
//!
//! Every envelope is a JSON object whose `type` field selects the variant.

use serde::{Deserialize, Serialize};

/// Messages sent by a client.
///
/// Unknown `type` values and missing fields fail to parse. Fields not listed
/// here (e.g. the negotiation payload of `relay-message`) are ignored by the
/// parser; the relay forwards the original text, not this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    CreateRoom,
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    RelayMessage {
        #[serde(rename = "roomId")]
        room_id: String,
    },
}

impl ClientMessage {
    /// Envelope type for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::CreateRoom => "create-room",
            ClientMessage::JoinRoom { .. } => "join-room",
            ClientMessage::RelayMessage { .. } => "relay-message",
        }
    }
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    RoomCreated {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    RoomJoined {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    Error {
        message: String,
    },
    ClientJoined,
    ClientLeft,
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
