use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::view::{ProfileView, SetupView};

/// A player's standing in their room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Guest,
}

/// A connection seated in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub room_code: String,
}

/// Tone of a [`ServerMsg::Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
}

/// Messages sent from server to clients via WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMsg {
    RoomCreated {
        code: String,
        setup: SetupView,
        profile: ProfileView,
    },
    RoomJoined {
        setup: SetupView,
        profile: ProfileView,
    },
    Setup {
        setup: SetupView,
    },
    Profile {
        profile: ProfileView,
    },
    /// Private prompt to the member who must pick the next word.
    ChooseWord,
    Won,
    Lost,
    /// Human-readable news about the other member.
    Notification {
        kind: NotificationKind,
        message: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

/// Messages sent from clients to server via WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMsg {
    CreateRoom,
    JoinRoom { code: String },
    GetRoom { code: String },
    SetWord { code: String, word: String },
    TakeGuess { letter: String },
    PlayAgain,
    LeaveRoom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_msg_wire_format() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"join-room","code":"AB12"}"#).unwrap();
        assert_eq!(msg, ClientMsg::JoinRoom { code: "AB12".into() });

        let msg: ClientMsg = serde_json::from_str(r#"{"type":"play-again"}"#).unwrap();
        assert_eq!(msg, ClientMsg::PlayAgain);

        let msg: ClientMsg =
            serde_json::from_str(r#"{"type":"set-word","code":"AB12","word":"café"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMsg::SetWord {
                code: "AB12".into(),
                word: "café".into()
            }
        );
    }

    #[test]
    fn test_server_msg_wire_format() {
        let json = serde_json::to_value(ServerMsg::ChooseWord).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "choose-word" }));

        let json = serde_json::to_value(ServerMsg::Error {
            kind: ErrorKind::RoomFull,
            message: "Room AB12 is full".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "error", "kind": "room-full", "message": "Room AB12 is full" })
        );

        let json = serde_json::to_value(ServerMsg::Notification {
            kind: NotificationKind::Success,
            message: "Player 2 joined the room".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "notification", "kind": "success", "message": "Player 2 joined the room" })
        );
    }
}
