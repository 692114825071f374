use serde::{Deserialize, Serialize};

/// Errors a game event can fail with.
///
/// Every failure is recovered at the event boundary: state is left untouched
/// and only the requester hears about it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error("Room {0} is full")]
    RoomFull(String),

    #[error("The word must contain at least one letter")]
    InvalidWord,

    #[error("A guess must be a single letter")]
    InvalidGuess,

    #[error("Player {0} is not in a room")]
    PlayerNotFound(String),

    #[error("Player {0} is already in a room")]
    AlreadyInRoom(String),

    #[error("{0}")]
    NotAllowed(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire-level category of a [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    RoomNotFound,
    RoomFull,
    InvalidWord,
    InvalidGuess,
    PlayerNotFound,
    AlreadyInRoom,
    NotAllowed,
    InternalError,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound(_) => ErrorKind::RoomNotFound,
            Self::RoomFull(_) => ErrorKind::RoomFull,
            Self::InvalidWord => ErrorKind::InvalidWord,
            Self::InvalidGuess => ErrorKind::InvalidGuess,
            Self::PlayerNotFound(_) => ErrorKind::PlayerNotFound,
            Self::AlreadyInRoom(_) => ErrorKind::AlreadyInRoom,
            Self::NotAllowed(_) => ErrorKind::NotAllowed,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }
}

/// Failures while loading [`crate::config::Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
