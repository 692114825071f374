//! Client-visible projections of rooms and players.
//!
//! The secret word never leaves the room through these types; only its
//! length and the revealed positions do.

use serde::{Deserialize, Serialize};

use crate::room::{Room, RoundStatus};
use crate::types::{Player, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusView {
    Waiting,
    Playing,
    Won,
    Lost,
}

impl From<RoundStatus> for StatusView {
    fn from(status: RoundStatus) -> Self {
        match status {
            RoundStatus::Waiting => Self::Waiting,
            RoundStatus::Playing => Self::Playing,
            RoundStatus::Won => Self::Won,
            RoundStatus::Lost => Self::Lost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl From<&Player> for ProfileView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            role: player.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupView {
    pub id: String,
    pub max_attempts: u32,
    pub remaining_attempts: u32,
    pub wrong_guesses: Vec<String>,
    pub correct_guesses: Vec<String>,
    pub letters: Vec<String>,
    pub word_length: usize,
    pub chooser_id: Option<String>,
    pub is_playing: bool,
    pub status: StatusView,
    pub players: Vec<ProfileView>,
}

fn strings(chars: &[char]) -> Vec<String> {
    chars.iter().map(char::to_string).collect()
}

impl From<&Room> for SetupView {
    fn from(room: &Room) -> Self {
        let round = room.round();
        Self {
            id: room.code().to_string(),
            max_attempts: room.max_attempts(),
            remaining_attempts: room.remaining_attempts(),
            wrong_guesses: round.map(|r| strings(r.wrong_guesses())).unwrap_or_default(),
            correct_guesses: round.map(|r| strings(r.correct_guesses())).unwrap_or_default(),
            letters: round
                .map(|r| r.letters().iter().map(|s| s.render().to_string()).collect())
                .unwrap_or_default(),
            word_length: round.map_or(0, |r| r.word().len()),
            chooser_id: room.chooser().map(str::to_string),
            is_playing: room.is_playing(),
            status: room.status().into(),
            players: room.members().iter().map(ProfileView::from).collect(),
        }
    }
}
