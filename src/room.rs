//! The room state machine.
//!
//! ```text
//! Waiting ──set_word──▶ Playing ──take_guess──▶ Won | Lost
//!    ▲                                            │
//!    └────────────────── play_again ──────────────┘
//! ```
//!
//! Rounds are never stored as a status; [`Room::status`] derives it from the
//! round state so win and loss cannot drift from the guesses that caused them.

use crate::error::GameError;
use crate::guess::{self, GuessOutcome, Round};
use crate::types::{Player, Role};
use crate::word;

/// Rooms are strictly two-player.
pub const MAX_MEMBERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// No word has been chosen yet.
    Waiting,
    Playing,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a successful guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    pub status: RoundStatus,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinEffect {
    pub player: Player,
    /// Member that should be asked to pick a word now.
    pub choose_word: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Room {
    code: String,
    max_attempts: u32,
    members: Vec<Player>,
    chooser: Option<String>,
    round: Option<Round>,
    next_seat: u32,
}

impl Room {
    /// Creates a room in `Waiting` with `owner_id` as its admin.
    pub fn new(code: impl Into<String>, max_attempts: u32, owner_id: &str) -> Self {
        let mut room = Self {
            code: code.into(),
            max_attempts,
            members: Vec::with_capacity(MAX_MEMBERS),
            chooser: None,
            round: None,
            next_seat: 1,
        };
        room.seat(owner_id, Role::Admin);
        room
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Attempts left in the current round, or the full budget before any
    /// round has started.
    pub fn remaining_attempts(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(self.max_attempts, Round::remaining_attempts)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn members(&self) -> &[Player] {
        &self.members
    }

    pub fn member(&self, id: &str) -> Option<&Player> {
        self.members.iter().find(|p| p.id == id)
    }

    pub fn is_member(&self, id: &str) -> bool {
        self.member(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_MEMBERS
    }

    pub fn chooser(&self) -> Option<&str> {
        self.chooser.as_deref()
    }

    pub fn is_winner(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_fully_revealed)
    }

    pub fn is_loser(&self) -> bool {
        self.round
            .as_ref()
            .is_some_and(|r| r.wrong_guesses().len() >= self.max_attempts as usize)
    }

    /// Win is checked first: a guess that completes the word always wins.
    pub fn status(&self) -> RoundStatus {
        if self.round.is_none() {
            RoundStatus::Waiting
        } else if self.is_winner() {
            RoundStatus::Won
        } else if self.is_loser() {
            RoundStatus::Lost
        } else {
            RoundStatus::Playing
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status() == RoundStatus::Playing
    }

    fn seat(&mut self, id: &str, role: Role) -> Player {
        let player = Player {
            id: id.to_string(),
            name: format!("Player {}", self.next_seat),
            role,
            room_code: self.code.clone(),
        };
        self.next_seat += 1;
        self.members.push(player.clone());
        player
    }

    /// Seats `joiner_id` as a guest.
    ///
    /// A room without a chooser hands the role to the member already there.
    pub fn join(&mut self, joiner_id: &str) -> Result<JoinEffect, GameError> {
        if self.is_empty() {
            return Err(GameError::RoomNotFound(self.code.clone()));
        }
        if self.is_full() {
            return Err(GameError::RoomFull(self.code.clone()));
        }
        if self.is_member(joiner_id) {
            return Err(GameError::AlreadyInRoom(joiner_id.to_string()));
        }

        if self.chooser.is_none() {
            self.chooser = self.members.first().map(|p| p.id.clone());
        }
        let player = self.seat(joiner_id, Role::Guest);

        let choose_word = match self.status() {
            RoundStatus::Waiting => self.chooser.clone(),
            _ => None,
        };
        Ok(JoinEffect { player, choose_word })
    }

    /// Removes a member, voiding any round in progress. The survivor, if
    /// any, becomes admin and chooser.
    pub fn leave(&mut self, player_id: &str) -> Option<Player> {
        let index = self.members.iter().position(|p| p.id == player_id)?;
        let departed = self.members.remove(index);

        self.round = None;
        self.chooser = None;
        if let Some(survivor) = self.members.first_mut() {
            survivor.role = Role::Admin;
            self.chooser = Some(survivor.id.clone());
        }
        Some(departed)
    }

    /// Starts a round with `raw` as the secret. The submitter becomes chooser.
    pub fn set_word(&mut self, player_id: &str, raw: &str) -> Result<(), GameError> {
        if !self.is_member(player_id) {
            return Err(GameError::PlayerNotFound(player_id.to_string()));
        }
        if self.is_playing() && self.chooser.as_deref() != Some(player_id) {
            return Err(GameError::NotAllowed("A round is already in progress"));
        }

        let word = word::normalize(raw)?;
        self.round = Some(Round::new(word, self.max_attempts));
        self.chooser = Some(player_id.to_string());
        Ok(())
    }

    /// Applies one guess from the guesser.
    pub fn take_guess(&mut self, player_id: &str, raw: &str) -> Result<GuessReport, GameError> {
        if !self.is_member(player_id) {
            return Err(GameError::PlayerNotFound(player_id.to_string()));
        }
        if !self.is_playing() {
            return Err(GameError::NotAllowed("No round in progress"));
        }
        if self.chooser.as_deref() == Some(player_id) {
            return Err(GameError::NotAllowed("The chooser cannot guess"));
        }

        let letter = word::normalize_letter(raw)?;
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| GameError::Internal("playing room without a round".into()))?;
        let outcome = guess::evaluate(round, letter);

        Ok(GuessReport {
            outcome,
            status: self.status(),
        })
    }

    /// Resets a finished room for another round with roles swapped.
    ///
    /// Returns the id of the new chooser.
    pub fn play_again(&mut self, requester_id: &str) -> Result<String, GameError> {
        if !self.is_member(requester_id) {
            return Err(GameError::PlayerNotFound(requester_id.to_string()));
        }
        if self.members.len() != MAX_MEMBERS {
            return Err(GameError::Internal("play again needs two players".into()));
        }
        if !self.status().is_finished() {
            return Err(GameError::NotAllowed("Finish the current round first"));
        }

        let current = self
            .chooser
            .as_deref()
            .ok_or_else(|| GameError::Internal("finished round without a chooser".into()))?;
        let next = self
            .members
            .iter()
            .find(|p| p.id != current)
            .map(|p| p.id.clone())
            .ok_or_else(|| GameError::Internal("no member to hand the word to".into()))?;

        self.round = None;
        self.chooser = Some(next.clone());
        Ok(next)
    }
}
