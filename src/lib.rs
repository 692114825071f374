//! Two-player hangman rooms.
//!
//! One player picks a secret word, the other guesses letters until the word
//! is revealed or the wrong-guess budget runs out.
//!
//! - [`word`] normalizes words and guesses
//! - [`guess`] applies a guessed letter to a round
//! - [`room`] is the per-room state machine
//! - [`registry`] owns every room and maps connections to rooms
//! - [`view`] projects rooms for clients without leaking the word
//! - [`game`] dispatches client events and says what to deliver to whom

pub mod config;
pub mod error;
pub mod game;
pub mod guess;
pub mod registry;
pub mod room;
pub mod types;
pub mod view;
pub mod word;

pub use error::{ConfigError, ErrorKind, GameError};
pub use game::{Game, Outbound};
pub use registry::RoomRegistry;
