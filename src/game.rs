use std::sync::Arc;

use crate::error::GameError;
use crate::guess::GuessOutcome;
use crate::registry::{Left, RoomRegistry};
use crate::room::{Room, RoundStatus};
use crate::types::{ClientMsg, NotificationKind, Role, ServerMsg};
use crate::view::{ProfileView, SetupView};

/// A message the transport must deliver to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: String,
    pub msg: ServerMsg,
}

impl Outbound {
    pub fn new(to: impl Into<String>, msg: ServerMsg) -> Self {
        Self { to: to.into(), msg }
    }
}

/// Fans `msg` out to every current member of `room`.
fn broadcast(room: &Room, msg: ServerMsg) -> Vec<Outbound> {
    room.members()
        .iter()
        .map(|p| Outbound::new(&p.id, msg.clone()))
        .collect()
}

/// Error reply for a rejected event, addressed to the requester alone.
fn rejection(conn_id: &str, err: &GameError) -> Outbound {
    tracing::debug!(conn = %conn_id, error = %err, "event rejected");
    Outbound::new(
        conn_id,
        ServerMsg::Error {
            kind: err.kind(),
            message: err.to_string(),
        },
    )
}

fn setup(room: &Room) -> ServerMsg {
    ServerMsg::Setup {
        setup: SetupView::from(room),
    }
}

fn notice(to: &str, message: String) -> Outbound {
    Outbound::new(
        to,
        ServerMsg::Notification {
            kind: NotificationKind::Success,
            message,
        },
    )
}

/// What the rest of a room hears when a member leaves it.
fn departure(left: Left) -> Vec<Outbound> {
    let Left::Remaining { room, player } = left else {
        return Vec::new();
    };

    let mut out = broadcast(&room, setup(&room));
    for member in room.members() {
        out.push(Outbound::new(
            &member.id,
            ServerMsg::Profile {
                profile: ProfileView::from(member),
            },
        ));
        out.push(notice(&member.id, format!("{} left the room", player.name)));
        if player.role == Role::Admin {
            out.push(notice(&member.id, "You are now the room admin".into()));
        }
    }
    out
}

/// Event dispatch: resolves an inbound event through the registry,
/// mutates the room and returns what has to be delivered to whom.
///
/// Nothing here touches a socket.
#[derive(Clone)]
pub struct Game {
    registry: Arc<RoomRegistry>,
}

impl Game {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Handles one client message. Failures become a single error message
    /// to the sender; nothing is broadcast.
    pub fn handle(&self, conn_id: &str, msg: ClientMsg) -> Vec<Outbound> {
        let result = match msg {
            ClientMsg::CreateRoom => self.create_room(conn_id),
            ClientMsg::JoinRoom { code } => self.join_room(conn_id, &code),
            ClientMsg::GetRoom { code } => self.get_room(conn_id, &code),
            ClientMsg::SetWord { code, word } => self.set_word(conn_id, &code, &word),
            ClientMsg::TakeGuess { letter } => self.take_guess(conn_id, &letter),
            ClientMsg::PlayAgain => self.play_again(conn_id),
            ClientMsg::LeaveRoom => self.leave_room(conn_id),
        };

        result.unwrap_or_else(|err| vec![rejection(conn_id, &err)])
    }

    /// Creates a room; an owner seated elsewhere leaves that room.
    pub fn create_room(&self, conn_id: &str) -> Result<Vec<Outbound>, GameError> {
        let created = self.registry.create_room(conn_id)?;
        let owner = created
            .room
            .member(conn_id)
            .ok_or_else(|| GameError::Internal("owner missing from new room".into()))?;

        let mut out = created.previous.map(departure).unwrap_or_default();
        out.push(Outbound::new(
            conn_id,
            ServerMsg::RoomCreated {
                code: created.code.clone(),
                setup: SetupView::from(&created.room),
                profile: ProfileView::from(owner),
            },
        ));
        Ok(out)
    }

    pub fn join_room(&self, conn_id: &str, code: &str) -> Result<Vec<Outbound>, GameError> {
        // Re-joining the room you are already in is a no-op refresh.
        if let Some(current) = self.registry.room_code_of(conn_id) {
            if current.eq_ignore_ascii_case(code.trim()) {
                return self.get_room(conn_id, code);
            }
        }

        let joined = self.registry.join_room(code, conn_id)?;
        let room = &joined.room;

        let mut out = joined.previous.map(departure).unwrap_or_default();
        out.push(Outbound::new(
            conn_id,
            ServerMsg::RoomJoined {
                setup: SetupView::from(room),
                profile: ProfileView::from(&joined.player),
            },
        ));
        for member in room.members().iter().filter(|p| p.id != conn_id) {
            out.push(Outbound::new(&member.id, setup(room)));
            out.push(notice(&member.id, format!("{} joined the room", joined.player.name)));
        }
        if let Some(chooser) = joined.choose_word {
            out.push(Outbound::new(chooser, ServerMsg::ChooseWord));
        }
        Ok(out)
    }

    /// Sends the current room state to a member, e.g. after a page reload.
    pub fn get_room(&self, conn_id: &str, code: &str) -> Result<Vec<Outbound>, GameError> {
        self.registry.with_room(code, |room| {
            let me = room
                .member(conn_id)
                .ok_or_else(|| GameError::PlayerNotFound(conn_id.to_string()))?;
            Ok(vec![
                Outbound::new(conn_id, setup(room)),
                Outbound::new(
                    conn_id,
                    ServerMsg::Profile {
                        profile: ProfileView::from(me),
                    },
                ),
            ])
        })
    }

    pub fn set_word(&self, conn_id: &str, code: &str, word: &str) -> Result<Vec<Outbound>, GameError> {
        self.registry.with_room(code, |room| {
            room.set_word(conn_id, word)?;
            tracing::info!(code = %room.code(), chooser = %conn_id, "round started");
            Ok(broadcast(room, setup(room)))
        })
    }

    pub fn take_guess(&self, conn_id: &str, letter: &str) -> Result<Vec<Outbound>, GameError> {
        self.registry.with_player_room(conn_id, |room| {
            let report = room.take_guess(conn_id, letter)?;
            match report.outcome {
                GuessOutcome::Hit { revealed } => {
                    tracing::debug!(code = %room.code(), player = %conn_id, revealed, "letter hit")
                }
                GuessOutcome::Miss => tracing::debug!(code = %room.code(), player = %conn_id, "letter missed"),
                GuessOutcome::Repeated => {
                    tracing::debug!(code = %room.code(), player = %conn_id, "letter already tried")
                }
            }

            let mut out = broadcast(room, setup(room));
            let (mine, theirs) = match report.status {
                RoundStatus::Won => (ServerMsg::Won, ServerMsg::Lost),
                RoundStatus::Lost => (ServerMsg::Lost, ServerMsg::Won),
                _ => return Ok(out),
            };

            tracing::info!(code = %room.code(), guesser = %conn_id, status = ?report.status, "round finished");
            for member in room.members() {
                let msg = if member.id == conn_id { mine.clone() } else { theirs.clone() };
                out.push(Outbound::new(&member.id, msg));
            }
            Ok(out)
        })
    }

    pub fn play_again(&self, conn_id: &str) -> Result<Vec<Outbound>, GameError> {
        self.registry.with_player_room(conn_id, |room| {
            let chooser = room.play_again(conn_id)?;
            tracing::info!(code = %room.code(), %chooser, "new round requested");

            let mut out = broadcast(room, setup(room));
            out.push(Outbound::new(chooser, ServerMsg::ChooseWord));
            Ok(out)
        })
    }

    pub fn leave_room(&self, conn_id: &str) -> Result<Vec<Outbound>, GameError> {
        Ok(departure(self.registry.leave_room(conn_id)?))
    }

    /// Socket closed: same as leaving, but a connection that never joined
    /// a room is not an error.
    pub fn disconnect(&self, conn_id: &str) -> Vec<Outbound> {
        match self.leave_room(conn_id) {
            Ok(out) => out,
            Err(GameError::PlayerNotFound(_)) => Vec::new(),
            Err(err) => {
                tracing::warn!(conn = %conn_id, error = %err, "cleanup after disconnect failed");
                Vec::new()
            }
        }
    }
}
