use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;

use crate::error::GameError;
use crate::room::Room;
use crate::types::Player;

/// Draws before `create_room` gives up on finding a free code.
const MAX_CODE_DRAWS: usize = 10_000;

/// Source of candidate room codes.
pub type CodeGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Two uppercase letters followed by two digits, e.g. `QX07`.
pub fn random_room_code() -> String {
    let mut rng = rand::rng();
    let letters: String = (0..2)
        .map(|_| char::from(b'A' + rng.random_range(0..26)))
        .collect();
    format!("{}{:02}", letters, rng.random_range(0..100))
}

fn canonical_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Outcome of a successful create.
#[derive(Debug, Clone)]
pub struct Created {
    pub code: String,
    pub room: Room,
    /// The room the owner was moved out of, if any.
    pub previous: Option<Left>,
}

/// Outcome of a successful join.
#[derive(Debug, Clone)]
pub struct Joined {
    pub room: Room,
    pub player: Player,
    /// Member to prompt for a word.
    pub choose_word: Option<String>,
    /// The room the joiner was moved out of, if any.
    pub previous: Option<Left>,
}

/// Outcome of a successful leave.
#[derive(Debug, Clone)]
pub enum Left {
    /// The departing player was the last member; the room is gone.
    RoomClosed { code: String, player: Player },
    /// The room lives on with its survivor promoted.
    Remaining { room: Room, player: Player },
}

/// Registry holds all active rooms.
///
/// Holding a room's map entry is what serializes events for that room.
/// Entries are always taken in `rooms` → `players` order.
pub struct RoomRegistry {
    /// room code -> room
    rooms: DashMap<String, Room>,
    /// connection id -> room code
    players: DashMap<String, String>,
    max_attempts: u32,
    generate_code: CodeGenerator,
}

impl RoomRegistry {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_code_generator(max_attempts, Box::new(random_room_code))
    }

    pub fn with_code_generator(max_attempts: u32, generate_code: CodeGenerator) -> Self {
        Self {
            rooms: DashMap::new(),
            players: DashMap::new(),
            max_attempts,
            generate_code,
        }
    }

    /// Creates a room owned by `owner_id` under a fresh code.
    ///
    /// An owner already seated elsewhere leaves that room only once the new
    /// one exists, so a failed create changes nothing.
    pub fn create_room(&self, owner_id: &str) -> Result<Created, GameError> {
        let (code, room, previous) = self.insert_room(owner_id)?;
        let previous = self.vacate_previous(previous, &code, owner_id)?;
        Ok(Created { code, room, previous })
    }

    fn insert_room(&self, owner_id: &str) -> Result<(String, Room, Option<String>), GameError> {
        for _ in 0..MAX_CODE_DRAWS {
            let code = (self.generate_code)();
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(%code, "room code collision, drawing again");
                }
                Entry::Vacant(slot) => {
                    let room = Room::new(code.clone(), self.max_attempts, owner_id);
                    let snapshot = room.clone();
                    slot.insert(room);
                    let previous = self.players.insert(owner_id.to_string(), code.clone());
                    tracing::info!(%code, owner = %owner_id, "room created");
                    return Ok((code, snapshot, previous));
                }
            }
        }

        Err(GameError::Internal("no free room code".into()))
    }

    /// Seats `joiner_id` in the room with `code`, moving it out of any room
    /// it was in before. A failed join changes nothing.
    pub fn join_room(&self, code: &str, joiner_id: &str) -> Result<Joined, GameError> {
        let code = canonical_code(code);

        let (room, effect, previous) = {
            let mut room = self
                .rooms
                .get_mut(&code)
                .ok_or_else(|| GameError::RoomNotFound(code.clone()))?;
            let effect = room.join(joiner_id)?;
            let previous = self.players.insert(joiner_id.to_string(), code.clone());
            tracing::info!(%code, player = %joiner_id, members = room.members().len(), "player joined");
            (room.clone(), effect, previous)
        };

        let previous = self.vacate_previous(previous, &code, joiner_id)?;
        Ok(Joined {
            room,
            player: effect.player,
            choose_word: effect.choose_word,
            previous,
        })
    }

    /// Removes `player_id` from its room, closing the room if it empties.
    pub fn leave_room(&self, player_id: &str) -> Result<Left, GameError> {
        let (_, code) = self
            .players
            .remove(player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;
        self.vacate(code, player_id)
    }

    // Called without any guard held: the old and new room may share a shard.
    fn vacate_previous(
        &self,
        previous: Option<String>,
        current: &str,
        player_id: &str,
    ) -> Result<Option<Left>, GameError> {
        match previous {
            Some(code) if code != current => self.vacate(code, player_id).map(Some),
            _ => Ok(None),
        }
    }

    fn vacate(&self, code: String, player_id: &str) -> Result<Left, GameError> {
        let Entry::Occupied(mut entry) = self.rooms.entry(code.clone()) else {
            return Err(GameError::Internal(format!("player {player_id} mapped to missing room {code}")));
        };
        let player = entry
            .get_mut()
            .leave(player_id)
            .ok_or_else(|| GameError::Internal(format!("player {player_id} missing from room {code}")))?;

        if entry.get().is_empty() {
            entry.remove();
            tracing::info!(%code, player = %player_id, "last player left, room closed");
            return Ok(Left::RoomClosed { code, player });
        }

        tracing::info!(%code, player = %player_id, "player left");
        Ok(Left::Remaining {
            room: entry.get().clone(),
            player,
        })
    }

    /// Runs `f` with exclusive access to the room with `code`.
    pub fn with_room<T>(
        &self,
        code: &str,
        f: impl FnOnce(&mut Room) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let code = canonical_code(code);
        let mut room = self
            .rooms
            .get_mut(&code)
            .ok_or(GameError::RoomNotFound(code))?;
        f(room.value_mut())
    }

    /// Runs `f` with exclusive access to the room `player_id` belongs to.
    pub fn with_player_room<T>(
        &self,
        player_id: &str,
        f: impl FnOnce(&mut Room) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let code = self
            .room_code_of(player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;
        self.with_room(&code, f)
    }

    pub fn room_code_of(&self, player_id: &str) -> Option<String> {
        self.players.get(player_id).map(|code| code.value().clone())
    }

    pub fn player(&self, player_id: &str) -> Option<Player> {
        let code = self.room_code_of(player_id)?;
        let room = self.rooms.get(&code)?;
        room.member(player_id).cloned()
    }

    pub fn room(&self, code: &str) -> Option<Room> {
        self.rooms.get(&canonical_code(code)).map(|room| room.clone())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
