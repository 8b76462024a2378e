use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::config::arena::MATCH_TOKEN_LEN;

/// Opaque identifier assigned to a connection when its websocket opens.
pub type ConnId = Uuid;

/// Opaque match identifier, generated by [`generate_match_id`].
pub type MatchId = String;

/// A combat move. EMP disables SHIELD, SHIELD absorbs LASER, LASER burns through EMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Move {
    Emp,
    Shield,
    Laser,
}

impl Move {
    /// Parse a wire token. Anything outside the three valid tokens is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "EMP" => Some(Self::Emp),
            "SHIELD" => Some(Self::Shield),
            "LASER" => Some(Self::Laser),
            _ => None,
        }
    }

    /// Cyclic beats table: each move beats exactly one other move.
    pub fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Emp, Self::Shield) | (Self::Shield, Self::Laser) | (Self::Laser, Self::Emp)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emp => "EMP",
            Self::Shield => "SHIELD",
            Self::Laser => "LASER",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two seats in an active match.
#[derive(Clone, Debug)]
pub struct PlayerSlot {
    pub conn_id: ConnId,
    pub username: String,
    /// Transitions only from `None` to `Some`; never overwritten once set.
    pub mv: Option<Move>,
}

impl PlayerSlot {
    pub fn new(conn_id: ConnId, username: String) -> Self {
        Self {
            conn_id,
            username,
            mv: None,
        }
    }
}

/// Result of recording a move into a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The connection does not own either seat of the match.
    NotAParticipant,
    /// The seat already holds a move; the resubmission is dropped.
    AlreadyMoved,
    Recorded { both_moved: bool },
}

/// An active two-player match: exactly two seats, each holding a move or none.
#[derive(Clone, Debug)]
pub struct ActiveMatch {
    pub player1: PlayerSlot,
    pub player2: PlayerSlot,
}

impl ActiveMatch {
    pub fn new(player1: PlayerSlot, player2: PlayerSlot) -> Self {
        Self { player1, player2 }
    }

    pub fn has_player(&self, conn_id: ConnId) -> bool {
        self.player1.conn_id == conn_id || self.player2.conn_id == conn_id
    }

    /// The other seat, if `conn_id` owns one of the two.
    pub fn opponent_of(&self, conn_id: ConnId) -> Option<&PlayerSlot> {
        if self.player1.conn_id == conn_id {
            Some(&self.player2)
        } else if self.player2.conn_id == conn_id {
            Some(&self.player1)
        } else {
            None
        }
    }

    pub fn both_moved(&self) -> bool {
        self.player1.mv.is_some() && self.player2.mv.is_some()
    }

    /// Record a move into the submitting connection's seat.
    pub fn record_move(&mut self, conn_id: ConnId, mv: Move) -> MoveOutcome {
        let slot = if self.player1.conn_id == conn_id {
            &mut self.player1
        } else if self.player2.conn_id == conn_id {
            &mut self.player2
        } else {
            return MoveOutcome::NotAParticipant;
        };
        if slot.mv.is_some() {
            return MoveOutcome::AlreadyMoved;
        }
        slot.mv = Some(mv);
        MoveOutcome::Recorded {
            both_moved: self.both_moved(),
        }
    }
}

/// Generate a collision-resistant match id with a time component and a random component.
pub fn generate_match_id() -> MatchId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let token = Alphanumeric.sample_string(&mut rand::rng(), MATCH_TOKEN_LEN);
    format!("arena_{}_{}", millis, token)
}
