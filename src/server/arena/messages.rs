use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{MatchId, Move};

/// Client -> server frames on the arena websocket.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    JoinArena {
        username: String,
    },
    MakeMove {
        match_id: MatchId,
        /// Raw move token; validated against the three-move set by the coordinator.
        #[serde(rename = "move")]
        mv: String,
    },
    Ping,
}

/// One player's revealed move in a finished match.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RevealedMove {
    pub username: String,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Both players' revealed moves, in seat order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchMoves {
    pub player1: RevealedMove,
    pub player2: RevealedMove,
}

/// Server -> client frames on the arena websocket.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    WaitingOpponent,
    MatchStarted {
        match_id: MatchId,
        opponent1: String,
        opponent2: String,
    },
    MoveReceived {
        match_id: MatchId,
    },
    MatchResult {
        match_id: MatchId,
        moves: MatchMoves,
        winner_conn_id: Option<Uuid>,
        winner_username: Option<String>,
        is_tie: bool,
    },
    OpponentLeft {
        match_id: MatchId,
    },
    Error {
        message: String,
    },
}

impl ServerWsMessage {
    pub fn error(message: &str) -> Self {
        Self::Error {
            message: message.to_string(),
        }
    }
}
