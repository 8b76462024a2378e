/// Arena coordinator actor.
///
/// Owns the connection registry, the single-slot matchmaking queue, and the table
/// of active matches. Every inbound event (connect, join, move, disconnect) is a
/// message handled to completion before the next one, so queue and table mutations
/// are atomic with respect to each other even though they originate from
/// independent client connections.
use actix::prelude::*;
use log::{debug, info, warn};
use std::collections::HashMap;

use super::messages::{MatchMoves, RevealedMove, ServerWsMessage};
use super::resolution::{Winner, resolve};
use super::types::{ActiveMatch, ConnId, MatchId, Move, MoveOutcome, PlayerSlot, generate_match_id};
use crate::config::arena::{LOSER_CREDITS, WINNER_CREDITS};
use crate::economy::ledger::AdjustCredits;

type SessionAddr = Recipient<ServerWsMessage>;

/// A live arena connection and its set-once display name.
struct ConnectedClient {
    addr: SessionAddr,
    username: Option<String>,
}

/// Main arena coordinator actor.
pub struct ArenaServer {
    /// Live connections, by connection id.
    sessions: HashMap<ConnId, ConnectedClient>,
    /// At most one connection waiting for an opponent.
    waiting: Option<ConnId>,
    /// Active matches, by match id.
    matches: HashMap<MatchId, ActiveMatch>,
    /// Economy collaborator for post-match credit adjustments.
    credits: Recipient<AdjustCredits>,
}

impl ArenaServer {
    /// Create a new arena coordinator dispatching credit adjustments to `credits`.
    pub fn new(credits: Recipient<AdjustCredits>) -> Self {
        Self {
            sessions: HashMap::new(),
            waiting: None,
            matches: HashMap::new(),
            credits,
        }
    }

    /// Send a frame to one connection, if it is still registered.
    fn send_to(&self, conn_id: ConnId, msg: ServerWsMessage) {
        if let Some(client) = self.sessions.get(&conn_id) {
            client.addr.do_send(msg);
        }
    }

    fn username_of(&self, conn_id: ConnId) -> Option<String> {
        self.sessions.get(&conn_id).and_then(|c| c.username.clone())
    }

    /// Register a freshly opened connection.
    fn connect(&mut self, conn_id: ConnId, addr: SessionAddr) {
        debug!("[Arena] Connection {} registered", conn_id);
        self.sessions.insert(
            conn_id,
            ConnectedClient {
                addr,
                username: None,
            },
        );
    }

    /// Handle a join request: pair with the waiting player or park the caller.
    fn join_arena(&mut self, conn_id: ConnId, username: &str) {
        if username.is_empty() {
            self.send_to(conn_id, ServerWsMessage::error("Username is required"));
            return;
        }
        match self.sessions.get_mut(&conn_id) {
            Some(client) => {
                // The display name is set once and kept for the connection's lifetime.
                if client.username.is_none() {
                    client.username = Some(username.to_string());
                }
            }
            None => {
                warn!("[Arena] Join request from unregistered connection {}", conn_id);
                return;
            }
        }

        // A connection is never a player in two simultaneous matches.
        if self.matches.values().any(|game| game.has_player(conn_id)) {
            self.send_to(conn_id, ServerWsMessage::error("Already in an active match"));
            return;
        }

        match self.waiting {
            Some(waiting_id) if waiting_id != conn_id && self.sessions.contains_key(&waiting_id) => {
                self.waiting = None;
                let match_id = generate_match_id();
                let opponent1 = self
                    .username_of(waiting_id)
                    .unwrap_or_else(|| "Player 1".to_string());
                let opponent2 = self
                    .username_of(conn_id)
                    .unwrap_or_else(|| "Player 2".to_string());
                self.matches.insert(
                    match_id.clone(),
                    ActiveMatch::new(
                        PlayerSlot::new(waiting_id, opponent1.clone()),
                        PlayerSlot::new(conn_id, opponent2.clone()),
                    ),
                );
                let started = ServerWsMessage::MatchStarted {
                    match_id: match_id.clone(),
                    opponent1: opponent1.clone(),
                    opponent2: opponent2.clone(),
                };
                self.send_to(waiting_id, started.clone());
                self.send_to(conn_id, started);
                info!(
                    "[Arena] Match created: {} - {} vs {}",
                    match_id, opponent1, opponent2
                );
            }
            _ => {
                // No one waiting, a stale waiting entry, or the waiter joining
                // again: (re)park the caller.
                self.waiting = Some(conn_id);
                self.send_to(conn_id, ServerWsMessage::WaitingOpponent);
                info!("[Arena] {} ({}) is waiting for an opponent", username, conn_id);
            }
        }
    }

    /// Handle a move submission for an active match.
    fn submit_move(&mut self, conn_id: ConnId, match_id: &str, raw_move: &str) {
        let Some(mv) = Move::parse(raw_move) else {
            self.send_to(
                conn_id,
                ServerWsMessage::error("Invalid move. Must be EMP, SHIELD, or LASER"),
            );
            return;
        };

        let outcome = match self.matches.get_mut(match_id) {
            Some(game) => game.record_move(conn_id, mv),
            None => {
                self.send_to(conn_id, ServerWsMessage::error("Match not found"));
                return;
            }
        };

        match outcome {
            MoveOutcome::NotAParticipant => {
                self.send_to(conn_id, ServerWsMessage::error("You are not part of this match"));
            }
            MoveOutcome::AlreadyMoved => {
                // Dropped silently so resolution cannot fire twice.
                debug!("[Arena] Duplicate move from {} in {} ignored", conn_id, match_id);
            }
            MoveOutcome::Recorded { both_moved } => {
                debug!(
                    "[Arena] Move in {}: {} chose {}",
                    match_id,
                    self.username_of(conn_id).unwrap_or_default(),
                    mv
                );
                if both_moved {
                    self.finish_match(match_id);
                } else {
                    self.send_to(
                        conn_id,
                        ServerWsMessage::MoveReceived {
                            match_id: match_id.to_string(),
                        },
                    );
                }
            }
        }
    }

    /// Resolve a match whose both seats hold a move, broadcast the result, and
    /// dispatch the trailing credit adjustments.
    fn finish_match(&mut self, match_id: &str) {
        // Taking the match out of the table up front also guards against a
        // second resolution for the same id.
        let Some(game) = self.matches.remove(match_id) else {
            return;
        };
        let (Some(move1), Some(move2)) = (game.player1.mv, game.player2.mv) else {
            return;
        };

        let winner = resolve(move1, move2);
        let (winner_conn_id, winner_username, loser_username) = match winner {
            Some(Winner::Player1) => (
                Some(game.player1.conn_id),
                Some(game.player1.username.clone()),
                Some(game.player2.username.clone()),
            ),
            Some(Winner::Player2) => (
                Some(game.player2.conn_id),
                Some(game.player2.username.clone()),
                Some(game.player1.username.clone()),
            ),
            None => (None, None, None),
        };

        let result = ServerWsMessage::MatchResult {
            match_id: match_id.to_string(),
            moves: MatchMoves {
                player1: RevealedMove {
                    username: game.player1.username.clone(),
                    mv: move1,
                },
                player2: RevealedMove {
                    username: game.player2.username.clone(),
                    mv: move2,
                },
            },
            winner_conn_id,
            winner_username: winner_username.clone(),
            is_tie: winner.is_none(),
        };
        self.send_to(game.player1.conn_id, result.clone());
        self.send_to(game.player2.conn_id, result);
        info!(
            "[Arena] Match {} finished: {}",
            match_id,
            winner_username.as_deref().unwrap_or("TIE")
        );

        // Credits trail the broadcast. Each adjustment is an independent
        // fire-and-forget dispatch; the ledger logs failures on its side.
        if let (Some(winner), Some(loser)) = (winner_username, loser_username) {
            self.credits.do_send(AdjustCredits {
                username: winner,
                delta: WINNER_CREDITS,
            });
            self.credits.do_send(AdjustCredits {
                username: loser,
                delta: LOSER_CREDITS,
            });
        }
    }

    /// Handle an abrupt disconnect during any phase.
    fn disconnect(&mut self, conn_id: ConnId) {
        self.sessions.remove(&conn_id);

        if self.waiting == Some(conn_id) {
            self.waiting = None;
            info!("[Arena] Waiting player disconnected");
            return;
        }

        // A connection is seated in at most one match, so stop at the first hit.
        let cancelled = self
            .matches
            .iter()
            .find(|(_, game)| game.has_player(conn_id))
            .map(|(id, _)| id.clone());
        if let Some(match_id) = cancelled {
            if let Some(game) = self.matches.remove(&match_id) {
                if let Some(opponent) = game.opponent_of(conn_id) {
                    self.send_to(
                        opponent.conn_id,
                        ServerWsMessage::OpponentLeft {
                            match_id: match_id.clone(),
                        },
                    );
                }
                info!("[Arena] Player left match {}, match cancelled", match_id);
            }
        }
    }
}

/// Message: a connection opened and registered its outbound transport.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: ConnId,
    pub addr: SessionAddr,
}

/// Message: a connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: ConnId,
}

/// Message: a connection asks to be matched.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinArena {
    pub conn_id: ConnId,
    pub username: String,
}

/// Message: a connection submits a move for a match.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitMove {
    pub conn_id: ConnId,
    pub match_id: MatchId,
    pub mv: String,
}

impl Actor for ArenaServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for ArenaServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.connect(msg.conn_id, msg.addr);
    }
}

impl Handler<Disconnect> for ArenaServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.disconnect(msg.conn_id);
    }
}

impl Handler<JoinArena> for ArenaServer {
    type Result = ();

    fn handle(&mut self, msg: JoinArena, _ctx: &mut Self::Context) -> Self::Result {
        self.join_arena(msg.conn_id, &msg.username);
    }
}

impl Handler<SubmitMove> for ArenaServer {
    type Result = ();

    fn handle(&mut self, msg: SubmitMove, _ctx: &mut Self::Context) -> Self::Result {
        self.submit_move(msg.conn_id, &msg.match_id, &msg.mv);
    }
}
