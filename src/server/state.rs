// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds references to the main actor addresses (arena coordinator, chat relay,
//! and chat history). Used to share state between HTTP/WebSocket handlers and
//! the actor system.

use actix::Addr;

use crate::server::arena::server::ArenaServer;
use crate::server::chat::history::ChatHistory;
use crate::server::chat::server::ChatServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the arena coordinator actor (registry, queue, match table).
    pub arena_addr: Addr<ArenaServer>,
    /// Address of the chat relay actor.
    pub chat_addr: Addr<ChatServer>,
    /// Address of the chat history actor, queried by the history endpoint.
    pub chat_history: Addr<ChatHistory>,
}

impl AppState {
    /// Create a new AppState with the given actor addresses.
    pub fn new(
        arena_addr: Addr<ArenaServer>,
        chat_addr: Addr<ChatServer>,
        chat_history: Addr<ChatHistory>,
    ) -> Self {
        AppState {
            arena_addr,
            chat_addr,
            chat_history,
        }
    }
}
