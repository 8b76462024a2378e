//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with WebSocket endpoints for the arena and the global chat.

use actix::Actor;
use actix_web::{App, HttpServer, web};

use economy::ledger::CreditLedger;
use server::arena::server::ArenaServer;
use server::chat::history::ChatHistory;
use server::chat::server::ChatServer;

pub mod config;
mod economy;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the credit ledger (default economy collaborator for post-match adjustments).
    let ledger = CreditLedger::new().start();

    // Start the arena coordinator actor (registry, matchmaking queue, match table).
    let arena_addr = ArenaServer::new(ledger.recipient()).start();

    // Start the chat history keeper and the chat relay.
    let chat_history = ChatHistory::new().start();
    let chat_addr = ChatServer::new(chat_history.clone().recipient()).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(
        arena_addr,
        chat_addr,
        chat_history,
    ));

    // Start the HTTP server with WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
