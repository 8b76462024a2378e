//! HTTP and WebSocket routing configuration.
//!
//! Defines the main endpoints for the arena, the global chat, and the small
//! HTTP surface (health check and chat history).

use actix_web::{Error, HttpResponse, error, web};
use serde_json::json;

use crate::server::arena::session::ws_arena;
use crate::server::chat::history::RecentMessages;
use crate::server::chat::session::ws_chat;
use crate::server::state::AppState;

/// Configure the application's HTTP/WebSocket routes.
///
/// Each websocket route is handled by its respective session actor, which
/// manages the connection lifecycle and relays business messages.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/arena").to(ws_arena))
        .service(web::resource("/ws/chat").to(ws_chat))
        .service(web::resource("/api/health").to(health))
        .service(web::resource("/api/chat/history").to(chat_history));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn chat_history(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let entries = data
        .chat_history
        .send(RecentMessages)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(entries))
}
