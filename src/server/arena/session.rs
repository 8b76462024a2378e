/// WebSocket session handler for the arena.
///
/// This actor manages a single client's connection to the arena, registering it
/// with the coordinator on open, relaying join and move requests, and
/// serializing outbound frames back to the client. Connection teardown is what
/// drives queue and match cancellation on the coordinator side.
use actix::prelude::*;
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use uuid::Uuid;

use super::messages::{ClientWsMessage, ServerWsMessage};
use super::server::{ArenaServer, Connect, Disconnect, JoinArena, SubmitMove};
use super::types::ConnId;
use crate::server::ws_error::ws_error_message;

/// Represents one client's WebSocket session in the arena.
pub struct ArenaSession {
    pub conn_id: ConnId,
    pub arena_addr: Addr<ArenaServer>,
}

impl Actor for ArenaSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection with the coordinator.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.arena_addr.do_send(Connect {
            conn_id: self.conn_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. The coordinator clears the queue entry or
    /// cancels the match this connection was part of.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.arena_addr.do_send(Disconnect {
            conn_id: self.conn_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ArenaSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::JoinArena { username }) => {
                        self.arena_addr.do_send(JoinArena {
                            conn_id: self.conn_id,
                            username,
                        });
                    }
                    Ok(ClientWsMessage::MakeMove { match_id, mv }) => {
                        self.arena_addr.do_send(SubmitMove {
                            conn_id: self.conn_id,
                            match_id,
                            mv,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Ping received; can be ignored or responded to.
                    }
                    Err(_e) => {
                        ctx.text(ws_error_message(
                            "INVALID_MESSAGE",
                            "Invalid client message",
                            None,
                        ));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ArenaSession {
    type Result = ();

    /// Handles frames sent from the coordinator to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                log::error!("Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the arena.
///
/// Each accepted connection gets a fresh opaque connection id; the display name
/// arrives later with the client's join request.
pub async fn ws_arena(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ArenaSession {
            conn_id: Uuid::new_v4(),
            arena_addr: data.arena_addr.clone(),
        },
        &req,
        stream,
    )
}
