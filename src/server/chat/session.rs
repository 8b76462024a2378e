/// WebSocket session handler for the global chat.
use actix::prelude::*;
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use uuid::Uuid;

use super::messages::{ClientChatMessage, ServerChatMessage};
use super::server::{ChatServer, Connect, Disconnect, Publish};
use crate::server::arena::types::ConnId;
use crate::server::ws_error::ws_error_message;

/// Represents one client's WebSocket session in the global chat.
pub struct ChatSession {
    pub conn_id: ConnId,
    pub chat_addr: Addr<ChatServer>,
}

impl Actor for ChatSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.chat_addr.do_send(Connect {
            conn_id: self.conn_id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.chat_addr.do_send(Disconnect {
            conn_id: self.conn_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChatSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientChatMessage>(&text) {
                    Ok(ClientChatMessage::SendMessage {
                        username,
                        message,
                        time,
                    }) => {
                        self.chat_addr.do_send(Publish {
                            username,
                            message,
                            time,
                        });
                    }
                    Ok(ClientChatMessage::Ping) => {}
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

impl Handler<ServerChatMessage> for ChatSession {
    type Result = ();

    fn handle(&mut self, msg: ServerChatMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                log::error!("Failed to serialize ServerChatMessage: {}", e);
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

/// WebSocket endpoint for the global chat.
pub async fn ws_chat(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ChatSession {
            conn_id: Uuid::new_v4(),
            chat_addr: data.chat_addr.clone(),
        },
        &req,
        stream,
    )
}
