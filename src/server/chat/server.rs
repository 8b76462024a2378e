/// Global chat relay actor.
///
/// Tracks connected chat clients and rebroadcasts every message to all of
/// them, including the sender. Each message is also handed to the history
/// collaborator fire-and-forget: a slow or failed store never delays or
/// suppresses the broadcast.
use actix::prelude::*;
use chrono::Utc;
use log::{debug, info};
use std::collections::HashMap;

use super::history::{ChatEntry, StoreMessage};
use super::messages::ServerChatMessage;
use crate::server::arena::types::ConnId;

type SessionAddr = Recipient<ServerChatMessage>;

pub struct ChatServer {
    /// Connected chat clients, by connection id.
    sessions: HashMap<ConnId, SessionAddr>,
    /// History collaborator for message persistence.
    history: Recipient<StoreMessage>,
}

impl ChatServer {
    pub fn new(history: Recipient<StoreMessage>) -> Self {
        Self {
            sessions: HashMap::new(),
            history,
        }
    }

    fn connect(&mut self, conn_id: ConnId, addr: SessionAddr) {
        debug!("[Chat] Connection {} joined", conn_id);
        self.sessions.insert(conn_id, addr);
    }

    fn disconnect(&mut self, conn_id: ConnId) {
        debug!("[Chat] Connection {} left", conn_id);
        self.sessions.remove(&conn_id);
    }

    /// Persist and rebroadcast one message.
    fn publish(&self, username: String, message: String, time: Option<String>) {
        let time = time.unwrap_or_else(|| Utc::now().to_rfc3339());
        info!("[Chat] {}: {}", username, message);

        self.history.do_send(StoreMessage(ChatEntry {
            username: username.clone(),
            message: message.clone(),
            time: time.clone(),
        }));

        let out = ServerChatMessage::ReceiveMessage {
            username,
            message,
            time,
        };
        for addr in self.sessions.values() {
            addr.do_send(out.clone());
        }
    }
}

/// Message: a chat connection opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: ConnId,
    pub addr: SessionAddr,
}

/// Message: a chat connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: ConnId,
}

/// Message: a client sent a chat message to relay.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Publish {
    pub username: String,
    pub message: String,
    pub time: Option<String>,
}

impl Actor for ChatServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.connect(msg.conn_id, msg.addr);
    }
}

impl Handler<Disconnect> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.disconnect(msg.conn_id);
    }
}

impl Handler<Publish> for ChatServer {
    type Result = ();

    fn handle(&mut self, msg: Publish, _ctx: &mut Self::Context) -> Self::Result {
        self.publish(msg.username, msg.message, msg.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Default)]
    struct FrameRecorder {
        received: Vec<ServerChatMessage>,
    }

    impl Actor for FrameRecorder {
        type Context = Context<Self>;
    }

    impl Handler<ServerChatMessage> for FrameRecorder {
        type Result = ();

        fn handle(&mut self, msg: ServerChatMessage, _: &mut Context<Self>) -> Self::Result {
            self.received.push(msg);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<ServerChatMessage>")]
    struct TakeFrames;

    impl Handler<TakeFrames> for FrameRecorder {
        type Result = MessageResult<TakeFrames>;

        fn handle(&mut self, _: TakeFrames, _: &mut Context<Self>) -> Self::Result {
            MessageResult(std::mem::take(&mut self.received))
        }
    }

    #[derive(Default)]
    struct StoreRecorder {
        stored: Vec<ChatEntry>,
    }

    impl Actor for StoreRecorder {
        type Context = Context<Self>;
    }

    impl Handler<StoreMessage> for StoreRecorder {
        type Result = ();

        fn handle(&mut self, msg: StoreMessage, _: &mut Context<Self>) -> Self::Result {
            self.stored.push(msg.0);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<ChatEntry>")]
    struct TakeStored;

    impl Handler<TakeStored> for StoreRecorder {
        type Result = MessageResult<TakeStored>;

        fn handle(&mut self, _: TakeStored, _: &mut Context<Self>) -> Self::Result {
            MessageResult(std::mem::take(&mut self.stored))
        }
    }

    #[actix::test]
    async fn messages_are_broadcast_to_everyone_including_the_sender() {
        let store = StoreRecorder::default().start();
        let mut server = ChatServer::new(store.clone().recipient());

        let r1 = FrameRecorder::default().start();
        let r2 = FrameRecorder::default().start();
        server.connect(Uuid::new_v4(), r1.clone().recipient());
        server.connect(Uuid::new_v4(), r2.clone().recipient());

        server.publish(
            "Nova".to_string(),
            "hello arena".to_string(),
            Some("2026-08-06T12:00:00Z".to_string()),
        );

        let expected = ServerChatMessage::ReceiveMessage {
            username: "Nova".to_string(),
            message: "hello arena".to_string(),
            time: "2026-08-06T12:00:00Z".to_string(),
        };
        assert_eq!(r1.send(TakeFrames).await.unwrap(), vec![expected.clone()]);
        assert_eq!(r2.send(TakeFrames).await.unwrap(), vec![expected]);

        let stored = store.send(TakeStored).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].message, "hello arena");
    }

    #[actix::test]
    async fn missing_time_is_filled_server_side() {
        let store = StoreRecorder::default().start();
        let mut server = ChatServer::new(store.clone().recipient());

        let r1 = FrameRecorder::default().start();
        server.connect(Uuid::new_v4(), r1.clone().recipient());
        server.publish("Zed".to_string(), "gg".to_string(), None);

        let frames = r1.send(TakeFrames).await.unwrap();
        match &frames[..] {
            [ServerChatMessage::ReceiveMessage { time, .. }] => {
                assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
            }
            other => panic!("expected a single ReceiveMessage, got {:?}", other),
        }
    }

    #[actix::test]
    async fn departed_sessions_stop_receiving_broadcasts() {
        let store = StoreRecorder::default().start();
        let mut server = ChatServer::new(store.clone().recipient());

        let r1 = FrameRecorder::default().start();
        let r2 = FrameRecorder::default().start();
        let c1 = Uuid::new_v4();
        server.connect(c1, r1.clone().recipient());
        server.connect(Uuid::new_v4(), r2.clone().recipient());

        server.disconnect(c1);
        server.publish("Zed".to_string(), "anyone here?".to_string(), None);

        assert!(r1.send(TakeFrames).await.unwrap().is_empty());
        assert_eq!(r2.send(TakeFrames).await.unwrap().len(), 1);
    }
}
