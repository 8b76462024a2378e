use actix::prelude::*;
use serde::{Deserialize, Serialize};

/// Client -> server frames on the chat websocket.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientChatMessage {
    SendMessage {
        username: String,
        message: String,
        /// Client-side timestamp; filled in server-side when absent.
        #[serde(default)]
        time: Option<String>,
    },
    Ping,
}

/// Server -> client frames on the chat websocket.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerChatMessage {
    ReceiveMessage {
        username: String,
        message: String,
        time: String,
    },
}
