/// Bounded chat history collaborator.
///
/// Keeps the most recent messages in memory for the history endpoint. The
/// relay stores into it fire-and-forget; nothing in the chat flow waits on it.
use actix::prelude::*;
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

use crate::config::chat::MAX_HISTORY;

/// One persisted chat message.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatEntry {
    pub username: String,
    pub message: String,
    pub time: String,
}

/// Message: persist one chat entry.
#[derive(Message)]
#[rtype(result = "()")]
pub struct StoreMessage(pub ChatEntry);

/// Message: fetch the retained history, oldest first.
#[derive(Message)]
#[rtype(result = "Vec<ChatEntry>")]
pub struct RecentMessages;

pub struct ChatHistory {
    entries: VecDeque<ChatEntry>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    fn store(&mut self, entry: ChatEntry) {
        // The oldest entry makes room once the cap is reached.
        if self.entries.len() == MAX_HISTORY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        debug!("[Chat] Message persisted ({} in history)", self.entries.len());
    }

    fn recent(&self) -> Vec<ChatEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Actor for ChatHistory {
    type Context = Context<Self>;
}

impl Handler<StoreMessage> for ChatHistory {
    type Result = ();

    fn handle(&mut self, msg: StoreMessage, _ctx: &mut Self::Context) -> Self::Result {
        self.store(msg.0);
    }
}

impl Handler<RecentMessages> for ChatHistory {
    type Result = MessageResult<RecentMessages>;

    fn handle(&mut self, _msg: RecentMessages, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.recent())
    }
}
