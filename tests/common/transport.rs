//! Recording transport
//!
//! Stores every reply instead of sending it. Sends can be made to fail per
//! reply kind or per chat to exercise transport failures.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::types::ChatId;

use telectl::core::TransportError;
use telectl::dispatch::CommandInfo;
use telectl::transport::{Attachment, Reply, Transport};

/// One recorded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: ChatId,
    pub kind: &'static str,
    /// Text, or caption for attachments
    pub body: String,
    pub file_name: Option<String>,
    /// Path of a path-backed attachment and whether it existed at send time
    pub path: Option<(PathBuf, bool)>,
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    rejected: Mutex<Vec<Sent>>,
    published: Mutex<Vec<CommandInfo>>,
    failing_kinds: HashSet<&'static str>,
    failing_chats: HashSet<i64>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends of `kind` ("text", "html", "document", "photo") fail.
    pub fn failing_kind(mut self, kind: &'static str) -> Self {
        self.failing_kinds.insert(kind);
        self
    }

    /// Sends to `chat_id` fail.
    pub fn failing_chat(mut self, chat_id: ChatId) -> Self {
        self.failing_chats.insert(chat_id.0);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Replies that were refused, in attempt order.
    pub fn rejected(&self) -> Vec<Sent> {
        self.rejected.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: ChatId) -> Vec<Sent> {
        self.sent().into_iter().filter(|s| s.chat_id == chat_id).collect()
    }

    pub fn published(&self) -> Vec<CommandInfo> {
        self.published.lock().unwrap().clone()
    }

    /// Polls until `count` replies were recorded or `timeout` elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.sent.lock().unwrap().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent.lock().unwrap().len() >= count
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, chat_id: ChatId, reply: Reply) -> Result<(), TransportError> {
        let kind = reply.kind();
        let body = reply.body().to_string();
        let (file_name, path) = match &reply {
            Reply::Text(_) | Reply::Html(_) => (None, None),
            Reply::Document { file, .. } | Reply::Photo { file, .. } => {
                let path = match file {
                    Attachment::Path(path) => Some((path.clone(), path.exists())),
                    Attachment::Stream { .. } => None,
                };
                (Some(file.file_name()), path)
            }
        };

        let record = Sent {
            chat_id,
            kind,
            body,
            file_name,
            path,
        };

        if self.failing_kinds.contains(kind) || self.failing_chats.contains(&chat_id.0) {
            self.rejected.lock().unwrap().push(record);
            return Err(TransportError::Rejected(format!("{kind} to {chat_id} refused by test")));
        }
        self.sent.lock().unwrap().push(record);
        Ok(())
    }

    async fn publish_commands(&self, commands: &[CommandInfo]) -> Result<(), TransportError> {
        self.published.lock().unwrap().extend_from_slice(commands);
        Ok(())
    }
}
