//! Outbound side of the Transport Client
//!
//! Handlers never talk to the Bot API directly; they hand a [`Reply`] to a
//! [`Transport`]. The Telegram implementation lives in `crate::telegram`, tests
//! use a recording implementation.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use teloxide::types::ChatId;
use tokio::io::AsyncRead;

use crate::core::TransportError;
use crate::dispatch::CommandInfo;

/// Longest message text the Bot API accepts, in UTF-16 code units.
pub const MAX_TEXT_LEN: usize = 4096;

/// Whether `body` fits in a single text message.
pub fn fits_in_message(body: &str) -> bool {
    body.encode_utf16().count() <= MAX_TEXT_LEN
}

/// Byte source for document and photo replies.
pub enum Attachment {
    /// A file the transport reads at send time
    Path(PathBuf),
    /// An already-open stream, uploaded under `file_name`
    Stream {
        reader: Box<dyn AsyncRead + Send + Unpin>,
        file_name: String,
    },
}

impl Attachment {
    /// Name the operator sees for the attachment.
    pub fn file_name(&self) -> String {
        match self {
            Attachment::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Attachment::Stream { file_name, .. } => file_name.clone(),
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Attachment::Stream { file_name, .. } => f.debug_struct("Stream").field("file_name", file_name).finish(),
        }
    }
}

/// One outbound message.
#[derive(Debug)]
pub enum Reply {
    /// Plain text, sent verbatim
    Text(String),
    /// HTML-formatted text
    Html(String),
    /// File attachment with caption
    Document { file: Attachment, caption: String },
    /// Image attachment with caption
    Photo { file: Attachment, caption: String },
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Reply::Text(body.into())
    }

    pub fn html(body: impl Into<String>) -> Self {
        Reply::Html(body.into())
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Text(_) => "text",
            Reply::Html(_) => "html",
            Reply::Document { .. } => "document",
            Reply::Photo { .. } => "photo",
        }
    }

    /// Message body, or the caption for attachments.
    pub fn body(&self) -> &str {
        match self {
            Reply::Text(body) | Reply::Html(body) => body,
            Reply::Document { caption, .. } | Reply::Photo { caption, .. } => caption,
        }
    }
}

/// Delivers replies to a chat.
///
/// Implementations must be safe to call from many handlers at once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one reply. No retries happen above this call.
    async fn send(&self, chat_id: ChatId, reply: Reply) -> Result<(), TransportError>;

    /// Advertises the registered commands to the operator's client, if the transport supports it.
    async fn publish_commands(&self, _commands: &[CommandInfo]) -> Result<(), TransportError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_body_uses_caption_for_attachments() {
        let reply = Reply::Photo {
            file: Attachment::Path(PathBuf::from("/tmp/0.png")),
            caption: "2026-01-01 00:00:00".to_string(),
        };
        assert_eq!(reply.kind(), "photo");
        assert_eq!(reply.body(), "2026-01-01 00:00:00");
    }

    #[test]
    fn test_attachment_file_name() {
        assert_eq!(Attachment::Path(PathBuf::from("/var/log/syslog")).file_name(), "syslog");
        let stream = Attachment::Stream {
            reader: Box::new(std::io::Cursor::new(Vec::<u8>::new())),
            file_name: "notes.txt".to_string(),
        };
        assert_eq!(stream.file_name(), "notes.txt");
        assert_eq!(format!("{:?}", stream), "Stream { file_name: \"notes.txt\" }");
    }

    #[test]
    fn test_message_length_limit() {
        assert!(fits_in_message(""));
        assert!(fits_in_message(&"a".repeat(MAX_TEXT_LEN)));
        assert!(!fits_in_message(&"a".repeat(MAX_TEXT_LEN + 1)));
        // Characters outside the BMP count twice
        assert!(!fits_in_message(&"😀".repeat(MAX_TEXT_LEN / 2 + 1)));
    }
}
