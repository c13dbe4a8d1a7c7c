//! Inbound units of work

use teloxide::types::ChatId;

/// One inbound message, consumed exactly once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Originating chat
    pub chat_id: ChatId,
    /// Raw message text, unmodified
    pub text: String,
}

impl Update {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

/// Command name and remaining text derived from an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInvocation<'a> {
    /// Token after the leading `/`, without any `@botname` suffix
    pub name: &'a str,
    /// `botname` from a `/name@botname` token
    pub mention: Option<&'a str>,
    /// Everything after the command token (candidate argument, possibly empty)
    pub rest: &'a str,
}

impl<'a> CommandInvocation<'a> {
    /// Parses `/<name>[@<bot>] [rest]`. Returns `None` for anything else.
    pub fn parse(text: &'a str) -> Option<Self> {
        let body = text.strip_prefix('/')?;
        let (token, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));

        let (name, mention) = match token.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (token, None),
        };
        if name.is_empty() {
            return None;
        }

        Some(Self { name, mention, rest })
    }

    /// Whether the command is meant for the bot called `username`.
    ///
    /// Unaddressed commands are for everyone; Telegram usernames compare case-insensitively.
    pub fn is_addressed_to(&self, username: Option<&str>) -> bool {
        match (self.mention, username) {
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            _ => true,
        }
    }
}
