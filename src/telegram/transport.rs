//! `Transport` over the Telegram Bot API

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, InputFile, ParseMode};

use crate::core::TransportError;
use crate::dispatch::CommandInfo;
use crate::transport::{Attachment, Reply, Transport};

/// The Bot API refuses empty message text; an empty listing is sent as this.
pub const EMPTY_BODY_PLACEHOLDER: &str = "(empty)";

/// Sends replies with a shared `Bot`. `Bot` is cheap to clone and safe to use concurrently.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn input_file(file: Attachment) -> InputFile {
    match file {
        Attachment::Path(path) => InputFile::file(path),
        Attachment::Stream { reader, file_name } => InputFile::read(reader).file_name(file_name),
    }
}

fn non_empty(body: String) -> String {
    if body.trim().is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        body
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, chat_id: ChatId, reply: Reply) -> Result<(), TransportError> {
        let kind = reply.kind();
        match reply {
            Reply::Text(body) => {
                self.bot.send_message(chat_id, non_empty(body)).await?;
            }
            Reply::Html(body) => {
                self.bot
                    .send_message(chat_id, non_empty(body))
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Reply::Document { file, caption } => {
                self.bot.send_document(chat_id, input_file(file)).caption(caption).await?;
            }
            Reply::Photo { file, caption } => {
                self.bot.send_photo(chat_id, input_file(file)).caption(caption).await?;
            }
        }
        log::debug!("Sent {} reply to chat {}", kind, chat_id);
        Ok(())
    }

    async fn publish_commands(&self, commands: &[CommandInfo]) -> Result<(), TransportError> {
        let menu: Vec<BotCommand> = commands
            .iter()
            .map(|command| BotCommand::new(command.name.clone(), command.description))
            .collect();
        self.bot.set_my_commands(menu).await?;
        Ok(())
    }
}
