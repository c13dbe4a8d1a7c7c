use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::require_argument;
use crate::core::{HandlerError, HandlerResult};
use crate::dispatch::{CommandContext, CommandHandler};
use crate::system::{DirEntry, FileSystem};
use crate::transport::{fits_in_message, Attachment, Reply};

pub const USAGE: &str = "Usage: <b>/list</b> &lt;dir_path&gt;";

/// File name used when a listing is too long for one message.
pub const LISTING_FILE_NAME: &str = "listing.txt";

/// Lists a directory, one entry per line.
///
/// A listing longer than one message is uploaded as a text document instead.
pub struct ListCommand {
    fs: Arc<dyn FileSystem>,
}

impl ListCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

/// `d` for directories, `-` for everything else, padded and tab-separated from the name.
pub fn format_listing(entries: &[DirEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let indicator = if entry.is_dir { 'd' } else { '-' };
            format!("{:<5}\t{}", indicator, entry.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl CommandHandler for ListCommand {
    fn description(&self) -> &'static str {
        "list files and directories"
    }

    fn argument_hint(&self) -> Option<&'static str> {
        Some("<dir>")
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        let dir = require_argument(&ctx, USAGE).await?;

        let entries = self
            .fs
            .list_directory(Path::new(dir))
            .await
            .map_err(|e| HandlerError::collaborator("Failed to read directory", e))?;

        let listing = format_listing(&entries);
        let reply = if fits_in_message(&listing) {
            Reply::text(listing)
        } else {
            log::debug!("Listing of {} is {} bytes, sending as a document", dir, listing.len());
            Reply::Document {
                file: Attachment::Stream {
                    reader: Box::new(std::io::Cursor::new(listing.into_bytes())),
                    file_name: LISTING_FILE_NAME.to_string(),
                },
                caption: dir.to_string(),
            }
        };
        ctx.reply(reply).await?;
        Ok(())
    }
}
