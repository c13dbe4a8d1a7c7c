use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::require_argument;
use crate::core::{HandlerError, HandlerResult};
use crate::dispatch::{CommandContext, CommandHandler};
use crate::system::FileSystem;
use crate::transport::{Attachment, Reply};

pub const USAGE: &str = "Usage: <b>/file</b> &lt;file_path&gt;";

/// Uploads a file as a document, captioned with the requested path.
pub struct FileCommand {
    fs: Arc<dyn FileSystem>,
}

impl FileCommand {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

#[async_trait]
impl CommandHandler for FileCommand {
    fn description(&self) -> &'static str {
        "download a file"
    }

    fn argument_hint(&self) -> Option<&'static str> {
        Some("<file>")
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        let file_path = require_argument(&ctx, USAGE).await?;
        let path = Path::new(file_path);

        let reader = self
            .fs
            .open_file(path)
            .await
            .map_err(|e| HandlerError::collaborator("Failed to open file", e))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());

        ctx.reply(Reply::Document {
            file: Attachment::Stream { reader, file_name },
            caption: file_path.to_string(),
        })
        .await?;
        Ok(())
    }
}
