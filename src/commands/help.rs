use async_trait::async_trait;

use crate::core::HandlerResult;
use crate::dispatch::{CommandContext, CommandHandler, CommandInfo};
use crate::transport::Reply;

/// Lists the available commands, one usage line each.
pub struct HelpCommand {
    body: String,
}

impl HelpCommand {
    pub fn new(commands: Vec<CommandInfo>) -> Self {
        let body = commands
            .iter()
            .map(CommandInfo::usage_line)
            .collect::<Vec<_>>()
            .join("\n");
        Self { body }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    fn description(&self) -> &'static str {
        "list available commands"
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        ctx.reply(Reply::text(self.body.clone())).await?;
        Ok(())
    }
}
