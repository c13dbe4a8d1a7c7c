use async_trait::async_trait;

use crate::core::HandlerResult;
use crate::dispatch::{CommandContext, CommandHandler};
use crate::transport::Reply;

/// Liveness check.
pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    fn description(&self) -> &'static str {
        "check that the agent is alive"
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        ctx.reply(Reply::text("pong")).await?;
        Ok(())
    }
}
