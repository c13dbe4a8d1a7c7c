use std::sync::Arc;

use async_trait::async_trait;
use teloxide::utils::html::escape;

use crate::core::{HandlerError, HandlerResult};
use crate::dispatch::{CommandContext, CommandHandler};
use crate::system::{HostIdentity, HostInfo};
use crate::transport::Reply;

/// Reports who and where the agent is running.
pub struct SystemInfoCommand {
    host: Arc<dyn HostIdentity>,
}

impl SystemInfoCommand {
    pub fn new(host: Arc<dyn HostIdentity>) -> Self {
        Self { host }
    }
}

pub fn format_host_info(info: &HostInfo) -> String {
    format!(
        "Username: {}\nHostname: {}\nOS : {}\nArch: {}",
        escape(&info.username),
        escape(&info.hostname),
        escape(&info.os),
        escape(&info.arch)
    )
}

#[async_trait]
impl CommandHandler for SystemInfoCommand {
    fn description(&self) -> &'static str {
        "show user, host name, OS and architecture"
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        let info = self
            .host
            .host_info()
            .map_err(|e| HandlerError::collaborator("Failed to read host information", e))?;

        ctx.reply(Reply::html(format_host_info(&info))).await?;
        Ok(())
    }
}
