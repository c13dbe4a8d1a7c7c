use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{HandlerError, HandlerResult};
use crate::dispatch::{CommandContext, CommandHandler};
use crate::system::NetworkIdentity;
use crate::transport::Reply;

/// Reports the public and local addresses. Both lookups must succeed.
pub struct IpCommand {
    network: Arc<dyn NetworkIdentity>,
}

impl IpCommand {
    pub fn new(network: Arc<dyn NetworkIdentity>) -> Self {
        Self { network }
    }
}

pub fn format_addresses(public: IpAddr, local: IpAddr) -> String {
    format!("Public IP: <b>{}</b>\nLocal IP: <b>{}</b>", public, local)
}

#[async_trait]
impl CommandHandler for IpCommand {
    fn description(&self) -> &'static str {
        "show public and local IP addresses"
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult {
        let public = self
            .network
            .resolve_public_address()
            .await
            .map_err(|e| HandlerError::collaborator("Failed to retrieve public IP address", e))?;

        let local = self
            .network
            .resolve_local_address()
            .await
            .map_err(|e| HandlerError::collaborator("Failed to retrieve local IP address", e))?;

        ctx.reply(Reply::html(format_addresses(public, local))).await?;
        Ok(())
    }
}
