//! Command handlers, one per command, and the registry the agent runs with

pub mod file;
pub mod help;
pub mod ip;
pub mod list;
pub mod ping;
pub mod screenshot;
pub mod systeminfo;

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config;
use crate::core::{HandlerError, RegistryError, SystemError};
use crate::dispatch::{CommandContext, HandlerRegistry, RegistryBuilder};
use crate::system::{
    Displays, FileSystem, HostIdentity, NetworkIdentity, OsDisplays, OsFileSystem, OsHost, OsNetwork,
};
use crate::transport::Reply;

pub use file::FileCommand;
pub use help::HelpCommand;
pub use ip::IpCommand;
pub use list::ListCommand;
pub use ping::PingCommand;
pub use screenshot::ScreenshotCommand;
pub use systeminfo::SystemInfoCommand;

/// The system operations handed to the handlers.
#[derive(Clone)]
pub struct Collaborators {
    pub fs: Arc<dyn FileSystem>,
    pub displays: Arc<dyn Displays>,
    pub network: Arc<dyn NetworkIdentity>,
    pub host: Arc<dyn HostIdentity>,
    /// Where screen captures are staged before upload
    pub scratch_dir: PathBuf,
}

impl Collaborators {
    /// Collaborators backed by the real host.
    pub fn from_os() -> Result<Self, SystemError> {
        Ok(Self {
            fs: Arc::new(OsFileSystem),
            displays: Arc::new(OsDisplays),
            network: Arc::new(OsNetwork::from_config()?),
            host: Arc::new(OsHost),
            scratch_dir: config::SCRATCH_DIR.clone(),
        })
    }
}

/// Registers every command. `help` is registered last and lists the others.
pub fn default_registry(collaborators: Collaborators) -> Result<HandlerRegistry, RegistryError> {
    let Collaborators {
        fs,
        displays,
        network,
        host,
        scratch_dir,
    } = collaborators;

    let mut builder = RegistryBuilder::new();
    builder
        .register("ping", PingCommand)?
        .register("systeminfo", SystemInfoCommand::new(host))?
        .register("list", ListCommand::new(Arc::clone(&fs)))?
        .register("file", FileCommand::new(fs))?
        .register("screenshot", ScreenshotCommand::new(displays, scratch_dir))?
        .register("ip", IpCommand::new(network))?;

    let listing = builder.commands();
    builder.register("help", HelpCommand::new(listing))?;

    Ok(builder.build())
}

/// Extracts the argument, answering with `usage` when there is none.
///
/// The usage reply is the only reply a failing invocation sends.
pub(crate) async fn require_argument<'a>(ctx: &CommandContext<'a>, usage: &str) -> Result<&'a str, HandlerError> {
    match ctx.argument() {
        Ok(argument) => Ok(argument),
        Err(e) => {
            ctx.reply(Reply::html(usage)).await?;
            Err(e.into())
        }
    }
}
