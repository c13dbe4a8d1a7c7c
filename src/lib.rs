//! telectl - remote-control agent driven by Telegram slash commands
//!
//! An operator sends `/<command> [argument]` to the bot; the agent runs the
//! matching local operation and replies in the same chat.
//!
//! # Module Structure
//!
//! - `core`: configuration, error types, logging
//! - `dispatch`: argument extraction, handler registry, dispatcher loop
//! - `commands`: one handler per command and the default registry
//! - `system`: local operations (filesystem, displays, network, host)
//! - `transport`: the outbound reply seam
//! - `telegram`: Telegram Bot API transport client

pub mod cli;
pub mod commands;
pub mod core;
pub mod dispatch;
pub mod system;
pub mod telegram;
pub mod transport;

// Re-export commonly used types for convenience
pub use core::{config, HandlerError};
pub use dispatch::{Dispatcher, DispatcherConfig, HandlerRegistry, Update};
pub use transport::{Reply, Transport};
