//! Command dispatch engine: argument extraction, handler registry and the dispatcher loop

pub mod args;
pub mod dispatcher;
pub mod registry;
pub mod update;

// Re-exports for convenience
pub use args::extract_argument;
pub use dispatcher::{DispatchStats, Dispatcher, DispatcherConfig, DropReason, Route, StatsSnapshot};
pub use registry::{CommandContext, CommandHandler, CommandInfo, HandlerRegistry, RegistryBuilder};
pub use update::{CommandInvocation, Update};
