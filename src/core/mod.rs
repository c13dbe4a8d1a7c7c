//! Core utilities, configuration, and error types

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{ArgumentError, HandlerError, HandlerResult, RegistryError, SystemError, TransportError};
pub use logging::{init_logger, install_panic_hook};
