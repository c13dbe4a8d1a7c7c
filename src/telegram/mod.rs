//! Telegram Bot API transport client

pub mod bot;
pub mod polling;
pub mod transport;

// Re-exports for convenience
pub use bot::{connect, create_bot};
pub use polling::feed_updates;
pub use transport::TelegramTransport;
