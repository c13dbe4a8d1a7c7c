//! Bot instance creation and startup handshake

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::Me;
use tokio::time::sleep;

use crate::core::config;

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Token missing, invalid BOT_API_URL, or HTTP client construction failed
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.as_str();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token, client);

    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

fn is_retryable(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    ["restart", "network", "connection", "timed out", "connection refused"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Fetches the bot's own identity, retrying while the Bot API is unreachable.
///
/// Invalid tokens and other non-transient errors fail immediately.
pub async fn connect(bot: &Bot) -> anyhow::Result<Me> {
    let max_attempts = config::retry::STARTUP_MAX_ATTEMPTS;
    let mut attempt = 0;
    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                let err_str = e.to_string();
                attempt += 1;
                if attempt >= max_attempts || !is_retryable(&err_str) {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempt(s): {}",
                        attempt,
                        e
                    ));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {}s...",
                    attempt,
                    max_attempts,
                    err_str,
                    config::retry::STARTUP_RETRY_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}
