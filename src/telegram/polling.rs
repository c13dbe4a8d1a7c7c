//! Long polling feeder: Bot API updates in, `dispatch::Update`s out

use futures_util::StreamExt;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, UpdateKind};
use teloxide::update_listeners::{AsUpdateStream, Polling, UpdateListener};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::config;
use crate::dispatch;

/// Converts a Bot API update into a dispatcher update. Only text messages qualify.
pub fn to_dispatch_update(update: teloxide::types::Update) -> Option<dispatch::Update> {
    match update.kind {
        UpdateKind::Message(message) => message
            .text()
            .map(|text| dispatch::Update::new(message.chat.id, text)),
        _ => None,
    }
}

/// Polls the Bot API and forwards text messages in arrival order.
///
/// Returns when `shutdown` fires, the listener ends, or the dispatcher side of
/// `updates` is gone. A full channel blocks polling until the dispatcher catches up.
pub async fn feed_updates(bot: Bot, updates: mpsc::Sender<dispatch::Update>, shutdown: CancellationToken) {
    let builder = Polling::builder(bot)
        .timeout(config::polling::timeout())
        .allowed_updates(vec![AllowedUpdate::Message]);
    let builder = if config::polling::DROP_PENDING_UPDATES {
        builder.drop_pending_updates()
    } else {
        builder
    };
    let mut listener = builder.build();

    let stop_token = listener.stop_token();
    let stream = listener.as_stream();
    tokio::pin!(stream);

    log::info!("Long polling started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                stop_token.stop();
                break;
            }
            next = stream.next() => match next {
                Some(Ok(update)) => {
                    let Some(update) = to_dispatch_update(update) else {
                        continue;
                    };
                    if updates.send(update).await.is_err() {
                        log::info!("Dispatcher is gone, stopping long polling");
                        break;
                    }
                }
                Some(Err(e)) => {
                    log::warn!("An error from the update listener: {}", e);
                }
                None => {
                    log::warn!("Update listener ended");
                    break;
                }
            },
        }
    }
    log::info!("Long polling stopped");
}
