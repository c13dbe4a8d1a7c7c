use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use telectl::cli::{Cli, Commands};
use telectl::commands::{default_registry, Collaborators};
use telectl::core::{config, init_logger, install_panic_hook};
use telectl::dispatch::{Dispatcher, DispatcherConfig, HandlerRegistry};
use telectl::telegram::{connect, create_bot, feed_updates, TelegramTransport};
use telectl::transport::Transport;

/// Main entry point for the agent
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, registry).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before config is first read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH, *config::LOG_LEVEL)?;
    install_panic_hook();

    match cli.command {
        Some(Commands::Run { workers }) => run_agent(workers).await,
        Some(Commands::Commands) => print_commands(),
        None => {
            log::info!("No command specified, running agent in default mode");
            run_agent(None).await
        }
    }
}

fn build_registry() -> Result<HandlerRegistry> {
    let collaborators = Collaborators::from_os().context("Failed to set up system collaborators")?;
    default_registry(collaborators).context("Failed to register commands")
}

fn print_commands() -> Result<()> {
    let registry = build_registry()?;
    for command in registry.commands() {
        println!("{:<24} {}", command.usage_line(), command.description);
    }
    Ok(())
}

async fn run_agent(workers: Option<usize>) -> Result<()> {
    let init_start = std::time::Instant::now();
    log::info!("Starting agent...");

    let registry = build_registry()?;

    let bot = create_bot()?;
    let me = connect(&bot).await?;
    let username = me.username.clone();
    log::info!("Bot username: {:?}, Bot ID: {}", username, me.id);

    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    if let Err(e) = transport.publish_commands(registry.commands()).await {
        log::warn!("Failed to publish command menu: {}. Continuing anyway.", e);
    }

    let mut dispatcher_config = DispatcherConfig::from_env().bot_username(username.clone());
    if let Some(workers) = workers {
        dispatcher_config = dispatcher_config.workers(workers);
    }
    let dispatcher = Dispatcher::new(registry, transport, dispatcher_config);

    let shutdown = CancellationToken::new();
    let (tx, rx) = mpsc::channel(*config::pool::UPDATE_BUFFER);
    let feeder = tokio::spawn(feed_updates(bot, tx, shutdown.clone()));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Shutting down gracefully...");
                signal_token.cancel();
            }
            Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    log::info!(
        "{} has been started in {:.2}s",
        username.as_deref().unwrap_or("agent"),
        init_start.elapsed().as_secs_f64()
    );

    dispatcher.run(rx, shutdown.clone()).await;

    // The dispatcher also stops when the feeder ends on its own
    shutdown.cancel();
    if let Err(e) = feeder.await {
        log::error!("Long polling task failed: {}", e);
    }

    log::info!("Agent stopped");
    Ok(())
}
