//! Dispatcher: the loop binding the update stream to command handlers.
//!
//! A single task reads updates in arrival order. Each resolved update runs on a
//! bounded worker pool (a semaphore sized to the pool, tasks tracked in a
//! `JoinSet`). Handler errors and panics stop at the task boundary: they are
//! logged and counted, and the loop keeps reading.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::registry::{CommandContext, CommandHandler, HandlerRegistry};
use super::update::{CommandInvocation, Update};
use crate::core::config;
use crate::core::HandlerError;
use crate::transport::Transport;

/// Dispatcher settings.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Maximum number of handlers running at once
    pub workers: usize,
    /// How long shutdown waits for in-flight handlers before aborting them
    pub shutdown_grace: Duration,
    /// Username of this bot; `/cmd@other_bot` is dropped when set
    pub bot_username: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: config::pool::DEFAULT_WORKERS,
            shutdown_grace: Duration::from_secs(config::pool::DEFAULT_SHUTDOWN_GRACE_SECS),
            bot_username: None,
        }
    }
}

impl DispatcherConfig {
    /// Settings read from the environment.
    pub fn from_env() -> Self {
        Self {
            workers: *config::pool::WORKERS,
            shutdown_grace: *config::pool::SHUTDOWN_GRACE,
            bot_username: None,
        }
    }

    /// Clamped to `1..=config::pool::MAX_CAPACITY`.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, config::pool::MAX_CAPACITY);
        self
    }

    #[must_use]
    pub fn shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    #[must_use]
    pub fn bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }
}

/// Why an update produced no dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Text does not start with a command token
    NotACommand,
    /// `/cmd@name` for a different bot
    AddressedElsewhere,
    /// No handler registered under this name
    Unknown(String),
}

/// Routing decision for one update.
pub enum Route {
    Dispatch {
        command: String,
        handler: Arc<dyn CommandHandler>,
    },
    Drop(DropReason),
}

/// Per-update outcome counters.
#[derive(Debug, Default)]
pub struct DispatchStats {
    received: AtomicU64,
    dropped: AtomicU64,
    replied: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub received: u64,
    pub dropped: u64,
    pub replied: u64,
    pub failed: u64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            replied: self.replied.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    transport: Arc<dyn Transport>,
    config: DispatcherConfig,
    stats: Arc<DispatchStats>,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry, transport: Arc<dyn Transport>, config: DispatcherConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            transport,
            config,
            stats: Arc::new(DispatchStats::default()),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Shared counters, still readable after [`Dispatcher::run`] consumed the dispatcher.
    pub fn stats(&self) -> Arc<DispatchStats> {
        Arc::clone(&self.stats)
    }

    /// Resolves an update against the registry.
    pub fn route(&self, update: &Update) -> Route {
        let Some(invocation) = CommandInvocation::parse(&update.text) else {
            return Route::Drop(DropReason::NotACommand);
        };
        if !invocation.is_addressed_to(self.config.bot_username.as_deref()) {
            return Route::Drop(DropReason::AddressedElsewhere);
        }
        match self.registry.resolve(invocation.name) {
            Some(handler) => Route::Dispatch {
                command: invocation.name.to_string(),
                handler,
            },
            None => Route::Drop(DropReason::Unknown(invocation.name.to_string())),
        }
    }

    /// Consumes updates until the channel closes or `shutdown` fires, then waits
    /// for in-flight handlers (bounded by the configured grace period).
    pub async fn run(self, mut updates: mpsc::Receiver<Update>, shutdown: CancellationToken) {
        let workers = self.config.workers.clamp(1, config::pool::MAX_CAPACITY);
        let permits = Arc::new(Semaphore::new(workers));
        let mut tasks: JoinSet<()> = JoinSet::new();

        log::info!(
            "Dispatcher started: {} command(s), {} worker(s)",
            self.registry.len(),
            workers
        );

        loop {
            let update = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                update = updates.recv() => match update {
                    Some(update) => update,
                    None => break,
                },
            };

            while let Some(joined) = tasks.try_join_next() {
                observe_join(joined);
            }

            self.stats.received.fetch_add(1, Ordering::Relaxed);

            let (command, handler) = match self.route(&update) {
                Route::Dispatch { command, handler } => (command, handler),
                Route::Drop(reason) => {
                    self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                    log::debug!("Dropped update from chat {}: {:?}", update.chat_id, reason);
                    continue;
                }
            };

            // Waits here while the pool is full; the bounded channel pushes back on the feeder.
            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            log::debug!("Dispatching /{} for chat {}", command, update.chat_id);
            let transport = Arc::clone(&self.transport);
            let stats = Arc::clone(&self.stats);
            tasks.spawn(async move {
                let _permit = permit;
                execute(handler.as_ref(), &command, &update, transport.as_ref(), &stats).await;
            });
        }

        drop(updates);
        self.drain(tasks).await;

        let summary = self.stats.snapshot();
        log::info!(
            "Dispatcher stopped: received={} dropped={} replied={} failed={}",
            summary.received,
            summary.dropped,
            summary.replied,
            summary.failed
        );
    }

    async fn drain(&self, mut tasks: JoinSet<()>) {
        if tasks.is_empty() {
            return;
        }
        log::info!("Waiting for {} in-flight handler(s)", tasks.len());

        let wait_all = async {
            while let Some(joined) = tasks.join_next().await {
                observe_join(joined);
            }
        };
        if tokio::time::timeout(self.config.shutdown_grace, wait_all).await.is_err() {
            log::warn!(
                "Shutdown grace of {:?} elapsed, aborting {} handler(s)",
                self.config.shutdown_grace,
                tasks.len()
            );
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
        }
    }
}

/// Runs one handler inside the failure-isolation boundary.
async fn execute(
    handler: &dyn CommandHandler,
    command: &str,
    update: &Update,
    transport: &dyn Transport,
    stats: &DispatchStats,
) {
    let ctx = CommandContext::new(update.chat_id, &update.text, transport);
    let outcome = AssertUnwindSafe(handler.handle(ctx)).catch_unwind().await;

    match outcome {
        Ok(Ok(())) => {
            stats.replied.fetch_add(1, Ordering::Relaxed);
            log::debug!("/{} for chat {} completed", command, update.chat_id);
        }
        Ok(Err(err)) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            log_failure(command, update, &err);
        }
        Err(_) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            log::error!("/{} for chat {} panicked", command, update.chat_id);
        }
    }
}

fn log_failure(command: &str, update: &Update, err: &HandlerError) {
    match err {
        HandlerError::BadArgument(_) => {
            log::warn!("/{} for chat {} rejected: {}", command, update.chat_id, err);
        }
        HandlerError::Collaborator { .. } | HandlerError::Transport(_) => {
            log::error!(
                "An error occurred while handling /{} for chat {} ({}): {}",
                command,
                update.chat_id,
                err.kind(),
                err
            );
        }
    }
}

fn observe_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if e.is_cancelled() {
            log::warn!("Handler task was cancelled");
        } else {
            log::error!("Handler task failed to join: {}", e);
        }
    }
}
