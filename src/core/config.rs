use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// Empty when neither is set; startup refuses to continue in that case
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .map(|token| token.trim().to_string())
        .unwrap_or_default()
});

/// Custom Bot API server URL (local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("BOT_API_URL").ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: telectl.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "telectl.log".to_string()));

/// Log level for both terminal and file output
/// Read from LOG_LEVEL environment variable (error, warn, info, debug, trace)
/// Default: info
pub static LOG_LEVEL: Lazy<log::LevelFilter> =
    Lazy::new(|| env_parse("LOG_LEVEL").unwrap_or(log::LevelFilter::Info));

/// Scratch directory for short-lived artifacts (screen captures)
/// Read from SCRATCH_DIR environment variable
/// Default: the OS temporary directory
pub static SCRATCH_DIR: Lazy<PathBuf> = Lazy::new(|| {
    env::var_os("SCRATCH_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
});

/// Endpoint that echoes the caller's public address as plain text
/// Read from PUBLIC_IP_URL environment variable
pub static PUBLIC_IP_URL: Lazy<String> =
    Lazy::new(|| env::var("PUBLIC_IP_URL").unwrap_or_else(|_| "https://api.ipify.org".to_string()));

/// Worker pool configuration
pub mod pool {
    use super::{env_parse, Duration, Lazy};

    /// Default number of handlers allowed to run at once
    pub const DEFAULT_WORKERS: usize = 50;

    /// Default capacity of the channel between the update feeder and the dispatcher
    pub const DEFAULT_UPDATE_BUFFER: usize = 256;

    /// Default time to wait for in-flight handlers on shutdown (in seconds)
    pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

    /// Upper bound for the pool size and the update buffer.
    /// Both are backed by a tokio semaphore, which panics above this.
    pub const MAX_CAPACITY: usize = tokio::sync::Semaphore::MAX_PERMITS;

    /// Zero falls back to `default`, anything above [`MAX_CAPACITY`] is clamped.
    pub fn capacity(value: Option<usize>, default: usize) -> usize {
        match value {
            Some(0) | None => default,
            Some(n) => n.min(MAX_CAPACITY),
        }
    }

    /// Size of the handler worker pool
    /// Read from WORKER_POOL_SIZE environment variable, zero is ignored
    pub static WORKERS: Lazy<usize> = Lazy::new(|| capacity(env_parse("WORKER_POOL_SIZE"), DEFAULT_WORKERS));

    /// Capacity of the inbound update channel
    /// Read from UPDATE_BUFFER environment variable, zero is ignored
    pub static UPDATE_BUFFER: Lazy<usize> =
        Lazy::new(|| capacity(env_parse("UPDATE_BUFFER"), DEFAULT_UPDATE_BUFFER));

    /// Grace period for in-flight handlers during shutdown
    /// Read from SHUTDOWN_GRACE_SECS environment variable
    pub static SHUTDOWN_GRACE: Lazy<Duration> = Lazy::new(|| {
        Duration::from_secs(env_parse("SHUTDOWN_GRACE_SECS").unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS))
    });
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for outbound HTTP requests (in seconds)
    /// Three times the Bot API client default so document uploads have room
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// Address used to pick the outbound interface for local address lookup.
    /// Connecting a UDP socket sends nothing.
    pub const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";
}

/// Long polling configuration
pub mod polling {
    use super::Duration;

    /// Server-side long poll timeout (in seconds), kept under the request timeout
    pub const TIMEOUT_SECS: u64 = 9;

    /// Long poll timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }

    /// Updates that arrived while the agent was offline are discarded
    pub const DROP_PENDING_UPDATES: bool = true;
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum attempts to reach the Bot API at startup
    pub const STARTUP_MAX_ATTEMPTS: u32 = 60;

    /// Delay between startup attempts (in seconds)
    pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

    /// Startup retry delay duration
    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_RETRY_DELAY_SECS)
    }
}
