use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "telectl")]
#[command(author, version, about = "Remote-control agent driven by Telegram slash commands", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Connect to the Bot API and serve commands (default)
    Run {
        /// Size of the handler worker pool (overrides WORKER_POOL_SIZE)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Print the registered commands and exit
    Commands,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
