//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use studyhub_core::config;
use studyhub_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "studyhub")]
#[command(version)]
#[command(about = "Tutoring sessions and their video meetings, from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Act as this user id instead of the one in config
    #[arg(long, global = true, value_name = "ID", env = "STUDYHUB_USER")]
    user: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List sessions, upcoming first
    List {
        /// Print the sorted sessions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Join a session's meeting, creating it if needed
    Join {
        /// The ID of the session to join
        #[arg(value_name = "SESSION_ID")]
        id: String,

        /// Print the meeting link without opening a browser
        #[arg(long = "no-open")]
        no_open: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, user } = cli;

    // default to the interactive view
    let Some(command) = command else {
        let config = config::Config::load().context("load config")?;
        let _log_guard = logging::init(LogTarget::File(&config::paths::logs_dir()), "info")?;
        return commands::view::run(&config, user).await;
    };

    match command {
        Commands::List { json } => {
            let config = config::Config::load().context("load config")?;
            let _log_guard = logging::init(LogTarget::Stderr, "warn")?;
            commands::list::run(&config, user, json).await
        }
        Commands::Join { id, no_open } => {
            let config = config::Config::load().context("load config")?;
            let _log_guard = logging::init(LogTarget::Stderr, "warn")?;
            commands::join::run(&config, user, &id, no_open).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
