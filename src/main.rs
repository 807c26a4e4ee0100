//! # SongRank CLI (`songrank`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `songrank init` | Create the SQLite database and run schema migrations |
//! | `songrank serve` | Start the HTTP API |
//! | `songrank add <name> <link>` | Submit a recommendation |
//! | `songrank list` | List all recommendations |
//! | `songrank get <id>` | Show one recommendation |
//! | `songrank top <amount>` | Highest-scored recommendations |
//! | `songrank random` | Weighted random pick |
//! | `songrank upvote <id>` | Add one point |
//! | `songrank downvote <id>` | Remove one point (drops the entry below −5) |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songrank::{commands, config, migrate, server};

/// SongRank: submit, browse, and vote on music recommendations.
#[derive(Parser)]
#[command(name = "songrank", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(
        long,
        global = true,
        env = "SONGRANK_CONFIG",
        default_value = "./config/songrank.toml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run repeatedly.
    Init,

    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Submit a new recommendation. Names must be unique.
    Add {
        name: String,
        youtube_link: String,
    },

    /// List all recommendations in submission order.
    List,

    /// Show a recommendation by id.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Show the highest-scored recommendations.
    Top {
        amount: usize,
    },

    /// Pick a recommendation at random, favoring well-liked ones.
    Random,

    /// Add one point to a recommendation.
    Upvote {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Remove one point from a recommendation.
    ///
    /// A recommendation whose score drops below -5 is deleted.
    Downvote {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songrank=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Add { name, youtube_link } => {
            commands::run_add(&cfg, &name, &youtube_link).await?;
        }
        Commands::List => {
            commands::run_list(&cfg).await?;
        }
        Commands::Get { id } => {
            commands::run_get(&cfg, id).await?;
        }
        Commands::Top { amount } => {
            commands::run_top(&cfg, amount).await?;
        }
        Commands::Random => {
            commands::run_random(&cfg).await?;
        }
        Commands::Upvote { id } => {
            commands::run_upvote(&cfg, id).await?;
        }
        Commands::Downvote { id } => {
            commands::run_downvote(&cfg, id).await?;
        }
    }

    Ok(())
}
