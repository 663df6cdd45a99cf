mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lifegarden::config::GardenConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifegarden", version, about = "Tend your habits like a garden")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List habits with today's status
    List,
    /// Plant a new habit
    Add {
        title: String,
        /// Health, Career, Spirituality, Relationships, Finances or Creativity
        #[arg(long)]
        area: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Mark a habit done (or undo it) for a day
    Toggle {
        id: String,
        /// Calendar day as YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show level, XP and per-area balance
    Stats,
    /// Show each habit's plant
    Garden,
    /// Show today's wisdom
    Wisdom,
    /// Ask the coach for habit ideas
    Suggest {
        goal: String,
        /// Plant suggestion number N (1-based)
        #[arg(long)]
        accept: Option<usize>,
    },
    /// Chat with Sage, the garden coach
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = GardenConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List => cli::habits::list(&config)?,
        Command::Add {
            title,
            area,
            description,
            emoji,
        } => cli::habits::add(&config, &title, &area, description, emoji)?,
        Command::Toggle { id, date } => cli::habits::toggle(&config, &id, date.as_deref())?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Garden => cli::stats::garden(&config)?,
        Command::Wisdom => cli::coach::wisdom(&config).await?,
        Command::Suggest { goal, accept } => cli::coach::suggest(&config, &goal, accept).await?,
        Command::Chat => cli::coach::chat(&config).await?,
    }

    Ok(())
}
