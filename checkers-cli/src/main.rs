//! Checkers CLI - Command-line front-end for the rule engine
//!
//! Commands:
//! - new: Start a game and print its encoded form
//! - show: Draw an encoded game
//! - moves: List the move slots of one square
//! - apply: Select a piece and play one move, printing the new encoded game
//! - play: Hot-seat game on the terminal

mod commands;
mod render;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "8x4 checkers rule engine")]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game
    New(commands::NewArgs),
    /// Draw an encoded game
    Show(commands::ShowArgs),
    /// List available moves for a square
    Moves(commands::MovesArgs),
    /// Select a piece and move it
    Apply(commands::ApplyArgs),
    /// Play on this terminal
    Play(session::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::New(args) => commands::run_new(args),
        Commands::Show(args) => commands::run_show(args),
        Commands::Moves(args) => commands::run_moves(args),
        Commands::Apply(args) => commands::run_apply(args),
        Commands::Play(args) => session::run(args),
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
