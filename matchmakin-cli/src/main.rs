//! matchmakin CLI - Command-line interface
//!
//! Commands:
//! - play: Track a lobby interactively in the terminal
//! - serve: Start the web front-end server
//! - simulate: Apply scripted roster operations and print the result

mod play;
mod server;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matchmakin")]
#[command(about = "Round-robin opponent pool tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a lobby interactively
    Play(play::PlayArgs),
    /// Start the web front-end server
    Serve(server::ServerArgs),
    /// Apply scripted operations and print the final roster
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Serve(args) => server::run(args),
        Commands::Simulate(args) => simulate::run(args),
    }
}

/// Log to stderr; quiet by default so the terminal UI stays readable
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
