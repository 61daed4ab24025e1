//! Serve command - host the tracker over HTTP
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), open_state(), start_server()
//! - Level 3: check_static_dir()
//! - Level 4: (routing lives in matchmakin-server)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use matchmakin_core::Session;
use matchmakin_server::{run_server_with_state, ServerConfig, ServerState};

use crate::play::load_roster;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, default_value = "8002")]
    pub port: u16,

    /// Directory holding the web front-end
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Start with these seven names (one per line) instead of 1..7
    #[arg(long, value_name = "FILE")]
    pub names: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Check flags and build the config
/// 2. Load the starting roster
/// 3. Serve until interrupted
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;
    let state = open_state(args.names.as_deref())?;

    println!("Serving tracker on http://localhost:{}/", config.port);

    start_server(config, state)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    check_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().into_owned(),
    })
}

fn open_state(names: Option<&Path>) -> Result<Arc<ServerState>> {
    let state = match names {
        Some(path) => {
            let roster = load_roster(path)?;
            tracing::info!(names = %path.display(), "starting with roster from file");
            ServerState::with_session(Session::with_roster(roster))
        }
        None => ServerState::new(),
    };
    Ok(Arc::new(state))
}

/// Blocks on a fresh tokio runtime
fn start_server(config: ServerConfig, state: Arc<ServerState>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server_with_state(config, state))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// A missing directory only disables the web page; a file is a mistake
fn check_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "No static directory at {}; only the JSON API is available.",
            path.display()
        );
        return Ok(());
    }

    if !path.is_dir() {
        anyhow::bail!("--static-dir is not a directory: {}", path.display());
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
