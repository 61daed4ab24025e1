//! Example to run the matchmakin server standalone
//!
//! Run with: cargo run -p matchmakin-server --example run_server

use matchmakin_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting matchmakin server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/", config.port);

    run_server(config).await
}
