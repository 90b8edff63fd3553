//! Stand-in focus-session backend.
//!
//! Keeps one user's focus history in memory and enforces the
//! single-active-session invariant behind the /focus endpoints.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin zazen-server
//! cargo run --bin zazen-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use zazen_server::{AppState, Server};
use zazen_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "zazen-server")]
#[command(about = "In-memory focus-session backend", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = Server::new(Arc::new(AppState::default()));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
