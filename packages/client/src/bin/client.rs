//! Interactive focus-session client.
//!
//! Starts, pauses, and stops focus sessions against a zazen server, keeps
//! the countdown converged with every other client of the same user via a
//! 2-second status poll, and plays procedural ambient noise.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin zazen-client
//! cargo run --bin zazen-client -- --url http://127.0.0.1:8080 --duration-mins 25
//! ```

use clap::Parser;

use zazen_client::runner::{RunnerConfig, run_client};
use zazen_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "zazen-client")]
#[command(about = "Focus-session timer with cross-client sync and ambient noise", long_about = None)]
struct Args {
    /// Base URL of the focus backend
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Session length in minutes (presets: 15, 25, 45, 60)
    #[arg(short = 'd', long, default_value_t = 25)]
    duration_mins: u32,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = RunnerConfig {
        base_url: args.url,
        duration_secs: args.duration_mins * 60,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
