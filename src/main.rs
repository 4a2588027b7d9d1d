//! presence-proxy
//!
//! Upstream proxy API for a personal site: price and holdings lookups,
//! and two status lines (latest commit, latest post), each served as a
//! stable JSON envelope with CDN cache hints.
//!
//! ```text
//!     Browser / CDN
//!          │  GET /api/...
//!          ▼
//!   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │ http server  │──▶│  handlers    │──▶│  upstream    │──▶ Jupiter / GitHub / Reddit
//!   │ req-id/trace │   │ method+config│   │  fetcher     │
//!   └──────────────┘   └──────┬───────┘   └──────┬───────┘
//!          ▲                  │                  │
//!          │           ┌──────▼───────┐          │
//!          └───────────│  response    │◀─────────┘
//!                      │ envelope+cache│  normalize | translate
//!                      └──────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use presence_proxy::lifecycle::{self, StartupOptions};

#[derive(Debug, Parser)]
#[command(name = "presence-proxy")]
#[command(about = "Upstream proxy API for matty.lol", version)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "PRESENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = StartupOptions {
        config_path: cli.config,
        bind_address: cli.bind,
    };

    match lifecycle::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Config and logging errors arrive before a subscriber exists.
            if tracing::dispatcher::has_been_set() {
                tracing::error!(error = %e, "Fatal startup error");
            } else {
                eprintln!("presence-proxy: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
