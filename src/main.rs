//! configinfo server (v1)
//!
//! Serves a host application with a read-only configuration endpoint in front.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ tower-http layers ──▶ config_info middleware
//!                     (request id, trace,          │
//!                      timeout)                    ├── /configinfo[/<section>[/<option>]]
//!                                                  │       → read INI file → filter by
//!                                                  │         allow-list → JSON
//!                                                  │
//!                                                  └── anything else → wrapped app
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use configinfo::config::{load_config, ServerConfig};
use configinfo::http::default_app;
use configinfo::lifecycle::startup;
use configinfo::observability::logging;

#[derive(Parser)]
#[command(name = "configinfo")]
#[command(about = "Serve allow-listed configuration sections as read-only JSON", long_about = None)]
struct Cli {
    /// Deployment configuration (TOML).
    #[arg(short, long, default_value = "configinfo.toml")]
    config: PathBuf,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

/// How long shutdown waits on file reads still blocked in the blocking pool.
const BLOCKING_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config: ServerConfig = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        println!("{}: OK", cli.config.display());
        return ExitCode::SUCCESS;
    }

    logging::init_logging(&config.observability);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build the async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(serve(config));

    // A read stuck on a dead mount must not keep the process alive.
    runtime.shutdown_timeout(BLOCKING_SHUTDOWN_GRACE);
    code
}

async fn serve(config: ServerConfig) -> ExitCode {
    tracing::info!("configinfo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        endpoint = %config.config_info.endpoint_path,
        "Configuration loaded"
    );

    if let Err(e) = startup::start(config, default_app()).await {
        tracing::error!(error = %e, "Server terminated");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
