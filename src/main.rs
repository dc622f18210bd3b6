use std::net::IpAddr;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use todo_api::config::{Config, ConfigOverrides};

#[derive(Parser)]
#[command(name = "todo_api", about = "REST backend for the to-do list")]
struct Cli {
    /// Listen port (falls back to PORT, then 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Bind address (falls back to BIND_ADDR, then 0.0.0.0)
    #[arg(long)]
    bind_addr: Option<IpAddr>,

    /// SQLite database path (falls back to TODO_DB, then the platform data dir)
    #[arg(long)]
    db_path: Option<String>,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = match Config::load(ConfigOverrides {
        port: cli.port,
        bind_addr: cli.bind_addr,
        db_path: cli.db_path,
    }) {
        Ok(config) => config,
        Err(err) => {
            error!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = todo_api::serve(config).await {
        error!("Server error: {err}");
        std::process::exit(1);
    }
}
