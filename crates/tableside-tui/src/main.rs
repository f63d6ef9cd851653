//! Tableside TUI entry point.

use std::{fs, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tableside_app::Runtime;
use tableside_client::{ReconnectPolicy, TransportConfig};
use tableside_core::store::{LogStore, MemoryStore, RedbStore};
use tableside_tui::TerminalDriver;
use tracing_subscriber::EnvFilter;

/// Tableside terminal chat client
#[derive(Parser, Debug)]
#[command(name = "tableside-tui")]
#[command(about = "Terminal chat client for the Tableside assistant")]
#[command(version)]
struct Args {
    /// Chat server base URL
    #[arg(short, long, default_value = "ws://localhost:8000")]
    server: String,

    /// Data directory for the persisted chat log and the log file
    #[arg(long, default_value = ".tableside")]
    data_dir: PathBuf,

    /// Keep chat logs in memory only (no persistence across runs)
    #[arg(long)]
    memory: bool,

    /// Connection handshake timeout in seconds
    #[arg(long, default_value_t = 10)]
    connect_timeout: u64,

    /// Redial automatically after the connection drops
    #[arg(long)]
    reconnect: bool,

    /// First redial delay in milliseconds (with --reconnect)
    #[arg(long, default_value_t = 500)]
    reconnect_initial_ms: u64,

    /// Redial delay ceiling in milliseconds (with --reconnect)
    #[arg(long, default_value_t = 30_000)]
    reconnect_max_ms: u64,
}

impl Args {
    fn transport_config(&self) -> TransportConfig {
        let reconnect = if self.reconnect {
            ReconnectPolicy::Backoff {
                initial: Duration::from_millis(self.reconnect_initial_ms),
                max: Duration::from_millis(self.reconnect_max_ms),
            }
        } else {
            ReconnectPolicy::Disabled
        };

        TransportConfig { connect_timeout: Duration::from_secs(self.connect_timeout), reconnect }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fs::create_dir_all(&args.data_dir)?;
    init_tracing(&args)?;

    let driver = TerminalDriver::new(args.server.clone(), args.transport_config())?;

    if args.memory {
        run(driver, MemoryStore::new()).await
    } else {
        let store = RedbStore::open(args.data_dir.join("chat.redb"))?;
        run(driver, store).await
    }
}

async fn run<S: LogStore>(
    driver: TerminalDriver,
    store: S,
) -> Result<(), Box<dyn std::error::Error>> {
    Ok(Runtime::new(driver, store).run().await?)
}

/// Log to a file under the data dir; stdout belongs to the alternate
/// screen.
fn init_tracing(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(args.data_dir.join("tableside.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
