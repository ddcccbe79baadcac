use clap::Parser;
use color_eyre::eyre::Result;
use one_list::config::{load_config, AppConfig};
use one_list::item::ItemStore;
use one_list::logging::{default_log_dir, init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use one_list::storage::{MemoryStorage, SqliteStorage, Storage};
use one_list::template::TemplateEngine;
use one_list::web::{self, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::info;

/// One List - a single-user task list with reminders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.one-list/config.toml)
    #[arg(short, long, env = "ONE_LIST_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind the server to (overrides server.addr)
    #[arg(short, long, env = "ONE_LIST_ADDR")]
    addr: Option<String>,

    /// Login password (overrides auth.password)
    #[arg(long, env = "ONE_LIST_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// SQLite database file (overrides storage.db_path)
    #[arg(long, env = "ONE_LIST_DB")]
    db: Option<PathBuf>,

    /// Keep items in memory only; nothing survives a restart
    #[arg(long, env = "ONE_LIST_IN_MEMORY", default_value = "false", conflicts_with = "db")]
    in_memory: bool,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "ONE_LIST_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "ONE_LIST_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.one-list/logs)
    #[arg(long, env = "ONE_LIST_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    /// Command-line values win over the config file.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.addr {
            config.server.addr.clone_from(addr);
        }
        if let Some(password) = &self.password {
            config.auth.password.clone_from(password);
        }
        if let Some(db) = &self.db {
            config.storage.db_path = Some(db.clone());
        }
    }
}

fn report_bind_error(addr: SocketAddr, log_file: &Path, e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of one-list may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Kill the existing process:   pkill one-list");
        eprintln!("  2. Use a different port:        one-list --addr 127.0.0.1:8081");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

fn open_storage(args: &Args, config: &AppConfig) -> Result<Box<dyn Storage>> {
    if args.in_memory {
        info!("Using in-memory storage");
        return Ok(Box::new(MemoryStorage::new()));
    }
    let path = config.storage.resolved_db_path();
    Ok(Box::new(SqliteStorage::open(&path)?))
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Received shutdown signal, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args.log_dir.clone().unwrap_or_else(default_log_dir);
    let log_file = log_dir.join(LOG_FILENAME);

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let mut config = load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;

    let addr: SocketAddr = config.server.addr.parse()?;

    let store = ItemStore::new(open_storage(&args, &config)?);
    let templates = TemplateEngine::new()?;
    let state = AppState::new(store, templates, &config.auth);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            report_bind_error(addr, &log_file, &e);
            state.close();
            return Err(e.into());
        }
    };

    info!("Starting One List on {addr}");
    let served = web::serve(listener, state.clone(), shutdown_signal()).await;
    state.close();
    served?;

    info!("One List stopped");
    Ok(())
}
