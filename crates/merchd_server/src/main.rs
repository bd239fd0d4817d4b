//! merchd server binary.
//!
//! Opens (or creates) the SQLite store, verifies connectivity once, and
//! serves the HTTP surface. Settings failures, store open failures and
//! the initial ping are the only fatal errors; everything after startup
//! is recoverable at the request boundary.

use anyhow::{Context, Result};
use clap::Parser;
use merchd_server::{build_router, HandlerContext, RequestHandler, ServerConfig};
use merchd_store::{SqliteStore, Store};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// merchd e-commerce backend.
#[derive(Parser, Debug)]
#[command(name = "merchd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Service name reported by the health check
    #[arg(long, default_value = "merchd")]
    name: String,

    /// Address to bind the HTTP server to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Path to the SQLite database file
    #[arg(short, long, default_value = "merchd.db")]
    database: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::new(args.bind)
        .with_service_name(&args.name)
        .with_database_path(&args.database);

    let store = SqliteStore::open(&config.database_path).with_context(|| {
        format!(
            "failed to open store at {}",
            config.database_path.display()
        )
    })?;
    store.ping().context("initial store ping failed")?;
    info!(path = %config.database_path.display(), "store connected");

    let bind_addr = config.bind_addr;
    let service_name = config.service_name.clone();
    let context = Arc::new(HandlerContext::new(config, Arc::new(store)));
    let app = build_router(Arc::new(RequestHandler::new(context)));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(name = %service_name, addr = %bind_addr, "starting webserver");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("http server failed")?;

    Ok(())
}
