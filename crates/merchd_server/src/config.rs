//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration for the merchd server.
///
/// Constructed explicitly at startup and passed into the pipeline; the
/// server reads no ambient global state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Service name, reported by the health check.
    pub service_name: String,
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Creates a configuration bound to the given address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            service_name: "merchd".to_string(),
            bind_addr,
            database_path: PathBuf::from("merchd.db"),
        }
    }

    /// Sets the service name.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Sets the database path.
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = path.as_ref().to_path_buf();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8080)))
    }
}
