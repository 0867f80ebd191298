//! Server configuration.
//!
//! Every option can be given as a flag or through the environment. `main`
//! loads a `.env` file from the working directory before parsing, so values
//! there behave like real environment variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::db::Database;

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Address to bind the HTTP API to
    #[arg(long, env = "LANGREG_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP API
    #[arg(short, long, env = "LANGREG_PORT", default_value = "8080")]
    pub port: u16,

    /// SQLite database file. Defaults to the platform data directory.
    #[arg(long, env = "LANGREG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Per-request deadline in milliseconds, 0 to disable
    #[arg(long, env = "LANGREG_REQUEST_TIMEOUT_MS", default_value = "5000")]
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn open_database(&self) -> anyhow::Result<Database> {
        match &self.database {
            Some(path) => Database::open(path.clone()),
            None => Database::open_default(),
        }
    }
}
