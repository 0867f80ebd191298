mod programming_lang;
mod schema;

pub use programming_lang::SqliteProgrammingLangRepository;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::Connection;

use crate::context::RequestContext;

/// Number of SQLite VM instructions between cancellation checks.
const PROGRESS_CHECK_OPS: i32 = 1_000;

/// Handle to the SQLite store.
///
/// Opened once at startup and handed to each gateway by reference. Clones
/// share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "lang-registry")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("langs.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        schema::create_schema(&conn)
    }

    /// Locks the connection for one request, interrupting any statement that
    /// is still running once `ctx` is cancelled or past its deadline.
    fn acquire(&self, ctx: &RequestContext) -> Option<ConnectionGuard<'_>> {
        let conn = self.conn.lock().ok()?;
        let watched = ctx.clone();
        conn.progress_handler(PROGRESS_CHECK_OPS, Some(move || watched.is_done()));
        Some(ConnectionGuard { conn })
    }
}

/// Locked connection with a cancellation hook installed. The hook is removed on drop.
struct ConnectionGuard<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl std::ops::Deref for ConnectionGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for ConnectionGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}
