use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA: &str = include_str!("schema.sql");

/// Creates the table and indexes if they are missing. Safe to run on every start.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Failed to create programming_languages schema")?;
    tracing::debug!("Database schema ready");
    Ok(())
}
