use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

use super::{ConnectionGuard, Database};
use crate::context::RequestContext;
use crate::error::{DbMethod, Error, Result};
use crate::models::{ProgrammingLang, MODEL_NAME};
use crate::repository::ProgrammingLangRepository;

const SELECT_COLUMNS: &str = "SELECT id, name, feature, created_at, updated_at FROM programming_languages";

/// [`ProgrammingLangRepository`] backed by the `programming_languages` table.
///
/// Every statement is parameterized. Driver failures are reported as
/// [`Error::Db`] with the driver error kept as the source.
#[derive(Clone)]
pub struct SqliteProgrammingLangRepository {
    db: Database,
}

impl SqliteProgrammingLangRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn with_conn<T>(
        &self,
        ctx: &RequestContext,
        method: DbMethod,
        op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        if let Some(reason) = ctx.err() {
            return Err(Error::db_detail(MODEL_NAME, method, reason));
        }
        let conn: ConnectionGuard<'_> = self
            .db
            .acquire(ctx)
            .ok_or_else(|| Error::internal("database lock poisoned"))?;
        op(&*conn).map_err(|e| Error::db(MODEL_NAME, method, e))
    }
}

fn lang_from_row(row: &Row<'_>) -> rusqlite::Result<ProgrammingLang> {
    Ok(ProgrammingLang {
        id: row.get(0)?,
        name: row.get(1)?,
        feature: row.get(2)?,
        created_at: parse_datetime(3, row.get(3)?)?,
        updated_at: parse_datetime(4, row.get(4)?)?,
    })
}

fn parse_datetime(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn expect_one_row(method: DbMethod, affected: usize) -> Result<()> {
    if affected != 1 {
        return Err(Error::db_detail(
            MODEL_NAME,
            method,
            format!("total affected: {affected}"),
        ));
    }
    Ok(())
}

impl ProgrammingLangRepository for SqliteProgrammingLangRepository {
    fn list(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<ProgrammingLang>> {
        self.with_conn(ctx, DbMethod::List, |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY name LIMIT ?"))?;
            let langs = stmt
                .query_map([limit], lang_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(langs)
        })
    }

    fn read(&self, ctx: &RequestContext, id: i64) -> Result<ProgrammingLang> {
        self.with_conn(ctx, DbMethod::Read, |conn| {
            conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?"), [id], lang_from_row)
                .optional()
        })?
        .ok_or(Error::NoSuchData {
            model_name: MODEL_NAME,
            id: Some(id),
            name: None,
        })
    }

    fn read_by_name(&self, ctx: &RequestContext, name: &str) -> Result<ProgrammingLang> {
        self.with_conn(ctx, DbMethod::List, |conn| {
            conn.query_row(
                &format!("{SELECT_COLUMNS} WHERE name = ? ORDER BY name LIMIT 1"),
                [name],
                lang_from_row,
            )
            .optional()
        })?
        .ok_or_else(|| Error::NoSuchData {
            model_name: MODEL_NAME,
            id: None,
            name: Some(name.to_string()),
        })
    }

    fn create(&self, ctx: &RequestContext, mut lang: ProgrammingLang) -> Result<ProgrammingLang> {
        let (affected, id) = self.with_conn(ctx, DbMethod::Create, |conn| {
            let affected = conn.execute(
                "INSERT INTO programming_languages (name, feature, created_at, updated_at)
                 VALUES (?, ?, ?, ?)",
                (
                    &lang.name,
                    &lang.feature,
                    lang.created_at.to_rfc3339(),
                    lang.updated_at.to_rfc3339(),
                ),
            )?;
            Ok((affected, conn.last_insert_rowid()))
        })?;
        expect_one_row(DbMethod::Create, affected)?;

        lang.id = id;
        Ok(lang)
    }

    fn update(&self, ctx: &RequestContext, lang: ProgrammingLang) -> Result<ProgrammingLang> {
        let affected = self.with_conn(ctx, DbMethod::Update, |conn| {
            conn.execute(
                "UPDATE programming_languages SET name = ?, feature = ?, updated_at = ? WHERE id = ?",
                (
                    &lang.name,
                    &lang.feature,
                    lang.updated_at.to_rfc3339(),
                    lang.id,
                ),
            )
        })?;
        expect_one_row(DbMethod::Update, affected)?;

        Ok(lang)
    }

    fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        let affected = self.with_conn(ctx, DbMethod::Delete, |conn| {
            conn.execute("DELETE FROM programming_languages WHERE id = ?", [id])
        })?;
        expect_one_row(DbMethod::Delete, affected)
    }
}
