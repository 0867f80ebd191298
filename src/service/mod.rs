//! Use cases for programming language records.
//!
//! The service validates input, runs the existence and uniqueness checks,
//! stamps timestamps and hands the result to the repository. The checks are
//! check-then-act; the unique index on `name` is what stops a concurrent
//! duplicate from being stored.

use chrono::{DateTime, TimeDelta, Utc};

use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::models::{ProgrammingLang, ProgrammingLangInput, MODEL_NAME};
use crate::repository::ProgrammingLangRepository;

pub const MIN_LIMIT: i64 = 5;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: i64 = 20;

/// Falls back to [`DEFAULT_LIMIT`] when `limit` is outside `[MIN_LIMIT, MAX_LIMIT]`.
///
/// Out-of-range values are replaced, not clamped.
pub fn resolve_limit(limit: i64) -> i64 {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    }
}

/// Next `updated_at` for a record last touched at `previous`. Always later than `previous`.
fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

pub struct ProgrammingLangService<R> {
    repo: R,
}

impl<R: ProgrammingLangRepository> ProgrammingLangService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[cfg(test)]
    fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<ProgrammingLang>> {
        let resolved = resolve_limit(limit);
        if resolved != limit {
            tracing::debug!("Limit {} out of range, using {}", limit, resolved);
        }
        self.repo.list(ctx, resolved)
    }

    pub fn get(&self, ctx: &RequestContext, id: i64) -> Result<ProgrammingLang> {
        self.repo.read(ctx, id)
    }

    /// Creates a record, rejecting a name that is already taken.
    pub fn create(
        &self,
        ctx: &RequestContext,
        input: ProgrammingLangInput,
    ) -> Result<ProgrammingLang> {
        let name = input.validated_name()?.to_string();

        match self.repo.read_by_name(ctx, &name) {
            Ok(existing) => {
                tracing::debug!("Rejected duplicate name {:?} (id {})", name, existing.id);
                return Err(Error::AlreadyExists {
                    model_name: MODEL_NAME,
                    id: existing.id,
                    name: existing.name,
                });
            }
            Err(e) if e.is_no_such_data() => {}
            Err(e) => return Err(e),
        }

        let now = Utc::now();
        let lang = self.repo.create(
            ctx,
            ProgrammingLang {
                id: 0,
                name,
                feature: input.feature,
                created_at: now,
                updated_at: now,
            },
        )?;

        tracing::info!("Created programming language {} ({})", lang.id, lang.name);
        Ok(lang)
    }

    /// Copies `name` and `feature` from `input` onto the stored record.
    ///
    /// `id` and `created_at` always come from the stored record.
    pub fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: ProgrammingLangInput,
    ) -> Result<ProgrammingLang> {
        let name = input.validated_name()?.to_string();

        let mut lang = match self.repo.read(ctx, id) {
            Ok(lang) => lang,
            Err(e) if e.is_no_such_data() => {
                tracing::debug!("Update of missing programming language {}", id);
                return Err(Error::NoSuchData {
                    model_name: MODEL_NAME,
                    id: Some(id),
                    name: Some(name),
                });
            }
            Err(e) => return Err(e),
        };

        lang.name = name;
        lang.feature = input.feature;
        lang.updated_at = next_update_stamp(lang.updated_at);

        let lang = self.repo.update(ctx, lang)?;
        tracing::info!("Updated programming language {} ({})", lang.id, lang.name);
        Ok(lang)
    }

    pub fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        match self.repo.read(ctx, id) {
            Ok(_) => {}
            Err(e) if e.is_no_such_data() => {
                tracing::debug!("Delete of missing programming language {}", id);
                return Err(Error::NoSuchData {
                    model_name: MODEL_NAME,
                    id: Some(id),
                    name: None,
                });
            }
            Err(e) => return Err(e),
        }

        self.repo.delete(ctx, id)?;
        tracing::info!("Deleted programming language {}", id);
        Ok(())
    }
}
