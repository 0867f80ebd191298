use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::ProgrammingLangRepository;
use crate::context::RequestContext;
use crate::error::{DbMethod, Error, Result};
use crate::models::{ProgrammingLang, MODEL_NAME};

/// In-process repository with the same contract as the SQLite gateway.
///
/// Individual methods can be made to fail with a `Db` error via
/// [`fail_on`](Self::fail_on), which lets tests drive store failures
/// through the service without a real database.
#[derive(Debug, Default)]
pub struct InMemoryProgrammingLangRepository {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, ProgrammingLang>,
    failing: HashSet<DbMethod>,
}

impl InMemoryProgrammingLangRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, keeping the ids of `langs`.
    pub fn with_langs(langs: impl IntoIterator<Item = ProgrammingLang>) -> Self {
        let repo = Self::new();
        if let Ok(mut state) = repo.state.lock() {
            for lang in langs {
                state.last_id = state.last_id.max(lang.id);
                state.rows.insert(lang.id, lang);
            }
        }
        repo
    }

    /// Makes every later call of `method` fail with a `Db` error.
    pub fn fail_on(&self, method: DbMethod) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(method);
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn begin(&self, ctx: &RequestContext, method: DbMethod) -> Result<MutexGuard<'_, MemoryState>> {
        if let Some(reason) = ctx.err() {
            return Err(Error::db_detail(MODEL_NAME, method, reason));
        }
        let state = self
            .state
            .lock()
            .map_err(|_| Error::internal("in-memory store lock poisoned"))?;
        if state.failing.contains(&method) {
            return Err(Error::db_detail(MODEL_NAME, method, "injected failure"));
        }
        Ok(state)
    }
}

fn sorted_by_name(rows: &BTreeMap<i64, ProgrammingLang>) -> Vec<&ProgrammingLang> {
    let mut langs: Vec<_> = rows.values().collect();
    langs.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    langs
}

fn affected_mismatch(method: DbMethod, affected: usize) -> Error {
    Error::db_detail(MODEL_NAME, method, format!("total affected: {affected}"))
}

impl ProgrammingLangRepository for InMemoryProgrammingLangRepository {
    fn list(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<ProgrammingLang>> {
        let state = self.begin(ctx, DbMethod::List)?;
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(sorted_by_name(&state.rows)
            .into_iter()
            .take(take)
            .cloned()
            .collect())
    }

    fn read(&self, ctx: &RequestContext, id: i64) -> Result<ProgrammingLang> {
        let state = self.begin(ctx, DbMethod::Read)?;
        state.rows.get(&id).cloned().ok_or(Error::NoSuchData {
            model_name: MODEL_NAME,
            id: Some(id),
            name: None,
        })
    }

    fn read_by_name(&self, ctx: &RequestContext, name: &str) -> Result<ProgrammingLang> {
        let state = self.begin(ctx, DbMethod::List)?;
        sorted_by_name(&state.rows)
            .into_iter()
            .find(|lang| lang.name == name)
            .cloned()
            .ok_or_else(|| Error::NoSuchData {
                model_name: MODEL_NAME,
                id: None,
                name: Some(name.to_string()),
            })
    }

    fn create(&self, ctx: &RequestContext, mut lang: ProgrammingLang) -> Result<ProgrammingLang> {
        let mut state = self.begin(ctx, DbMethod::Create)?;
        state.last_id += 1;
        lang.id = state.last_id;
        state.rows.insert(lang.id, lang.clone());
        Ok(lang)
    }

    fn update(&self, ctx: &RequestContext, lang: ProgrammingLang) -> Result<ProgrammingLang> {
        let mut state = self.begin(ctx, DbMethod::Update)?;
        let Some(row) = state.rows.get_mut(&lang.id) else {
            return Err(affected_mismatch(DbMethod::Update, 0));
        };
        row.name = lang.name.clone();
        row.feature = lang.feature.clone();
        row.updated_at = lang.updated_at;
        Ok(lang)
    }

    fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        let mut state = self.begin(ctx, DbMethod::Delete)?;
        match state.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(affected_mismatch(DbMethod::Delete, 0)),
        }
    }
}
