//! Persistence gateway contract.
//!
//! [`ProgrammingLangRepository`] is the only polymorphic seam in the crate.
//! [`crate::db::SqliteProgrammingLangRepository`] is the production
//! implementation and [`InMemoryProgrammingLangRepository`] the test double.

mod memory;

pub use memory::InMemoryProgrammingLangRepository;

use crate::context::RequestContext;
use crate::error::Result;
use crate::models::ProgrammingLang;

pub trait ProgrammingLangRepository: Send + Sync {
    /// Up to `limit` records ordered by name. An empty store yields an empty list.
    fn list(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<ProgrammingLang>>;

    /// Exactly one record, or `NoSuchData`.
    fn read(&self, ctx: &RequestContext, id: i64) -> Result<ProgrammingLang>;

    /// The first record with this name, or `NoSuchData`.
    fn read_by_name(&self, ctx: &RequestContext, name: &str) -> Result<ProgrammingLang>;

    /// Inserts `lang` and returns it with the store-assigned id.
    fn create(&self, ctx: &RequestContext, lang: ProgrammingLang) -> Result<ProgrammingLang>;

    /// Overwrites the mutable fields of the record with `lang.id`.
    fn update(&self, ctx: &RequestContext, lang: ProgrammingLang) -> Result<ProgrammingLang>;

    fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()>;
}
