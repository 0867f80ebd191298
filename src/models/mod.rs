//! Domain models.
//!
//! The registry manages a single resource, [`ProgrammingLang`]. Clients send a
//! [`ProgrammingLangInput`] and the service fills in identity and timestamps.

mod programming_lang;

pub use programming_lang::*;
