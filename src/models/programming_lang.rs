use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Model name used in error messages.
pub const MODEL_NAME: &str = "ProgrammingLang";

/// Property name of [`ProgrammingLang::name`] as reported in validation errors.
pub const PROPERTY_NAME: &str = "Name";

pub const NAME_MIN_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 20;

const NAME_LENGTH_MESSAGE: &str = "Length of Name should be 0 < name < 21";

/// A programming language record.
///
/// `id` is assigned by the store on creation and never changes afterwards.
/// `created_at` is stamped once; `updated_at` moves forward on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingLang {
    pub id: i64,
    /// Between 1 and 20 characters, expected to be unique.
    pub name: String,
    /// Free text, unconstrained.
    pub feature: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a language.
///
/// Only the mutable fields are read. Any `id` or timestamps sent by the
/// client are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgrammingLangInput {
    pub name: Option<String>,
    #[serde(default)]
    pub feature: String,
}

impl ProgrammingLangInput {
    pub fn new(name: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            feature: feature.into(),
        }
    }

    /// Returns the validated name, or the validation failure.
    pub fn validated_name(&self) -> Result<&str> {
        let name = self.name.as_deref().ok_or(Error::Required {
            property: PROPERTY_NAME,
        })?;
        validate_name(name)?;
        Ok(name)
    }
}

/// Checks that `name` has between [`NAME_MIN_LEN`] and [`NAME_MAX_LEN`] characters.
pub fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(Error::InvalidProperty {
            property: PROPERTY_NAME,
            message: NAME_LENGTH_MESSAGE,
        });
    }
    Ok(())
}
