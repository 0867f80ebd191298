//! Error taxonomy shared by every layer.
//!
//! Each variant maps to exactly one [`ErrorKind`]. The HTTP layer classifies
//! by kind only, so adding context to a message never changes a status code.

use std::fmt;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Discriminator used to classify an [`Error`] without inspecting its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    Required,
    InvalidProperty,
    NoSuchData,
    AlreadyExists,
    Db,
    Unclassified,
}

/// Store operation that failed, reported in [`Error::Db`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbMethod {
    Create,
    List,
    Read,
    Update,
    Delete,
}

impl DbMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::List => "List",
            Self::Read => "Read",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for DbMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A query or path parameter could not be parsed.
    #[error("{parameter} is invalid. {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: &'static str,
    },

    #[error("{property} is required.")]
    Required { property: &'static str },

    #[error("{property} is invalid. {message}")]
    InvalidProperty {
        property: &'static str,
        message: &'static str,
    },

    /// Lookup by id or name found nothing.
    #[error("{model_name} is not found. {}", describe_key(.id, .name))]
    NoSuchData {
        model_name: &'static str,
        id: Option<i64>,
        name: Option<String>,
    },

    #[error("{model_name} already exists. ID : {id}, Name : {name}")]
    AlreadyExists {
        model_name: &'static str,
        id: i64,
        name: String,
    },

    /// Any failure of the underlying store, including statements that did
    /// not touch exactly one row.
    #[error("failed DB operation. Method : {method}, Model : {model_name}, Detail : {detail}")]
    Db {
        model_name: &'static str,
        method: DbMethod,
        detail: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Everything outside the taxonomy. The cause is logged, never returned to clients.
    #[error("some error has occurred")]
    Internal(#[source] anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::Required { .. } => ErrorKind::Required,
            Self::InvalidProperty { .. } => ErrorKind::InvalidProperty,
            Self::NoSuchData { .. } => ErrorKind::NoSuchData,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Db { .. } => ErrorKind::Db,
            Self::Internal(_) => ErrorKind::Unclassified,
        }
    }

    pub fn is_no_such_data(&self) -> bool {
        self.kind() == ErrorKind::NoSuchData
    }

    /// Wraps a store failure, keeping the driver error as the source.
    pub fn db(model_name: &'static str, method: DbMethod, source: rusqlite::Error) -> Self {
        Self::Db {
            model_name,
            method,
            detail: source.to_string(),
            source: Some(source),
        }
    }

    /// A store failure with no driver error behind it (row count mismatch, cancellation).
    pub fn db_detail(model_name: &'static str, method: DbMethod, detail: impl Into<String>) -> Self {
        Self::Db {
            model_name,
            method,
            detail: detail.into(),
            source: None,
        }
    }

    pub fn internal(message: impl fmt::Display) -> Self {
        Self::Internal(anyhow::anyhow!("{message}"))
    }
}

fn describe_key(id: &Option<i64>, name: &Option<String>) -> String {
    match (id, name) {
        (Some(id), Some(name)) => format!("ID : {id}, Name : {name}"),
        (Some(id), None) => format!("ID : {id}"),
        (None, Some(name)) => format!("Name : {name}"),
        (None, None) => String::new(),
    }
}
