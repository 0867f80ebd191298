use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{Error, ErrorKind};

/// Status code for each error kind. Kinds missing here are answered with 500.
const STATUS_TABLE: &[(ErrorKind, StatusCode)] = &[
    (ErrorKind::InvalidParameter, StatusCode::BAD_REQUEST),
    (ErrorKind::Required, StatusCode::BAD_REQUEST),
    (ErrorKind::InvalidProperty, StatusCode::BAD_REQUEST),
    (ErrorKind::NoSuchData, StatusCode::NOT_FOUND),
    (ErrorKind::AlreadyExists, StatusCode::CONFLICT),
    (ErrorKind::Db, StatusCode::INTERNAL_SERVER_ERROR),
];

pub fn status_for(kind: ErrorKind) -> StatusCode {
    STATUS_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, status)| *status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Renders `e` followed by each of its causes.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Failure of a handler. Bodies are the message as a bare JSON string.
#[derive(Debug)]
pub enum ApiError {
    Lang(Error),
    /// The request body was not valid JSON for the expected shape.
    MalformedBody(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Lang(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Lang(e) => {
                let status = status_for(e.kind());
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", error_chain(&e));
                } else {
                    tracing::warn!("Request rejected: {}", e);
                }
                (status, Json(e.to_string())).into_response()
            }
            Self::MalformedBody(message) => {
                tracing::warn!("Malformed request body: {}", message);
                (StatusCode::BAD_REQUEST, Json(message)).into_response()
            }
        }
    }
}
