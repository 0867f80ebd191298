use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::error::Error;
use crate::models::*;
use crate::repository::ProgrammingLangRepository;
use crate::service::DEFAULT_LIMIT;

const PARAM_ID: &str = "ID";
const PARAM_LIMIT: &str = "Limit";

/// Query parameters for listing languages. `limit` is parsed by hand so a bad
/// value is reported through the error taxonomy rather than as an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct ListLangsQuery {
    pub limit: Option<String>,
}

fn parse_id(raw: &str) -> Result<i64, Error> {
    raw.parse().map_err(|_| Error::InvalidParameter {
        parameter: PARAM_ID,
        message: "ID Should be int",
    })
}

/// Absent or empty `limit` means the default.
fn parse_limit(raw: Option<&str>) -> Result<i64, Error> {
    match raw {
        None | Some("") => Ok(DEFAULT_LIMIT),
        Some(value) => value.parse().map_err(|_| Error::InvalidParameter {
            parameter: PARAM_LIMIT,
            message: "Limit Should be int",
        }),
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Programming languages
// ============================================================

pub async fn list_langs<R: ProgrammingLangRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListLangsQuery>,
) -> Result<Json<Vec<ProgrammingLang>>, ApiError> {
    let limit = parse_limit(query.limit.as_deref())?;
    let ctx = state.request_context();
    Ok(Json(state.service.list(&ctx, limit)?))
}

pub async fn get_lang<R: ProgrammingLangRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<ProgrammingLang>, ApiError> {
    let id = parse_id(&id)?;
    let ctx = state.request_context();
    Ok(Json(state.service.get(&ctx, id)?))
}

pub async fn create_lang<R: ProgrammingLangRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<ProgrammingLangInput>, JsonRejection>,
) -> Result<Json<ProgrammingLang>, ApiError> {
    let Json(input) = payload?;
    let ctx = state.request_context();
    Ok(Json(state.service.create(&ctx, input)?))
}

pub async fn update_lang<R: ProgrammingLangRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<ProgrammingLangInput>, JsonRejection>,
) -> Result<Json<ProgrammingLang>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let ctx = state.request_context();
    Ok(Json(state.service.update(&ctx, id, input)?))
}

pub async fn delete_lang<R: ProgrammingLangRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let ctx = state.request_context();
    state.service.delete(&ctx, id)?;
    Ok(StatusCode::OK)
}
