//! Rule handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use drafts_core::records::{self, CreateRule, RuleRecord, UpdateRule};

use super::{parse_body, AppError, Success};
use crate::context::RequestContext;
use crate::state::AppState;

/// GET /rules - List every rule of the owner, oldest first.
#[axum::debug_handler]
pub async fn list_rules(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<RuleRecord>>, AppError> {
    let rules = records::list_rules(state.store.as_ref(), &ctx.owner).await?;
    Ok(Json(rules))
}

/// POST /rules - Create a rule stamped with the current time.
#[axum::debug_handler]
pub async fn create_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<CreateRule>, JsonRejection>,
) -> Result<(StatusCode, Json<RuleRecord>), AppError> {
    let request = parse_body(payload)?;
    let rule = records::create_rule(state.store.as_ref(), &ctx.owner, request, Utc::now()).await?;

    tracing::info!(sort_key = %rule.type_and_timestamp, "Created rule");
    Ok((StatusCode::CREATED, Json(rule)))
}

/// PUT /rules/{timestamp} - Overwrite the given payload fields.
#[axum::debug_handler]
pub async fn update_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(timestamp): Path<String>,
    payload: Result<Json<UpdateRule>, JsonRejection>,
) -> Result<Json<Success>, AppError> {
    let request = parse_body(payload)?;
    records::update_rule(state.store.as_ref(), &ctx.owner, &timestamp, request).await?;

    tracing::info!(%timestamp, "Updated rule");
    Ok(Success::ok())
}

/// DELETE /rules/{timestamp} - Delete a rule. Missing rules are not an error.
#[axum::debug_handler]
pub async fn delete_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(timestamp): Path<String>,
) -> Result<Json<Success>, AppError> {
    records::delete_rule(state.store.as_ref(), &ctx.owner, &timestamp).await?;

    tracing::info!(%timestamp, "Deleted rule");
    Ok(Success::ok())
}
