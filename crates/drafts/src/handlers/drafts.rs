//! Draft handlers.
//!
//! `next`, `outbox` and `dump` are always mounted. The plain CRUD handlers
//! are only routed when draft routes are exposed in the configuration.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use drafts_core::records::{
    self, CreateDraft, DraftBatch, DraftRecord, DumpRequest, UpdateDraft,
};
use drafts_core::suggest::SuggestionRequest;

use super::{parse_body, AppError, Success};
use crate::context::RequestContext;
use crate::state::AppState;

/// GET /drafts/next - The oldest pending draft, or `null`.
#[axum::debug_handler]
pub async fn next_draft(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Option<DraftRecord>>, AppError> {
    let draft = records::next_pending_draft(state.store.as_ref(), &ctx.owner).await?;
    Ok(Json(draft))
}

/// GET /drafts/outbox - Drafts whose decision has been made.
#[axum::debug_handler]
pub async fn outbox_drafts(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<DraftRecord>>, AppError> {
    let drafts = records::outbox_drafts(state.store.as_ref(), &ctx.owner).await?;
    Ok(Json(drafts))
}

/// POST /drafts/dump - Create one or many drafts and queue a suggestion job
/// for each of them.
///
/// Dispatch failures are logged; the drafts stay created either way. When
/// the batch stops early, the drafts stored before the failure still get
/// their jobs before the error is returned.
#[axum::debug_handler]
pub async fn dump_drafts(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<DumpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<DraftRecord>>), AppError> {
    let requests = parse_body(payload)?.into_drafts();
    let DraftBatch { created, failure } =
        records::create_drafts(state.store.as_ref(), &ctx.owner, requests, Utc::now()).await;

    for draft in &created {
        let request = SuggestionRequest::for_record(draft);
        if let Err(err) = state.dispatcher.dispatch(request).await {
            tracing::error!(
                sort_key = %draft.type_and_timestamp,
                error = %err,
                "Failed to dispatch suggestion job"
            );
        }
    }

    if let Some(err) = failure {
        tracing::warn!(created = created.len(), "Draft dump stopped early");
        return Err(err.into());
    }

    tracing::info!(count = created.len(), "Dumped drafts");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /drafts - List every draft of the owner, oldest first.
#[axum::debug_handler]
pub async fn list_drafts(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<DraftRecord>>, AppError> {
    let drafts = records::list_drafts(state.store.as_ref(), &ctx.owner).await?;
    Ok(Json(drafts))
}

/// POST /drafts - Create a pending draft.
#[axum::debug_handler]
pub async fn create_draft(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<CreateDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<DraftRecord>), AppError> {
    let request = parse_body(payload)?;
    let draft =
        records::create_draft(state.store.as_ref(), &ctx.owner, request, Utc::now()).await?;

    tracing::info!(sort_key = %draft.type_and_timestamp, "Created draft");
    Ok((StatusCode::CREATED, Json(draft)))
}

/// PUT /drafts/{timestamp} - Overwrite the given payload fields.
#[axum::debug_handler]
pub async fn update_draft(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(timestamp): Path<String>,
    payload: Result<Json<UpdateDraft>, JsonRejection>,
) -> Result<Json<Success>, AppError> {
    let request = parse_body(payload)?;
    records::update_draft(state.store.as_ref(), &ctx.owner, &timestamp, request).await?;

    tracing::info!(%timestamp, "Updated draft");
    Ok(Success::ok())
}

/// DELETE /drafts/{timestamp} - Delete a draft. Missing drafts are not an error.
#[axum::debug_handler]
pub async fn delete_draft(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(timestamp): Path<String>,
) -> Result<Json<Success>, AppError> {
    records::delete_draft(state.store.as_ref(), &ctx.owner, &timestamp).await?;

    tracing::info!(%timestamp, "Deleted draft");
    Ok(Success::ok())
}
