//! Catalog registration and engagement counter read handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ContentCounterDto, RegisterContentRequest};
use crate::app_state::AppState;
use crate::domain::ContentKind;
use crate::error::{ApiError, ErrorResponse};

/// `GET /content/{kind}/{external_id}`: Read the counters of one item.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for an unknown kind or a
/// non-numeric identifier, and [`ApiError::ContentNotFound`] when the item
/// is not cataloged.
#[utoipa::path(
    get,
    path = "/api/v1/content/{kind}/{external_id}",
    tag = "Content",
    summary = "Get engagement counters",
    description = "Returns the view and click counters of a cataloged item. Counters are eventually consistent with the event log.",
    params(
        ("kind" = String, Path, description = "`movie` or `series`"),
        ("external_id" = i64, Path, description = "Catalog identifier"),
    ),
    responses(
        (status = 200, description = "Current counters", body = ContentCounterDto),
        (status = 400, description = "Invalid kind or identifier", body = ErrorResponse),
        (status = 404, description = "Item not cataloged", body = ErrorResponse),
    )
)]
pub async fn get_counters(
    State(state): State<AppState>,
    Path((kind, external_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let (kind, external_id) = parse_item_path(&kind, &external_id)?;

    let counter = state
        .ingestor
        .counters()
        .lookup(kind, external_id)
        .await?
        .ok_or(ApiError::ContentNotFound { kind, external_id })?;

    Ok(Json(ContentCounterDto::new(kind, counter)))
}

/// `PUT /content/{kind}/{external_id}`: Add an item to the catalog.
///
/// Re-registering an existing item only updates its title; counters are
/// never reset.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for an unknown kind or a
/// non-numeric identifier, and [`ApiError::Persistence`] if the catalog
/// write fails.
#[utoipa::path(
    put,
    path = "/api/v1/content/{kind}/{external_id}",
    tag = "Content",
    summary = "Register a catalog item",
    description = "Creates the counter row for an item so that ingested events are folded into it. Existing counters are kept.",
    params(
        ("kind" = String, Path, description = "`movie` or `series`"),
        ("external_id" = i64, Path, description = "Catalog identifier"),
    ),
    request_body = RegisterContentRequest,
    responses(
        (status = 200, description = "Item registered", body = ContentCounterDto),
        (status = 400, description = "Invalid kind or identifier", body = ErrorResponse),
        (status = 500, description = "Catalog write failed", body = ErrorResponse),
    )
)]
pub async fn register_content(
    State(state): State<AppState>,
    Path((kind, external_id)): Path<(String, String)>,
    Json(req): Json<RegisterContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (kind, external_id) = parse_item_path(&kind, &external_id)?;

    let counter = state
        .ingestor
        .counters()
        .register(kind, external_id, req.title)
        .await?;
    tracing::info!(%kind, external_id, "catalog item registered");

    Ok(Json(ContentCounterDto::new(kind, counter)))
}

fn parse_item_path(kind: &str, external_id: &str) -> Result<(ContentKind, i64), ApiError> {
    let kind: ContentKind = kind.parse().map_err(ApiError::InvalidRequest)?;
    let external_id: i64 = external_id
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid external id: {external_id}")))?;
    Ok((kind, external_id))
}

/// Content routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/content/{kind}/{external_id}",
        get(get_counters).put(register_content),
    )
}
