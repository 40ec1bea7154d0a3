//! Event ingestion handler.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{EventRecordDto, TrackEventRequest};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /events`: Record a content-interaction event.
///
/// Responds once the event is durably stored. Counter aggregation and
/// real-time notification happen afterwards in the background.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] if the event could not be stored.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Track an event",
    description = "Persists a content-interaction event, classifies the client device, and schedules counter aggregation and real-time notification.",
    request_body = TrackEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = EventRecordDto),
        (status = 500, description = "Event could not be stored", body = ErrorResponse),
    )
)]
pub async fn track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TrackEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.ingestor.track_event(req.into_input(&headers)).await?;
    Ok((StatusCode::CREATED, Json(EventRecordDto::from(record))))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", post(track_event))
}
