//! Interest toggle handlers and the caller's interest listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{EventViewDto, MessageResponse};
use crate::api::handlers::events::parse_event_id;
use crate::app_state::AppState;
use crate::auth::Principal;
use crate::error::{CatalogError, ErrorResponse};

/// `POST /api/events/{id}/interesse` — Register interest in an event.
///
/// # Errors
///
/// Returns [`CatalogError::AlreadyInterested`] on a duplicate toggle and
/// [`CatalogError::EventNotFound`] on an unknown id.
#[utoipa::path(
    post,
    path = "/api/events/{id}/interesse",
    tag = "Interest",
    summary = "Register interest",
    description = "Adds the caller to the event's interest relation. Toggling twice is rejected with a plain message and leaves the relation unchanged.",
    params(("id" = String, Path, description = "Event id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Interest registered", body = MessageResponse),
        (status = 400, description = "Already interested", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn mark_interest(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_event_id(&id)?;
    state.service.mark_interest(principal.id, id).await?;
    Ok(Json(MessageResponse::new("interest registered")))
}

/// `DELETE /api/events/{id}/interesse` — Remove interest in an event.
///
/// # Errors
///
/// Returns [`CatalogError::EventNotFound`] on an unknown id. Removing an
/// edge that does not exist succeeds anyway.
#[utoipa::path(
    delete,
    path = "/api/events/{id}/interesse",
    tag = "Interest",
    summary = "Remove interest",
    description = "Removes the caller from the event's interest relation. A no-op when no edge exists.",
    params(("id" = String, Path, description = "Event id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Interest removed", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn unmark_interest(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_event_id(&id)?;
    state.service.unmark_interest(principal.id, id).await?;
    Ok(Json(MessageResponse::new("interest removed")))
}

/// `GET /api/me/interesses` — All events the caller is interested in.
///
/// # Errors
///
/// Returns [`CatalogError`] on authentication or store failures.
#[utoipa::path(
    get,
    path = "/api/me/interesses",
    tag = "Interest",
    summary = "List my interests",
    description = "Returns every event the caller is interested in, ascending by date, unpaginated. Each entry carries interested = true and the current total count.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The caller's interests", body = Vec<EventViewDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn my_interests(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, CatalogError> {
    let views = state.service.my_interests(principal.id).await?;
    let events: Vec<EventViewDto> = views.into_iter().map(EventViewDto::from).collect();
    Ok((StatusCode::OK, Json(events)))
}

/// Interest relation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/interesse",
            post(mark_interest).delete(unmark_interest),
        )
        .route("/me/interesses", get(my_interests))
}
