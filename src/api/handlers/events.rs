//! Event CRUD handlers: list, get, create, update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventPayload, CreateEventResponse, EventDto, EventListResponse, EventViewDto,
    MessageResponse, UpdateEventPayload, UpdateEventResponse,
};
use crate::app_state::AppState;
use crate::auth::Principal;
use crate::domain::{EventId, PageQuery};
use crate::error::{CatalogError, ErrorResponse};

/// Parses a path segment into an [`EventId`].
///
/// # Errors
///
/// Returns [`CatalogError::InvalidId`] when the segment is not an integer.
pub(super) fn parse_event_id(raw: &str) -> Result<EventId, CatalogError> {
    raw.parse::<i64>()
        .map(EventId::new)
        .map_err(|_| CatalogError::InvalidId(raw.to_string()))
}

/// `GET /api/events` — Paginated event listing with interest data.
///
/// # Errors
///
/// Returns [`CatalogError`] on authentication or store failures.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    description = "Returns one page of events ascending by date, each annotated with the caller's interest flag and the total interested count.",
    params(PageQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "One page of events", body = EventListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, CatalogError> {
    let page = state.service.list_events(principal.id, &query).await?;
    Ok(Json(EventListResponse {
        page: page.descriptor.page,
        limit: page.descriptor.limit,
        total: page.descriptor.total,
        total_pages: page.descriptor.total_pages,
        events: page.events.into_iter().map(EventViewDto::from).collect(),
    }))
}

/// `GET /api/events/{id}` — Single event with interest data.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidId`] on a malformed id and
/// [`CatalogError::EventNotFound`] on an unknown one.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get one event",
    description = "Returns a single event annotated with the caller's interest flag and the total interested count.",
    params(("id" = String, Path, description = "Event id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event detail", body = EventViewDto),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_event_id(&id)?;
    let view = state.service.event_view(principal.id, id).await?;
    Ok(Json(EventViewDto::from(view)))
}

/// `POST /api/events` — Create an event (admin only).
///
/// # Errors
///
/// Returns [`CatalogError::Forbidden`] for non-admins and
/// [`CatalogError::Validation`] on field failures.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates a new event. Requires the ADMIN role; the caller becomes the creator.",
    request_body = CreateEventPayload,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Role does not permit creation", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<CreateEventPayload>,
) -> Result<impl IntoResponse, CatalogError> {
    let event = state
        .service
        .create_event(&principal, payload.into_input())
        .await?;
    let response = CreateEventResponse {
        message: "event created".to_string(),
        event: EventDto::from(event),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `PUT /api/events/{id}` — Partially update an event (creator only).
///
/// # Errors
///
/// Returns [`CatalogError::Forbidden`] for role or ownership violations,
/// [`CatalogError::EmptyUpdate`] when no fields were sent, and
/// [`CatalogError::Validation`] on field failures.
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Applies a partial update. Requires the ADMIN role and that the caller created the event. The creator never changes.",
    params(("id" = String, Path, description = "Event id")),
    request_body = UpdateEventPayload,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event updated", body = UpdateEventResponse),
        (status = 400, description = "Empty payload or validation failure", body = ErrorResponse),
        (status = 403, description = "Role or ownership violation", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventPayload>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_event_id(&id)?;
    let updated = state
        .service
        .update_event(&principal, id, payload.into_input())
        .await?;
    Ok(Json(UpdateEventResponse {
        message: "event updated".to_string(),
        updated_event: EventDto::from(updated),
    }))
}

/// `DELETE /api/events/{id}` — Hard-delete an event (admin only).
///
/// # Errors
///
/// Returns [`CatalogError::Forbidden`] for non-admins; deleting an
/// unknown id is a 500, not a 404.
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Removes an event and its interest edges. Requires the ADMIN role; any admin may delete, not only the creator.",
    params(("id" = String, Path, description = "Event id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 403, description = "Role does not permit deletion", body = ErrorResponse),
        (status = 500, description = "Unknown id or store failure", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_event_id(&id)?;
    state.service.delete_event(&principal, id).await?;
    Ok(Json(MessageResponse::new("event deleted")))
}

/// Event resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_parsing_rejects_non_integers() {
        assert!(parse_event_id("12").is_ok());
        assert!(matches!(
            parse_event_id("abc"),
            Err(CatalogError::InvalidId(_))
        ));
        assert!(matches!(
            parse_event_id("1.5"),
            Err(CatalogError::InvalidId(_))
        ));
    }
}
