//! Event DTOs: create/update payloads and response projections.
//!
//! Wire field names are camelCase. Payloads arrive with dates and URLs
//! as raw strings; conversion to domain input types is mechanical and
//! validation happens behind the service's authorization gates.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventDraftInput, EventPatchInput, EventView};

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    /// Event title, at least 3 characters.
    pub title: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date, `YYYY-MM-DD` or RFC 3339.
    pub date: String,
    /// Start time display string.
    pub time: String,
    /// Venue, at least 2 characters.
    pub location: String,
    /// Category label, at least 2 characters.
    pub category: String,
    /// Banner image URL.
    pub banner_url: String,
}

impl CreateEventPayload {
    /// Converts the payload into unvalidated domain input.
    #[must_use]
    pub fn into_input(self) -> EventDraftInput {
        EventDraftInput {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            banner_url: self.banner_url,
        }
    }
}

/// Request body for `PUT /api/events/{id}`. Any subset of fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventPayload {
    /// New title, if present.
    #[serde(default)]
    pub title: Option<String>,
    /// New description, if present.
    #[serde(default)]
    pub description: Option<String>,
    /// New date string, if present.
    #[serde(default)]
    pub date: Option<String>,
    /// New time string, if present.
    #[serde(default)]
    pub time: Option<String>,
    /// New venue, if present.
    #[serde(default)]
    pub location: Option<String>,
    /// New category, if present.
    #[serde(default)]
    pub category: Option<String>,
    /// New banner URL, if present.
    #[serde(default)]
    pub banner_url: Option<String>,
}

impl UpdateEventPayload {
    /// Converts the payload into unvalidated domain input.
    #[must_use]
    pub fn into_input(self) -> EventPatchInput {
        EventPatchInput {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            banner_url: self.banner_url,
        }
    }
}

/// An event as serialized in responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    /// Store-assigned id.
    pub id: i64,
    /// Event title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Start time display string.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Banner image URL.
    pub banner_url: String,
    /// Account id of the creating admin.
    pub creator_id: i64,
}

impl From<crate::domain::Event> for EventDto {
    fn from(event: crate::domain::Event) -> Self {
        Self {
            id: event.id.get(),
            title: event.title,
            description: event.description,
            date: event.date.to_string(),
            time: event.time,
            location: event.location,
            category: event.category,
            banner_url: event.banner_url,
            creator_id: event.creator_id,
        }
    }
}

/// An event plus the requesting caller's interest flag and the total count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventViewDto {
    /// The event fields, flattened into this object.
    #[serde(flatten)]
    pub event: EventDto,
    /// Whether the caller has registered interest.
    pub interested: bool,
    /// Total number of interested accounts.
    pub interested_count: u64,
}

impl From<EventView> for EventViewDto {
    fn from(view: EventView) -> Self {
        Self {
            event: view.event.into(),
            interested: view.interested,
            interested_count: view.interested_count,
        }
    }
}

/// Paginated response for `GET /api/events`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    /// Current page number.
    pub page: u64,
    /// Items per page.
    pub limit: u64,
    /// Total number of events.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// This page's events, ascending by date.
    pub events: Vec<EventViewDto>,
}

/// Response body for `POST /api/events` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateEventResponse {
    /// Outcome message.
    pub message: String,
    /// The created event.
    pub event: EventDto,
}

/// Response body for `PUT /api/events/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventResponse {
    /// Outcome message.
    pub message: String,
    /// The event after the patch was applied.
    pub updated_event: EventDto,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Event, EventId};
    use chrono::NaiveDate;

    #[test]
    fn event_dto_serializes_camel_case() {
        let event = Event {
            id: EventId::new(5),
            title: "Open Mic".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap_or_default(),
            time: "21:00".to_string(),
            location: "Cellar Bar".to_string(),
            category: "music".to_string(),
            banner_url: "https://example.com/mic.png".to_string(),
            creator_id: 9,
        };
        let view = EventView {
            event,
            interested: true,
            interested_count: 4,
        };
        let Ok(json) = serde_json::to_value(EventViewDto::from(view)) else {
            panic!("serialization failed");
        };
        assert_eq!(json["bannerUrl"], "https://example.com/mic.png");
        assert_eq!(json["creatorId"], 9);
        assert_eq!(json["interestedCount"], 4);
        assert_eq!(json["date"], "2026-09-12");
        assert_eq!(json["interested"], true);
    }

    #[test]
    fn update_payload_accepts_any_subset() {
        let Ok(payload) =
            serde_json::from_str::<UpdateEventPayload>(r#"{"bannerUrl":"https://x.io/a.png"}"#)
        else {
            panic!("deserialization failed");
        };
        let input = payload.into_input();
        assert_eq!(input.banner_url.as_deref(), Some("https://x.io/a.png"));
        assert!(input.title.is_none());
        assert!(!input.is_empty());
    }
}
