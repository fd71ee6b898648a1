//! Event records and their validation rules.
//!
//! [`Event`] is the stored record. [`EventDraftInput`] and
//! [`EventPatchInput`] carry raw wire data; validating them yields
//! [`EventDraft`] and [`EventPatch`]. [`EventView`] is the response-shaped
//! projection carrying per-requester interest state.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Type-safe event identifier.
///
/// Wraps the `i64` id assigned by the store at creation time, so event ids
/// cannot be confused with account ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Creates an `EventId` from a raw store-assigned id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog event as stored by the repository.
///
/// Immutable once deleted (hard delete, no tombstone); mutated only
/// through authorization-gated operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique id assigned by the store.
    pub id: EventId,
    /// Title, at least 3 characters.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Calendar date the event takes place.
    pub date: NaiveDate,
    /// Start time as an opaque display string (e.g. `"19:30"`).
    pub time: String,
    /// Venue, at least 2 characters.
    pub location: String,
    /// Category label, at least 2 characters.
    pub category: String,
    /// Banner image URL, well-formed.
    pub banner_url: String,
    /// Account id of the admin who created the event.
    pub creator_id: i64,
}

/// Validated data for a new event. Produced only by payload validation.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Title, already length-checked.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parsed calendar date.
    pub date: NaiveDate,
    /// Start time string.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Well-formed banner URL.
    pub banner_url: String,
}

/// Unvalidated event data as received on the wire.
///
/// Validation is deferred so that authorization gates run first; a caller
/// without the right role learns nothing about payload problems.
#[derive(Debug, Clone)]
pub struct EventDraftInput {
    /// Raw title.
    pub title: String,
    /// Raw description.
    pub description: Option<String>,
    /// Raw date string.
    pub date: String,
    /// Raw time string.
    pub time: String,
    /// Raw venue.
    pub location: String,
    /// Raw category.
    pub category: String,
    /// Raw banner URL.
    pub banner_url: String,
}

impl EventDraftInput {
    /// Runs all field rules, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns the full list of [`FieldError`]s when any field is invalid.
    pub fn validate(self) -> Result<EventDraft, Vec<FieldError>> {
        let mut failures = Vec::new();
        if let Err(error) = rules::title(&self.title) {
            failures.push(error);
        }
        let date = match rules::date(&self.date) {
            Ok(date) => Some(date),
            Err(error) => {
                failures.push(error);
                None
            }
        };
        if let Err(error) = rules::time(&self.time) {
            failures.push(error);
        }
        if let Err(error) = rules::label("location", &self.location) {
            failures.push(error);
        }
        if let Err(error) = rules::label("category", &self.category) {
            failures.push(error);
        }
        if let Err(error) = rules::banner_url(&self.banner_url) {
            failures.push(error);
        }
        match (failures.is_empty(), date) {
            (true, Some(date)) => Ok(EventDraft {
                title: self.title,
                description: self.description,
                date,
                time: self.time,
                location: self.location,
                category: self.category,
                banner_url: self.banner_url,
            }),
            _ => Err(failures),
        }
    }
}

/// Unvalidated partial update as received on the wire.
#[derive(Debug, Clone, Default)]
pub struct EventPatchInput {
    /// Raw title, if present.
    pub title: Option<String>,
    /// Raw description, if present.
    pub description: Option<String>,
    /// Raw date string, if present.
    pub date: Option<String>,
    /// Raw time string, if present.
    pub time: Option<String>,
    /// Raw venue, if present.
    pub location: Option<String>,
    /// Raw category, if present.
    pub category: Option<String>,
    /// Raw banner URL, if present.
    pub banner_url: Option<String>,
}

impl EventPatchInput {
    /// Returns `true` when no fields were provided at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.banner_url.is_none()
    }

    /// Validates every provided field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full list of [`FieldError`]s when any provided field
    /// is invalid.
    pub fn validate(self) -> Result<EventPatch, Vec<FieldError>> {
        let mut failures = Vec::new();
        if let Some(title) = &self.title
            && let Err(error) = rules::title(title)
        {
            failures.push(error);
        }
        let date = match self.date.as_deref().map(rules::date) {
            Some(Ok(date)) => Some(date),
            Some(Err(error)) => {
                failures.push(error);
                None
            }
            None => None,
        };
        if let Some(time) = &self.time
            && let Err(error) = rules::time(time)
        {
            failures.push(error);
        }
        if let Some(location) = &self.location
            && let Err(error) = rules::label("location", location)
        {
            failures.push(error);
        }
        if let Some(category) = &self.category
            && let Err(error) = rules::label("category", category)
        {
            failures.push(error);
        }
        if let Some(banner_url) = &self.banner_url
            && let Err(error) = rules::banner_url(banner_url)
        {
            failures.push(error);
        }
        if !failures.is_empty() {
            return Err(failures);
        }
        Ok(EventPatch {
            title: self.title,
            description: self.description,
            date,
            time: self.time,
            location: self.location,
            category: self.category,
            banner_url: self.banner_url,
        })
    }
}

/// Validated partial update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    /// New title, if present.
    pub title: Option<String>,
    /// New description, if present.
    pub description: Option<String>,
    /// New date, if present.
    pub date: Option<NaiveDate>,
    /// New time string, if present.
    pub time: Option<String>,
    /// New venue, if present.
    pub location: Option<String>,
    /// New category, if present.
    pub category: Option<String>,
    /// New banner URL, if present.
    pub banner_url: Option<String>,
}

impl EventPatch {
    /// Returns `true` when the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.banner_url.is_none()
    }

    /// Applies the patch to an event in place. The id and creator never change.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = &self.time {
            event.time = time.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(banner_url) = &self.banner_url {
            event.banner_url = banner_url.clone();
        }
    }
}

/// Response projection: an event plus the requesting principal's interest
/// flag and the aggregate interested count, both computed at read time.
#[derive(Debug, Clone)]
pub struct EventView {
    /// The underlying event snapshot.
    pub event: Event,
    /// Whether the requesting principal holds an interest edge.
    pub interested: bool,
    /// Cardinality of the interest relation for this event.
    pub interested_count: u64,
}

/// Field validation rules shared by create and update payloads.
pub mod rules {
    use super::{FieldError, NaiveDate};

    /// Checks the title length (≥ 3 characters).
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the `title` field.
    pub fn title(value: &str) -> Result<(), FieldError> {
        if value.chars().count() < 3 {
            return Err(FieldError::new("title", "must be at least 3 characters"));
        }
        Ok(())
    }

    /// Checks a short label field (location, category; ≥ 2 characters).
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the given field.
    pub fn label(field: &'static str, value: &str) -> Result<(), FieldError> {
        if value.chars().count() < 2 {
            return Err(FieldError::new(field, "must be at least 2 characters"));
        }
        Ok(())
    }

    /// Checks that the time string is non-empty.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the `time` field.
    pub fn time(value: &str) -> Result<(), FieldError> {
        if value.is_empty() {
            return Err(FieldError::new("time", "must not be empty"));
        }
        Ok(())
    }

    /// Parses a calendar date from either `YYYY-MM-DD` or an RFC 3339
    /// datetime (the date part is taken).
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the `date` field.
    pub fn date(value: &str) -> Result<NaiveDate, FieldError> {
        if let Ok(date) = value.parse::<NaiveDate>() {
            return Ok(date);
        }
        if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(value) {
            return Ok(datetime.date_naive());
        }
        Err(FieldError::new("date", "not a parseable calendar date"))
    }

    /// Checks that the banner URL is well-formed.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] naming the `bannerUrl` field.
    pub fn banner_url(value: &str) -> Result<(), FieldError> {
        url::Url::parse(value)
            .map(|_| ())
            .map_err(|_| FieldError::new("bannerUrl", "not a well-formed URL"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn title_shorter_than_three_chars_fails() {
        assert!(rules::title("ab").is_err());
        assert!(rules::title("abc").is_ok());
    }

    #[test]
    fn labels_need_two_chars() {
        assert!(rules::label("location", "x").is_err());
        assert!(rules::label("category", "ok").is_ok());
    }

    #[test]
    fn date_accepts_plain_and_rfc3339() {
        assert_eq!(
            rules::date("2026-09-01").ok(),
            NaiveDate::from_ymd_opt(2026, 9, 1)
        );
        assert_eq!(
            rules::date("2026-09-01T19:00:00Z").ok(),
            NaiveDate::from_ymd_opt(2026, 9, 1)
        );
        assert!(rules::date("next friday").is_err());
    }

    #[test]
    fn banner_url_must_parse() {
        assert!(rules::banner_url("https://example.com/a.png").is_ok());
        assert!(rules::banner_url("not a url").is_err());
    }

    fn draft_input() -> EventDraftInput {
        EventDraftInput {
            title: "Jazz Night".to_string(),
            description: None,
            date: "2026-10-05".to_string(),
            time: "20:00".to_string(),
            location: "Blue Note".to_string(),
            category: "music".to_string(),
            banner_url: "https://example.com/jazz.png".to_string(),
        }
    }

    #[test]
    fn draft_validation_collects_every_failure() {
        let input = EventDraftInput {
            title: "ab".to_string(),
            date: "soon".to_string(),
            banner_url: "nope".to_string(),
            ..draft_input()
        };
        let Err(failures) = input.validate() else {
            panic!("expected validation failure");
        };
        let fields: Vec<_> = failures.iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["title", "date", "bannerUrl"]);
    }

    #[test]
    fn valid_draft_input_passes_through() {
        let Ok(draft) = draft_input().validate() else {
            panic!("expected valid draft");
        };
        assert_eq!(draft.title, "Jazz Night");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 10, 5).unwrap_or_default());
    }

    #[test]
    fn patch_input_validates_only_provided_fields() {
        let input = EventPatchInput {
            location: Some("HQ".to_string()),
            ..EventPatchInput::default()
        };
        let Ok(patch) = input.validate() else {
            panic!("expected valid patch");
        };
        assert_eq!(patch.location.as_deref(), Some("HQ"));
        assert!(patch.title.is_none());

        let bad = EventPatchInput {
            category: Some("x".to_string()),
            ..EventPatchInput::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn empty_patch_input_is_detected() {
        assert!(EventPatchInput::default().is_empty());
        let input = EventPatchInput {
            time: Some("18:30".to_string()),
            ..EventPatchInput::default()
        };
        assert!(!input.is_empty());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(EventPatch::default().is_empty());
        let patch = EventPatch {
            title: Some("New".to_string()),
            ..EventPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_never_touches_id_or_creator() {
        let mut event = Event {
            id: EventId::new(3),
            title: "Old title".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            time: "10:00".to_string(),
            location: "Lab".to_string(),
            category: "science".to_string(),
            banner_url: "https://example.com/b.png".to_string(),
            creator_id: 42,
        };
        let patch = EventPatch {
            title: Some("New title".to_string()),
            location: Some("Auditorium".to_string()),
            ..EventPatch::default()
        };
        patch.apply_to(&mut event);
        assert_eq!(event.title, "New title");
        assert_eq!(event.location, "Auditorium");
        assert_eq!(event.id, EventId::new(3));
        assert_eq!(event.creator_id, 42);
        assert_eq!(event.time, "10:00");
    }
}
