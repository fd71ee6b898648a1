//! Repository facade over the persistent record store.
//!
//! [`EventStore`] is the only stateful collaborator of the service. It owns
//! event records and the interest relation (a set of (user, event) pairs),
//! and it is the layer responsible for the atomicity of
//! "insert edge if absent" — callers never lock around it.
//!
//! Two backends: [`memory::MemoryStore`] (default, also used by every
//! test) and [`postgres::PostgresStore`] (selected when `DATABASE_URL`
//! is configured).

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{Event, EventDraft, EventId, EventPatch};
use crate::error::CatalogError;

pub mod memory;
pub mod postgres;

/// Abstract CRUD and membership operations over the persistent store.
///
/// Listing operations order by ascending event date; ties follow the
/// store's natural insertion order (not guaranteed stable across equal
/// dates between backends).
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new event, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn create_event(&self, draft: EventDraft, creator_id: i64)
    -> Result<Event, CatalogError>;

    /// Fetches an event by id, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn event(&self, id: EventId) -> Result<Option<Event>, CatalogError>;

    /// Applies a partial update. The id and creator never change.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EventNotFound`] when the event is absent,
    /// [`CatalogError::Store`] on backend failure.
    async fn update_event(&self, id: EventId, patch: &EventPatch) -> Result<Event, CatalogError>;

    /// Hard-deletes an event and its interest edges.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EventNotFound`] when the event is absent,
    /// [`CatalogError::Store`] on backend failure.
    async fn delete_event(&self, id: EventId) -> Result<(), CatalogError>;

    /// Total number of events in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn count_events(&self) -> Result<u64, CatalogError>;

    /// Returns the window `[offset, offset + limit)` of events in
    /// ascending date order. An offset past the end yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn list_events(&self, offset: u64, limit: u64) -> Result<Vec<Event>, CatalogError>;

    /// Inserts an interest edge if absent. Returns whether it inserted;
    /// the check-and-insert is atomic (two concurrent calls for the same
    /// pair produce exactly one edge and exactly one `true`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn add_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError>;

    /// Removes an interest edge. Returns whether an edge existed;
    /// removing an absent edge is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn remove_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError>;

    /// Whether the user holds an interest edge for the event.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn is_interested(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError>;

    /// Membership lookup scoped to a candidate set: which of `event_ids`
    /// does the user hold an edge for.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn interested_among(
        &self,
        user_id: i64,
        event_ids: &[EventId],
    ) -> Result<HashSet<EventId>, CatalogError>;

    /// Cardinality of the interest relation for one event, independent of
    /// who is asking.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn interest_count(&self, event_id: EventId) -> Result<u64, CatalogError>;

    /// All events the user holds an edge for, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    async fn events_interested_by(&self, user_id: i64) -> Result<Vec<Event>, CatalogError>;

    /// Cheap connectivity check for the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the backend is unreachable.
    async fn health_check(&self) -> Result<(), CatalogError>;

    /// Short backend identifier for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Whether records survive a process restart.
    fn is_durable(&self) -> bool;
}
