//! Catalog service: orchestrates event operations over the store.
//!
//! Stateless coordinator in front of the [`EventStore`]. Read paths
//! assemble [`EventView`]s; write paths run the authorization gates
//! before touching the store (fail fast, no partial writes).

use std::collections::HashSet;
use std::sync::Arc;

use crate::auth::authorize;
use crate::auth::principal::Principal;
use crate::domain::{
    Event, EventDraftInput, EventId, EventPatchInput, EventView, PageDescriptor, PageQuery,
};
use crate::error::{CatalogError, ForbiddenReason};
use crate::store::EventStore;

/// A page of event views plus its pagination metadata.
#[derive(Debug)]
pub struct EventPage {
    /// Pagination metadata for this response.
    pub descriptor: PageDescriptor,
    /// The page's events, ascending by date.
    pub events: Vec<EventView>,
}

/// Orchestration layer for all catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<dyn EventStore>,
}

impl CatalogService {
    /// Creates a service over the given store backend.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Lists one page of events with the requesting principal's interest
    /// flags and each event's interested count.
    ///
    /// The membership flags come from one set lookup scoped to the page's
    /// ids; the counts come from independent aggregate queries. Neither is
    /// derived from the other: the requester's own edge is just one
    /// instance inside the total.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    pub async fn list_events(
        &self,
        principal_id: i64,
        query: &PageQuery,
    ) -> Result<EventPage, CatalogError> {
        let window = query.normalize();
        let total = self.store.count_events().await?;
        let events = self.store.list_events(window.offset(), window.limit).await?;

        let ids: Vec<EventId> = events.iter().map(|event| event.id).collect();
        let mine: HashSet<EventId> = self.store.interested_among(principal_id, &ids).await?;

        let mut views = Vec::with_capacity(events.len());
        for event in events {
            let interested_count = self.store.interest_count(event.id).await?;
            views.push(EventView {
                interested: mine.contains(&event.id),
                interested_count,
                event,
            });
        }

        Ok(EventPage {
            descriptor: window.describe(total),
            events: views,
        })
    }

    /// Fetches one event with the principal's interest flag and the count.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EventNotFound`] when the id is unknown.
    /// - [`CatalogError::Store`] on backend failure.
    pub async fn event_view(
        &self,
        principal_id: i64,
        id: EventId,
    ) -> Result<EventView, CatalogError> {
        let event = self
            .store
            .event(id)
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;
        let interested = self.store.is_interested(principal_id, id).await?;
        let interested_count = self.store.interest_count(id).await?;
        Ok(EventView {
            event,
            interested,
            interested_count,
        })
    }

    /// Creates an event. Admin only; the principal becomes the creator.
    ///
    /// The role gate runs before validation, so a non-admin caller gets
    /// 403 regardless of payload quality.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Forbidden`] when the principal is not an admin.
    /// - [`CatalogError::Validation`] when any field fails its rule.
    /// - [`CatalogError::Store`] on backend failure.
    pub async fn create_event(
        &self,
        principal: &Principal,
        input: EventDraftInput,
    ) -> Result<Event, CatalogError> {
        if !authorize::can_create_event(principal) {
            return Err(CatalogError::Forbidden(ForbiddenReason::Role));
        }
        let draft = input.validate().map_err(CatalogError::Validation)?;
        let event = self.store.create_event(draft, principal.id).await?;
        tracing::info!(event_id = %event.id, creator = principal.id, "event created");
        Ok(event)
    }

    /// Applies a partial update. Admin and creator only, gates in a fixed
    /// order: role, then existence, then ownership, then the empty-payload
    /// check, then field validation. The creator id never changes.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Forbidden`] for role or ownership violations.
    /// - [`CatalogError::EventNotFound`] when the id is unknown.
    /// - [`CatalogError::EmptyUpdate`] when the payload carries no fields.
    /// - [`CatalogError::Validation`] when a provided field fails its rule.
    /// - [`CatalogError::Store`] on backend failure.
    pub async fn update_event(
        &self,
        principal: &Principal,
        id: EventId,
        input: EventPatchInput,
    ) -> Result<Event, CatalogError> {
        if !authorize::can_create_event(principal) {
            return Err(CatalogError::Forbidden(ForbiddenReason::Role));
        }
        let event = self
            .store
            .event(id)
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;
        authorize::authorize_update(principal, &event)?;
        if input.is_empty() {
            return Err(CatalogError::EmptyUpdate);
        }
        let patch = input.validate().map_err(CatalogError::Validation)?;

        let updated = self.store.update_event(id, &patch).await?;
        tracing::info!(event_id = %id, editor = principal.id, "event updated");
        Ok(updated)
    }

    /// Hard-deletes an event. Admin only; ownership is not checked.
    ///
    /// A missing event surfaces as a store failure (500), not a 404 —
    /// the delete path has no existence pre-check.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Forbidden`] when the principal is not an admin.
    /// - [`CatalogError::Store`] when the event is absent or the backend
    ///   fails.
    pub async fn delete_event(
        &self,
        principal: &Principal,
        id: EventId,
    ) -> Result<(), CatalogError> {
        if !authorize::can_delete_event(principal) {
            return Err(CatalogError::Forbidden(ForbiddenReason::Role));
        }
        match self.store.delete_event(id).await {
            Ok(()) => {
                tracing::info!(event_id = %id, deleter = principal.id, "event deleted");
                Ok(())
            }
            Err(CatalogError::EventNotFound(id)) => {
                Err(CatalogError::Store(format!("cannot delete event {id}")))
            }
            Err(other) => Err(other),
        }
    }

    /// Registers the principal's interest in an event.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EventNotFound`] when the id is unknown.
    /// - [`CatalogError::AlreadyInterested`] when the edge already exists
    ///   (benign duplicate rejection; the relation is unchanged).
    /// - [`CatalogError::Store`] on backend failure.
    pub async fn mark_interest(
        &self,
        principal_id: i64,
        id: EventId,
    ) -> Result<(), CatalogError> {
        self.store
            .event(id)
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;
        // The store makes check-and-insert atomic; a lost race reports the
        // same duplicate signal as a plain repeat call.
        if !self.store.add_interest(principal_id, id).await? {
            return Err(CatalogError::AlreadyInterested);
        }
        tracing::info!(event_id = %id, user = principal_id, "interest registered");
        Ok(())
    }

    /// Removes the principal's interest in an event. Removing an edge
    /// that does not exist is a no-op success, asymmetric with
    /// [`Self::mark_interest`] on purpose.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EventNotFound`] when the id is unknown.
    /// - [`CatalogError::Store`] on backend failure.
    pub async fn unmark_interest(
        &self,
        principal_id: i64,
        id: EventId,
    ) -> Result<(), CatalogError> {
        self.store
            .event(id)
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;
        let removed = self.store.remove_interest(principal_id, id).await?;
        if removed {
            tracing::info!(event_id = %id, user = principal_id, "interest removed");
        }
        Ok(())
    }

    /// All events the principal is interested in, ascending by date, each
    /// with `interested = true` and a freshly computed count. Unpaginated.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on backend failure.
    pub async fn my_interests(&self, principal_id: i64) -> Result<Vec<EventView>, CatalogError> {
        let events = self.store.events_interested_by(principal_id).await?;
        let mut views = Vec::with_capacity(events.len());
        for event in events {
            let interested_count = self.store.interest_count(event.id).await?;
            views.push(EventView {
                interested: true,
                interested_count,
                event,
            });
        }
        Ok(views)
    }
}
