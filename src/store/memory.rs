//! In-memory store backend.
//!
//! All state lives behind a single `tokio::sync::RwLock`, so every
//! mutating operation (in particular the check-then-insert of
//! [`EventStore::add_interest`]) runs under one write lock and is atomic
//! with respect to concurrent calls. Reads share the lock concurrently.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EventStore;
use crate::domain::{Event, EventDraft, EventId, EventPatch};
use crate::error::CatalogError;

#[derive(Debug, Default)]
struct Inner {
    events: BTreeMap<EventId, Event>,
    // event -> set of interested user ids
    interest: HashMap<EventId, BTreeSet<i64>>,
    next_id: i64,
}

impl Inner {
    /// Events in ascending date order; ids (insertion order) break ties.
    fn ordered_events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.events.values().cloned().collect();
        events.sort_by_key(|event| event.date);
        events
    }
}

/// Non-durable store keeping all records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(
        &self,
        draft: EventDraft,
        creator_id: i64,
    ) -> Result<Event, CatalogError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let event = Event {
            id: EventId::new(inner.next_id),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            category: draft.category,
            banner_url: draft.banner_url,
            creator_id,
        };
        inner.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn event(&self, id: EventId) -> Result<Option<Event>, CatalogError> {
        Ok(self.inner.read().await.events.get(&id).cloned())
    }

    async fn update_event(&self, id: EventId, patch: &EventPatch) -> Result<Event, CatalogError> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .get_mut(&id)
            .ok_or(CatalogError::EventNotFound(id))?;
        patch.apply_to(event);
        Ok(event.clone())
    }

    async fn delete_event(&self, id: EventId) -> Result<(), CatalogError> {
        let mut inner = self.inner.write().await;
        inner
            .events
            .remove(&id)
            .ok_or(CatalogError::EventNotFound(id))?;
        inner.interest.remove(&id);
        Ok(())
    }

    async fn count_events(&self) -> Result<u64, CatalogError> {
        Ok(self.inner.read().await.events.len() as u64)
    }

    async fn list_events(&self, offset: u64, limit: u64) -> Result<Vec<Event>, CatalogError> {
        let inner = self.inner.read().await;
        Ok(inner
            .ordered_events()
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn add_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let mut inner = self.inner.write().await;
        Ok(inner.interest.entry(event_id).or_default().insert(user_id))
    }

    async fn remove_interest(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .interest
            .get_mut(&event_id)
            .is_some_and(|set| set.remove(&user_id)))
    }

    async fn is_interested(&self, user_id: i64, event_id: EventId) -> Result<bool, CatalogError> {
        let inner = self.inner.read().await;
        Ok(inner
            .interest
            .get(&event_id)
            .is_some_and(|set| set.contains(&user_id)))
    }

    async fn interested_among(
        &self,
        user_id: i64,
        event_ids: &[EventId],
    ) -> Result<HashSet<EventId>, CatalogError> {
        let inner = self.inner.read().await;
        Ok(event_ids
            .iter()
            .copied()
            .filter(|id| {
                inner
                    .interest
                    .get(id)
                    .is_some_and(|set| set.contains(&user_id))
            })
            .collect())
    }

    async fn interest_count(&self, event_id: EventId) -> Result<u64, CatalogError> {
        let inner = self.inner.read().await;
        Ok(inner.interest.get(&event_id).map_or(0, |set| set.len() as u64))
    }

    async fn events_interested_by(&self, user_id: i64) -> Result<Vec<Event>, CatalogError> {
        let inner = self.inner.read().await;
        Ok(inner
            .ordered_events()
            .into_iter()
            .filter(|event| {
                inner
                    .interest
                    .get(&event.id)
                    .is_some_and(|set| set.contains(&user_id))
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_durable(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(title: &str, date: (i32, u32, u32)) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            time: "20:00".to_string(),
            location: "Praça Central".to_string(),
            category: "music".to_string(),
            banner_url: "https://example.com/banner.png".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let Ok(first) = store.create_event(draft("First", (2026, 5, 1)), 1).await else {
            panic!("create failed");
        };
        let Ok(second) = store.create_event(draft("Second", (2026, 5, 2)), 1).await else {
            panic!("create failed");
        };
        assert!(second.id > first.id);
        assert_eq!(store.count_events().await.ok(), Some(2));
    }

    #[tokio::test]
    async fn listing_orders_by_date_not_insertion() {
        let store = MemoryStore::new();
        let _ = store.create_event(draft("Later", (2026, 12, 1)), 1).await;
        let _ = store.create_event(draft("Sooner", (2026, 1, 1)), 1).await;
        let Ok(events) = store.list_events(0, 10).await else {
            panic!("list failed");
        };
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn window_past_the_end_is_empty() {
        let store = MemoryStore::new();
        let _ = store.create_event(draft("Only", (2026, 5, 1)), 1).await;
        let Ok(events) = store.list_events(30, 10).await else {
            panic!("list failed");
        };
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn interest_edges_form_a_set() {
        let store = MemoryStore::new();
        let Ok(event) = store.create_event(draft("Show", (2026, 5, 1)), 1).await else {
            panic!("create failed");
        };

        assert_eq!(store.add_interest(10, event.id).await.ok(), Some(true));
        // Second insert of the same pair reports "already present".
        assert_eq!(store.add_interest(10, event.id).await.ok(), Some(false));
        assert_eq!(store.interest_count(event.id).await.ok(), Some(1));

        assert_eq!(store.remove_interest(10, event.id).await.ok(), Some(true));
        assert_eq!(store.remove_interest(10, event.id).await.ok(), Some(false));
        assert_eq!(store.interest_count(event.id).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn interested_among_scopes_to_candidates() {
        let store = MemoryStore::new();
        let Ok(a) = store.create_event(draft("A-show", (2026, 5, 1)), 1).await else {
            panic!("create failed");
        };
        let Ok(b) = store.create_event(draft("B-show", (2026, 5, 2)), 1).await else {
            panic!("create failed");
        };
        let _ = store.add_interest(10, a.id).await;
        let _ = store.add_interest(10, b.id).await;

        let Ok(among) = store.interested_among(10, &[a.id]).await else {
            panic!("lookup failed");
        };
        assert!(among.contains(&a.id));
        assert!(!among.contains(&b.id));
    }

    #[tokio::test]
    async fn delete_drops_interest_edges_too() {
        let store = MemoryStore::new();
        let Ok(event) = store.create_event(draft("Gone", (2026, 5, 1)), 1).await else {
            panic!("create failed");
        };
        let _ = store.add_interest(10, event.id).await;
        assert!(store.delete_event(event.id).await.is_ok());
        assert_eq!(store.interest_count(event.id).await.ok(), Some(0));
        assert!(matches!(
            store.delete_event(event.id).await,
            Err(CatalogError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_adds_insert_exactly_one_edge() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let Ok(event) = store.create_event(draft("Race", (2026, 5, 1)), 1).await else {
            panic!("create failed");
        };

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.add_interest(10, event.id).await },
            ));
        }
        let mut inserted = 0;
        for handle in handles {
            if let Ok(Ok(true)) = handle.await {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.interest_count(event.id).await.ok(), Some(1));
    }
}
