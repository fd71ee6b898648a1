//! Authorization decisions per action.
//!
//! Every decision is a pure function of the principal and a resource
//! snapshot; there is no hidden state. Role checks and ownership checks
//! stay separate so their failures remain distinguishable (403 with
//! different error codes).

use crate::auth::principal::{Principal, Role};
use crate::domain::Event;
use crate::error::{CatalogError, ForbiddenReason};

/// Returns `true` iff the principal may create events.
#[must_use]
pub fn can_create_event(principal: &Principal) -> bool {
    principal.role == Role::Admin
}

/// Returns `true` iff the principal may delete events.
///
/// Ownership is intentionally not checked for delete; any admin may
/// remove any event, unlike update which is creator-only.
#[must_use]
pub fn can_delete_event(principal: &Principal) -> bool {
    principal.role == Role::Admin
}

/// Checks that the principal may update the given event.
///
/// Requires both the `Admin` role and creatorship; the role alone is not
/// enough, and creatorship without the role is not either.
///
/// # Errors
///
/// - [`CatalogError::Forbidden`] with [`ForbiddenReason::Role`] when the
///   principal is not an admin.
/// - [`CatalogError::Forbidden`] with [`ForbiddenReason::Ownership`] when
///   the principal is an admin but did not create the event.
pub fn authorize_update(principal: &Principal, event: &Event) -> Result<(), CatalogError> {
    if principal.role != Role::Admin {
        return Err(CatalogError::Forbidden(ForbiddenReason::Role));
    }
    if event.creator_id != principal.id {
        return Err(CatalogError::Forbidden(ForbiddenReason::Ownership));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Event, EventId};
    use chrono::NaiveDate;

    fn event_created_by(creator_id: i64) -> Event {
        Event {
            id: EventId::new(1),
            title: "Rustconf Recap".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default(),
            time: "19:00".to_string(),
            location: "Main Hall".to_string(),
            category: "tech".to_string(),
            banner_url: "https://example.com/banner.png".to_string(),
            creator_id,
        }
    }

    #[test]
    fn only_admins_create_and_delete() {
        let admin = Principal::new(1, "a@example.com", Role::Admin);
        let participant = Principal::new(2, "p@example.com", Role::Participant);
        assert!(can_create_event(&admin));
        assert!(can_delete_event(&admin));
        assert!(!can_create_event(&participant));
        assert!(!can_delete_event(&participant));
    }

    #[test]
    fn update_needs_both_role_and_ownership() {
        let creator = Principal::new(1, "a@example.com", Role::Admin);
        let other_admin = Principal::new(2, "b@example.com", Role::Admin);
        let participant = Principal::new(1, "p@example.com", Role::Participant);
        let event = event_created_by(1);

        assert!(authorize_update(&creator, &event).is_ok());
        assert!(matches!(
            authorize_update(&other_admin, &event),
            Err(CatalogError::Forbidden(ForbiddenReason::Ownership))
        ));
        // Same id as the creator, but the role gate fires first.
        assert!(matches!(
            authorize_update(&participant, &event),
            Err(CatalogError::Forbidden(ForbiddenReason::Role))
        ));
    }

    #[test]
    fn flipping_either_condition_flips_the_result() {
        let event = event_created_by(5);
        for (id, role, ok) in [
            (5, Role::Admin, true),
            (5, Role::Participant, false),
            (6, Role::Admin, false),
            (6, Role::Participant, false),
        ] {
            let principal = Principal::new(id, "x@example.com", role);
            assert_eq!(authorize_update(&principal, &event).is_ok(), ok);
        }
    }

    #[test]
    fn delete_ignores_ownership() {
        let other_admin = Principal::new(99, "c@example.com", Role::Admin);
        assert!(can_delete_event(&other_admin));
    }
}
