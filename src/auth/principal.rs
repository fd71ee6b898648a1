//! Authenticated principal model.
//!
//! A [`Principal`] is derived from a verified bearer token and lives for
//! exactly one request. It is never persisted by this service.

use serde::{Deserialize, Serialize};

/// Closed role enumeration.
///
/// The wire representation matches the account records
/// (`"ADMIN"` / `"PARTICIPANT"`); no other role strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// May create events, update own events, and delete any event.
    Admin,
    /// May browse events and toggle interest only.
    Participant,
}

/// The authenticated identity attached to a request.
///
/// The role is embedded at token issuance time and trusted verbatim until
/// the token expires; a role change on the backing account is not visible
/// until re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account id as assigned by the account store.
    pub id: i64,
    /// Account e-mail, carried for logging and display.
    pub email: String,
    /// Role at issuance time.
    pub role: Role,
}

impl Principal {
    /// Creates a principal with the given identity fields.
    #[must_use]
    pub fn new(id: i64, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Role::Admin).ok().as_deref(),
            Some("\"ADMIN\"")
        );
        assert_eq!(
            serde_json::to_string(&Role::Participant).ok().as_deref(),
            Some("\"PARTICIPANT\"")
        );
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        let parsed: Result<Role, _> = serde_json::from_str("\"SUPERUSER\"");
        assert!(parsed.is_err());
    }
}
