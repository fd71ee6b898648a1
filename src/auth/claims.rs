//! Token codec: signing and verification of principal claims.
//!
//! Tokens are HS256 JWTs carrying `{ id, email, role, iat, exp }`. Expiry
//! granularity is whole seconds and verification tolerates no clock skew
//! (zero leeway, strict comparison against the embedded expiry).

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::principal::{Principal, Role};

/// Claims payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id of the subject.
    pub id: i64,
    /// Account e-mail at issuance time.
    pub email: String,
    /// Role at issuance time, trusted verbatim on verification.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature does not match the configured secret.
    #[error("signature mismatch")]
    InvalidSignature,
    /// Current time exceeds the embedded expiry.
    #[error("token expired")]
    Expired,
    /// Token could not be decoded at all.
    #[error("malformed token")]
    Malformed,
}

/// Signs and verifies principal tokens with a process-wide secret.
///
/// The secret is injected once at startup from configuration and never
/// mutated afterwards; both operations are pure and safe to run
/// concurrently across requests without coordination.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never appear in logs.
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec from the shared secret and token time-to-live.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a signed, time-bounded token for the given principal.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] if JWT encoding fails, which only
    /// happens on serialization errors of the claims payload.
    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: principal.id,
            email: principal.email.clone(),
            role: principal.role,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verifies a token and returns the embedded principal.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSignature`] when the signature does not match.
    /// - [`TokenError::Expired`] when the expiry has passed (no leeway).
    /// - [`TokenError::Malformed`] for anything that cannot be decoded.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        Ok(Principal {
            id: data.claims.id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::from_secs(24 * 60 * 60))
    }

    fn principal() -> Principal {
        Principal::new(7, "ana@example.com", Role::Admin)
    }

    #[test]
    fn issue_verify_round_trip() {
        let codec = codec();
        let Ok(token) = codec.issue(&principal()) else {
            panic!("issue failed");
        };
        let Ok(verified) = codec.verify(&token) else {
            panic!("verify failed");
        };
        assert_eq!(verified, principal());
    }

    #[test]
    fn wrong_secret_fails_with_signature_mismatch() {
        let Ok(token) = codec().issue(&principal()) else {
            panic!("issue failed");
        };
        let other = TokenCodec::new("another-secret", Duration::from_secs(60));
        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Craft a token whose expiry is already in the past; verification
        // runs with zero leeway so even one second over the line fails.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: 7,
            email: "ana@example.com".to_string(),
            role: Role::Admin,
            iat: now - 90_000,
            exp: now - 3_600,
        };
        let Ok(token) = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        ) else {
            panic!("encode failed");
        };
        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            codec().verify("not-a-jwt-at-all"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn expiry_is_ttl_from_issuance() {
        let short = TokenCodec::new(SECRET, Duration::from_secs(60));
        let Ok(token) = short.issue(&principal()) else {
            panic!("issue failed");
        };
        // Decode without expiry validation to inspect the raw claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let Ok(data) = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        ) else {
            panic!("decode failed");
        };
        assert_eq!(data.claims.exp - data.claims.iat, 60);
    }
}
