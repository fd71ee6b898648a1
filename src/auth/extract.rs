//! Bearer-token authentication as an Axum extractor.
//!
//! Declaring a [`Principal`] parameter on a handler makes the endpoint
//! require a valid `Authorization: Bearer <token>` header; rejections map
//! to 401 through [`CatalogError`].

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::auth::principal::Principal;
use crate::error::CatalogError;

/// Prefix mandated by the `Authorization` header contract.
const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the raw token out of a header value shaped `Bearer <token>`.
///
/// # Errors
///
/// Returns [`CatalogError::MissingToken`] when the value is absent, does
/// not carry the `Bearer ` prefix, or the token part is empty.
pub fn bearer_token(header: Option<&str>) -> Result<&str, CatalogError> {
    let value = header.ok_or(CatalogError::MissingToken)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(CatalogError::MissingToken)?;
    if token.is_empty() {
        return Err(CatalogError::MissingToken);
    }
    Ok(token)
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = CatalogError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = bearer_token(header)?;

        // Verification is pure; the embedded role is trusted for the rest
        // of the request with no account lookup.
        let principal = state.codec.verify(token)?;
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_is_missing_token() {
        assert!(matches!(
            bearer_token(None),
            Err(CatalogError::MissingToken)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_missing_token() {
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(CatalogError::MissingToken)
        ));
    }

    #[test]
    fn empty_token_part_is_missing_token() {
        assert!(matches!(
            bearer_token(Some("Bearer ")),
            Err(CatalogError::MissingToken)
        ));
    }

    #[test]
    fn well_formed_header_yields_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).ok(), Some("abc.def.ghi"));
    }
}
