//! Authentication and authorization.
//!
//! Three small, stateless pieces: the token codec ([`claims`]), the
//! bearer-header authenticator exposed as an Axum extractor ([`extract`]),
//! and pure per-action authorization checks ([`authorize`]).

pub mod authorize;
pub mod claims;
pub mod extract;
pub mod principal;

pub use claims::TokenCodec;
pub use principal::{Principal, Role};
