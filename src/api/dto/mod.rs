//! Data Transfer Objects for REST request/response serialization.
//!
//! Wire field names are camelCase; dates travel as strings.

pub mod common_dto;
pub mod event_dto;

pub use common_dto::*;
pub use event_dto::*;
