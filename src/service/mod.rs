//! Business logic orchestration on top of the store layer.

mod catalog;

pub use catalog::{CatalogService, EventPage};
