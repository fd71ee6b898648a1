//! # event-catalog
//!
//! REST service for a community event catalog: admins publish events,
//! participants browse them and toggle interest. Authentication is a
//! stateless bearer token; authorization combines role and ownership
//! checks. Events live behind a pluggable store with in-memory and
//! PostgreSQL backends.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Principal extractor (auth/)
//!     │
//!     ├── CatalogService (service/)
//!     │
//!     ├── EventStore trait (store/)
//!     │     ├── MemoryStore
//!     │     └── PostgresStore
//!     │
//!     └── Domain types and pagination (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
