//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::service::CatalogService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog service for all business logic.
    pub service: Arc<CatalogService>,
    /// Token codec for issuing and verifying bearer tokens.
    pub codec: Arc<TokenCodec>,
}
