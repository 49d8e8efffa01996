//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into axum handlers via the `State` extractor. The
//! portal is stateless between requests — the only shared piece is the
//! workshop API client behind its trait object, so tests can swap in a
//! scripted mock.

use std::sync::Arc;

use crate::api::WorkshopApi;

/// Shared application state, injected into axum handlers via State extractor.
/// Clone is required by axum; the client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn WorkshopApi>,
}

impl AppState {
    #[must_use]
    pub fn new(api: Arc<dyn WorkshopApi>) -> Self {
        Self { api }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
