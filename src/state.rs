use crate::service::Shortener;
use crate::store::UrlStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction. The store handle is injected here rather
/// than held as process-wide state, so tests can swap in the in-memory
/// store.
#[derive(Clone)]
pub struct AppState {
    /// Shortening service driving create/resolve/stats
    pub shortener: Shortener,

    /// Store handle, used directly by the health endpoint
    pub store: Arc<dyn UrlStore>,

    /// Base URL for constructing short URLs (e.g., "http://localhost:3000")
    pub base_url: String,
}
