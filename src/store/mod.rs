//! Storage backends for URL mappings.
//!
//! All persistence sits behind the [`UrlStore`] trait so the service and
//! HTTP layers can run against Postgres in production and the in-memory
//! store in tests (or with `--in-memory`).

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppResult;
use crate::models::UrlMapping;
use async_trait::async_trait;

#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Insert a new mapping for `long_url` under `short_code`.
    ///
    /// Uniqueness of `short_code` is enforced here, atomically with
    /// respect to concurrent inserts: if the code is already taken the
    /// insert fails with `AppError::CodeConflict` and the caller retries
    /// with a fresh code. There is no separate check-then-insert window.
    async fn insert(&self, long_url: &str, short_code: &str) -> AppResult<UrlMapping>;

    /// Exact-match lookup by short code, without side effects.
    async fn find_by_code(&self, short_code: &str) -> AppResult<Option<UrlMapping>>;

    /// Look up a mapping and atomically increment its access count.
    ///
    /// Returns the updated mapping, or `None` if the code is unknown (in
    /// which case nothing is mutated).
    async fn record_access(&self, short_code: &str) -> AppResult<Option<UrlMapping>>;

    /// Verify the backend is reachable. Used by the health endpoint.
    async fn ping(&self) -> AppResult<()>;
}
