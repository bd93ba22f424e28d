//! Core shortening service: validation, code generation with collision
//! retry, resolve-with-count, and stats lookup.

use crate::codes;
use crate::error::{AppError, AppResult};
use crate::models::UrlMapping;
use crate::store::UrlStore;
use std::sync::Arc;
use url::Url;

/// Orchestrates the three operations against an injected store handle.
#[derive(Clone)]
pub struct Shortener {
    store: Arc<dyn UrlStore>,
    max_attempts: u32,
}

impl Shortener {
    pub fn new(store: Arc<dyn UrlStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Create a new mapping for `long_url` under a freshly generated code.
    ///
    /// Uniqueness is enforced by the store's insert: a `CodeConflict`
    /// means the candidate code was taken (possibly by a concurrent
    /// request) and a new code is generated. The retry count is bounded
    /// by `max_attempts` rather than looping forever.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` for an empty or malformed URL, and
    /// `AppError::CodeGenerationFailed` if every attempt collided.
    pub async fn shorten(&self, long_url: &str) -> AppResult<UrlMapping> {
        validate_long_url(long_url)?;

        for _ in 0..self.max_attempts {
            let code = codes::generate();

            match self.store.insert(long_url, &code).await {
                Ok(mapping) => {
                    tracing::debug!(short_code = %mapping.short_code, "Created mapping");
                    return Ok(mapping);
                }
                Err(AppError::CodeConflict(code)) => {
                    tracing::debug!(short_code = %code, "Short code collision, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeGenerationFailed)
    }

    /// Look up a mapping by short code and count the access.
    ///
    /// This is a read with a side effect: the access count is incremented
    /// by exactly one, atomically at the store level.
    pub async fn resolve(&self, short_code: &str) -> AppResult<UrlMapping> {
        self.store
            .record_access(short_code)
            .await?
            .ok_or_else(|| AppError::UrlNotFound(short_code.to_string()))
    }

    /// Look up a mapping by short code without mutating anything.
    pub async fn stats(&self, short_code: &str) -> AppResult<UrlMapping> {
        self.store
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::UrlNotFound(short_code.to_string()))
    }
}

/// Reject empty input and anything that is not an absolute http(s) URL.
fn validate_long_url(raw: &str) -> AppResult<()> {
    if raw.trim().is_empty() {
        return Err(AppError::InvalidUrl("URL must not be empty".to_string()));
    }

    let parsed =
        Url::parse(raw).map_err(|_| AppError::InvalidUrl("Invalid URL format".to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    fn shortener() -> Shortener {
        Shortener::new(Arc::new(MemoryStore::new()), 10)
    }

    #[tokio::test]
    async fn test_shorten_resolve_round_trip() {
        let service = shortener();
        let mapping = service
            .shorten("https://example.com/article/1")
            .await
            .unwrap();

        assert_eq!(mapping.short_code.len(), 6);
        assert!(mapping.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(mapping.access_count, 0);

        let resolved = service.resolve(&mapping.short_code).await.unwrap();
        assert_eq!(resolved.long_url, "https://example.com/article/1");
        assert_eq!(resolved.access_count, 1);
    }

    #[tokio::test]
    async fn test_shorten_rejects_empty_url() {
        let service = shortener();
        let err = service.shorten("").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_shorten_rejects_malformed_url() {
        let service = shortener();
        let err = service.shorten("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_shorten_rejects_non_http_scheme() {
        let service = shortener();
        let err = service.shorten("ftp://example.com/file").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_distinct_shortens_get_distinct_codes() {
        let service = shortener();
        let first = service.shorten("https://example.com/a").await.unwrap();
        let second = service.shorten("https://example.com/a").await.unwrap();
        assert_ne!(first.short_code, second.short_code);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let service = shortener();
        let err = service.resolve("ZZZZZZ").await.unwrap_err();
        assert!(matches!(err, AppError::UrlNotFound(code) if code == "ZZZZZZ"));
    }

    #[tokio::test]
    async fn test_stats_does_not_mutate_count() {
        let service = shortener();
        let mapping = service.shorten("https://example.com").await.unwrap();

        service.resolve(&mapping.short_code).await.unwrap();
        service.resolve(&mapping.short_code).await.unwrap();

        let stats = service.stats(&mapping.short_code).await.unwrap();
        assert_eq!(stats.access_count, 2);
        let stats_again = service.stats(&mapping.short_code).await.unwrap();
        assert_eq!(stats_again.access_count, 2);
    }

    #[tokio::test]
    async fn test_stats_unknown_code_is_not_found() {
        let service = shortener();
        let err = service.stats("ZZZZZZ").await.unwrap_err();
        assert!(matches!(err, AppError::UrlNotFound(_)));
    }

    /// Store whose inserts always conflict, to exercise the retry bound.
    struct AlwaysConflicts;

    #[async_trait]
    impl crate::store::UrlStore for AlwaysConflicts {
        async fn insert(&self, _long_url: &str, short_code: &str) -> AppResult<UrlMapping> {
            Err(AppError::CodeConflict(short_code.to_string()))
        }

        async fn find_by_code(&self, _short_code: &str) -> AppResult<Option<UrlMapping>> {
            Ok(None)
        }

        async fn record_access(&self, _short_code: &str) -> AppResult<Option<UrlMapping>> {
            Ok(None)
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generation_gives_up_after_max_attempts() {
        let service = Shortener::new(Arc::new(AlwaysConflicts), 3);
        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, AppError::CodeGenerationFailed));
    }
}
