use crate::error::{AppError, AppResult};
use crate::models::UrlMapping;
use crate::store::UrlStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store, used by tests and the `--in-memory` server mode.
///
/// A single `RwLock` around the map makes insert and increment atomic,
/// matching the guarantees of the Postgres backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    by_code: HashMap<String, UrlMapping>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlStore for MemoryStore {
    async fn insert(&self, long_url: &str, short_code: &str) -> AppResult<UrlMapping> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(short_code) {
            return Err(AppError::CodeConflict(short_code.to_string()));
        }

        inner.next_id += 1;
        let mapping = UrlMapping {
            id: inner.next_id,
            short_code: short_code.to_string(),
            long_url: long_url.to_string(),
            created_at: Utc::now(),
            access_count: 0,
        };

        inner
            .by_code
            .insert(short_code.to_string(), mapping.clone());
        Ok(mapping)
    }

    async fn find_by_code(&self, short_code: &str) -> AppResult<Option<UrlMapping>> {
        let inner = self.inner.read().await;
        Ok(inner.by_code.get(short_code).cloned())
    }

    async fn record_access(&self, short_code: &str) -> AppResult<Option<UrlMapping>> {
        let mut inner = self.inner.write().await;
        match inner.by_code.get_mut(short_code) {
            Some(mapping) => {
                mapping.access_count += 1;
                Ok(Some(mapping.clone()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_ids_and_zero_count() {
        let store = MemoryStore::new();
        let first = store.insert("https://example.com/a", "aaaaaa").await.unwrap();
        let second = store.insert("https://example.com/b", "bbbbbb").await.unwrap();

        assert_eq!(first.access_count, 0);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_insert_duplicate_code_conflicts() {
        let store = MemoryStore::new();
        store.insert("https://example.com/a", "aaaaaa").await.unwrap();

        let err = store
            .insert("https://example.com/b", "aaaaaa")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CodeConflict(code) if code == "aaaaaa"));

        // The original mapping is untouched.
        let found = store.find_by_code("aaaaaa").await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_record_access_increments() {
        let store = MemoryStore::new();
        store.insert("https://example.com", "cccccc").await.unwrap();

        let first = store.record_access("cccccc").await.unwrap().unwrap();
        assert_eq!(first.access_count, 1);
        let second = store.record_access("cccccc").await.unwrap().unwrap();
        assert_eq!(second.access_count, 2);
    }

    #[tokio::test]
    async fn test_record_access_unknown_code_is_none() {
        let store = MemoryStore::new();
        assert!(store.record_access("ZZZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_code_is_pure() {
        let store = MemoryStore::new();
        store.insert("https://example.com", "dddddd").await.unwrap();

        store.find_by_code("dddddd").await.unwrap();
        let found = store.find_by_code("dddddd").await.unwrap().unwrap();
        assert_eq!(found.access_count, 0);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_only_one_wins() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(&format!("https://example.com/{}", i), "RACE01")
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
