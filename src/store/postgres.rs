use crate::error::{AppError, AppResult};
use crate::models::UrlMapping;
use crate::store::UrlStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;

/// Postgres-backed store.
///
/// The `url_mappings` table carries a unique index on `short_code`, so
/// insert conflicts surface as database-level unique violations rather
/// than relying on an application-side existence check.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store with a connection pool
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UrlStore for PgStore {
    async fn insert(&self, long_url: &str, short_code: &str) -> AppResult<UrlMapping> {
        let now = Utc::now();

        let result = sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO url_mappings (short_code, long_url, created_at, access_count)
            VALUES ($1, $2, $3, 0)
            RETURNING *
            "#,
        )
        .bind(short_code)
        .bind(long_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(mapping) => Ok(mapping),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::CodeConflict(short_code.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_code(&self, short_code: &str) -> AppResult<Option<UrlMapping>> {
        let result = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT * FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn record_access(&self, short_code: &str) -> AppResult<Option<UrlMapping>> {
        // Single-statement increment: concurrent resolves of the same code
        // cannot lose updates.
        let result = sqlx::query_as::<_, UrlMapping>(
            r#"
            UPDATE url_mappings
            SET access_count = access_count + 1
            WHERE short_code = $1
            RETURNING *
            "#,
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

impl Clone for PgStore {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}
