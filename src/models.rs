use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// URL mapping record in the store.
///
/// The `id` is internal to the store and never exposed at the HTTP
/// boundary; `short_code` acts as the unique external key. Only
/// `access_count` is ever mutated after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub access_count: i64,
}

/// Request to create a short URL
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(url(message = "Must be a valid URL"))]
    pub long_url: String,
}

/// Response after creating a short URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

/// Response for the stats endpoint. Mirrors the stored mapping minus the
/// internal identifier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub long_url: String,
    pub short_code: String,
    pub creation_date: DateTime<Utc>,
    pub access_count: i64,
}

impl From<UrlMapping> for StatsResponse {
    fn from(mapping: UrlMapping) -> Self {
        StatsResponse {
            long_url: mapping.long_url,
            short_code: mapping.short_code,
            creation_date: mapping.created_at,
            access_count: mapping.access_count,
        }
    }
}
