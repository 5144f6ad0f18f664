//! REST client for the remote relational store.
//!
//! Speaks a PostgREST-style row API: filterable table endpoints under
//! `/rest/v1/{table}` plus the read-only `personal_bests` view the store
//! maintains. One client instance implements every store contract the core
//! defines and is built once at the composition root.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use swimlog_core::bests::PersonalBest;
use swimlog_core::records::{OwnedRecord, PersonalBestStore, RecordStore};

use crate::error::{Result, StoreClientError};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Connection settings supplied by the application's composition root.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store API (e.g., "https://db.swimlog.app")
    pub base_url: String,
    /// Project API key sent on every request.
    pub api_key: String,
    /// Bearer token for the signed-in user.
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: String,
    message: String,
}

/// Client for the remote store's REST API.
#[derive(Debug, Clone)]
pub struct RestStoreClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl RestStoreClient {
    /// Create a new store client.
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            access_token: config.access_token,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| StoreClientError::auth("Invalid API key format"))?;
        headers.insert("apikey", api_key);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|_| StoreClientError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Headers for inserts that need the confirmed row echoed back.
    fn headers_returning(&self) -> Result<HeaderMap> {
        let mut headers = self.headers()?;
        headers.insert("prefer", HeaderValue::from_static("return=representation"));
        Ok(headers)
    }

    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("store response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("store response error ({}): {}", status, preview);
    }

    fn api_error_from(status: reqwest::StatusCode, body: &str) -> StoreClientError {
        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(body) {
            let message = if error.code.is_empty() {
                error.message
            } else {
                format!("{}: {}", error.code, error.message)
            };
            return StoreClientError::api(status.as_u16(), message);
        }
        StoreClientError::api(status.as_u16(), format!("Request failed: {}", body))
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(Self::api_error_from(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            StoreClientError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Check a response for success, discarding any body.
    async fn expect_success(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            debug!("store response status: {}", status);
            return Ok(());
        }

        let body = response.text().await?;
        Self::log_response(status, &body);
        Err(Self::api_error_from(status, &body))
    }

    fn draft_with_owner<D: serde::Serialize>(owner: &str, draft: &D) -> Result<serde_json::Value> {
        let mut body = serde_json::to_value(draft)?;
        if let serde_json::Value::Object(fields) = &mut body {
            fields.insert(
                "owner".to_string(),
                serde_json::Value::String(owner.to_string()),
            );
        }
        Ok(body)
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordStore<R> for RestStoreClient {
    /// Rows for one owner, newest first.
    ///
    /// GET /rest/v1/{table}?owner=eq.{owner}&order=date.desc
    async fn list_by_owner(&self, owner: &str, limit: Option<u32>) -> swimlog_core::Result<Vec<R>> {
        let url = self.table_url(R::TABLE);
        let mut query = vec![
            ("owner".to_string(), format!("eq.{owner}")),
            ("order".to_string(), "date.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        debug!("listing {} for owner {}", R::TABLE, owner);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&query)
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        Ok(Self::parse_response(response).await?)
    }

    /// Insert one row and return the confirmed record.
    ///
    /// POST /rest/v1/{table}
    async fn insert(&self, owner: &str, draft: &R::Draft) -> swimlog_core::Result<R> {
        let url = self.table_url(R::TABLE);
        let body = Self::draft_with_owner(owner, draft)?;

        let response = self
            .client
            .post(&url)
            .headers(self.headers_returning()?)
            .json(&body)
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        let rows: Vec<R> = Self::parse_response(response).await?;
        let confirmed = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreClientError::api(500, "insert returned no row"))?;
        Ok(confirmed)
    }

    /// Batch insert for the import path.
    ///
    /// POST /rest/v1/{table} with an array body
    async fn insert_many(&self, owner: &str, drafts: &[R::Draft]) -> swimlog_core::Result<usize> {
        if drafts.is_empty() {
            return Ok(0);
        }
        let url = self.table_url(R::TABLE);
        let mut rows = Vec::with_capacity(drafts.len());
        for draft in drafts {
            rows.push(Self::draft_with_owner(owner, draft)?);
        }
        debug!("batch inserting {} rows into {}", rows.len(), R::TABLE);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&rows)
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        Self::expect_success(response).await?;
        Ok(drafts.len())
    }

    /// PATCH /rest/v1/{table}?id=eq.{id}
    async fn update(&self, id: &str, draft: &R::Draft) -> swimlog_core::Result<()> {
        let url = self.table_url(R::TABLE);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .query(&[("id", format!("eq.{id}"))])
            .json(draft)
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        Ok(Self::expect_success(response).await?)
    }

    /// DELETE /rest/v1/{table}?id=eq.{id}
    async fn delete(&self, id: &str) -> swimlog_core::Result<()> {
        let url = self.table_url(R::TABLE);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        Ok(Self::expect_success(response).await?)
    }
}

#[async_trait]
impl PersonalBestStore for RestStoreClient {
    /// The store's precomputed minimum-time-per-key view.
    ///
    /// GET /rest/v1/personal_bests?owner=eq.{owner}
    async fn list_personal_bests(&self, owner: &str) -> swimlog_core::Result<Vec<PersonalBest>> {
        let url = self.table_url("personal_bests");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&[("owner", format!("eq.{owner}"))])
            .send()
            .await
            .map_err(StoreClientError::Http)?;

        Ok(Self::parse_response(response).await?)
    }
}
