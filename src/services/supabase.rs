use crate::models::{Lead, Property};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub leads: String,
    pub properties: String,
}

/// Client for the hosted backend's REST row surface.
///
/// The CRM keeps its system of record in a hosted Postgres exposed
/// PostgREST-style; this client only ever reads rows with
/// filter/order/limit parameters, authenticated by the service key.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new client for the given project URL and service key.
    pub fn new(base_url: String, api_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            tables,
        }
    }

    fn rest_url(&self, table: &str, query: &str) -> String {
        format!(
            "{}/rest/v1/{}?{}",
            self.base_url.trim_end_matches('/'),
            table,
            query
        )
    }

    async fn get_rows(&self, url: &str) -> Result<Vec<Value>, SupabaseError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Backend request failed: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!(
                "Backend returned {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        json.as_array()
            .cloned()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a row array".into()))
    }

    /// Fetch a single lead by row id.
    pub async fn get_lead(&self, lead_id: &str) -> Result<Lead, SupabaseError> {
        let query = format!("select=*&id=eq.{}&limit=1", urlencoding::encode(lead_id));
        let url = self.rest_url(&self.tables.leads, &query);

        tracing::debug!("Fetching lead from: {}", url);

        let rows = self.get_rows(&url).await?;

        let row = rows
            .first()
            .ok_or_else(|| SupabaseError::NotFound(format!("Lead {} not found", lead_id)))?;

        serde_json::from_value(row.clone())
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse lead: {}", e)))
    }

    /// Fetch the tenant's currently available properties, newest first.
    ///
    /// Rows that fail to deserialize are skipped rather than failing the
    /// whole query; the backend's tables carry more columns than this
    /// service reads and data entry is not always clean.
    pub async fn list_available_properties(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<Property>, SupabaseError> {
        let query = format!(
            "select=*&tenant_id=eq.{}&status=eq.Available&order=created_at.desc",
            urlencoding::encode(tenant_id)
        );
        let url = self.rest_url(&self.tables.properties, &query);

        tracing::debug!("Fetching properties from: {}", url);

        let rows = self.get_rows(&url).await?;
        let total = rows.len();

        let properties: Vec<Property> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();

        if properties.len() < total {
            tracing::warn!(
                "Skipped {} undecodable property rows for tenant {}",
                total - properties.len(),
                tenant_id
            );
        }

        tracing::debug!(
            "Queried {} available properties for tenant {}",
            properties.len(),
            tenant_id
        );

        Ok(properties)
    }

    /// Reachability probe against the REST root, used by the health
    /// endpoint.
    pub async fn health_check(&self) -> Result<bool, SupabaseError> {
        let url = format!("{}/rest/v1/", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
