use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::ProductRecord;

/// Errors that can occur when talking to the storefront catalog API
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the storefront catalog API
///
/// The engine consumes a single contract: fetch every in-stock product
/// across all categories as a flat list. No pagination, no filtering
/// parameters, and no retries; a failed fetch propagates to the quiz
/// layer, which keeps the session in its submitting state.
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CatalogClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the full in-stock catalog
    pub async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let url = format!(
            "{}/catalog/products?inStock=true",
            self.base_url.trim_end_matches('/')
        );

        tracing::debug!("Fetching catalog from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Shop-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::ApiError(format!(
                "Failed to fetch catalog: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let items = json
            .get("products")
            .and_then(|p| p.as_array())
            .ok_or_else(|| CatalogError::InvalidResponse("Missing products array".into()))?;

        // Malformed records with wrong field types are skipped; records
        // with missing fields deserialize to defaults and reach the
        // scorer, which handles them defensively
        let products: Vec<ProductRecord> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .filter(|p: &ProductRecord| p.in_stock)
            .collect();

        tracing::debug!("Fetched {} products (total: {})", products.len(), total);

        Ok(products)
    }
}
