// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! A thin wrapper around reqwest that adds authentication, retry of transient
//! failures and cursor pagination. Without an API key the client still
//! exists, but every call fails with [`AppError::NotConfigured`].

use super::parser;
use super::retry::retry_with_backoff;
use crate::constants::{
    NOTION_API_BASE_URL, NOTION_API_INITIAL_BACKOFF_MS, NOTION_API_MAX_ATTEMPTS,
    NOTION_API_MAX_BACKOFF_MS, NOTION_API_VERSION,
};
use crate::error::AppError;
use crate::model::{Block, Database, Page};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Option<Client>,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client. `None` yields an unconfigured client.
    pub fn new(api_key: Option<&ApiKey>) -> Result<Self, AppError> {
        let client = match api_key {
            Some(key) => Some(
                Client::builder()
                    .default_headers(Self::create_headers(key)?)
                    .build()?,
            ),
            None => {
                log::warn!("No Notion API key configured; remote calls will fail");
                None
            }
        };
        Ok(Self {
            client,
            base_url: NOTION_API_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::NotConfigured(format!("Invalid API token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn http(&self) -> Result<&Client, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::NotConfigured("set NOTION_API_KEY to reach the Notion API".to_string())
        })
    }

    /// GET with query parameters, retrying transient failures.
    async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<String>, AppError> {
        let client = self.http()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);

        with_retry(|| {
            let request = client.get(&url).query(query);
            async move {
                let response = request.send().await?;
                checked(extract_response_text(response).await?)
            }
        })
        .await
    }

    /// POST with a JSON body, retrying transient failures.
    async fn post<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ApiResponse<String>, AppError> {
        let client = self.http()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        with_retry(|| {
            let request = client.post(&url).json(body);
            async move {
                let response = request.send().await?;
                checked(extract_response_text(response).await?)
            }
        })
        .await
    }
}

async fn with_retry<F, Fut>(operation: F) -> Result<ApiResponse<String>, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<ApiResponse<String>, AppError>>,
{
    retry_with_backoff(
        operation,
        NOTION_API_MAX_ATTEMPTS,
        Duration::from_millis(NOTION_API_INITIAL_BACKOFF_MS),
        Duration::from_millis(NOTION_API_MAX_BACKOFF_MS),
    )
    .await
}

/// Turns retryable statuses into errors so the retry loop sees them; every
/// other response is handed on to the parser untouched.
fn checked(response: ApiResponse<String>) -> Result<ApiResponse<String>, AppError> {
    if response.status.is_success() {
        return Ok(response);
    }
    let error = parser::parse_error(&response.data, response.status, &response.url);
    if error.is_retryable() {
        Err(error)
    } else {
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        let result = self
            .get(&format!("pages/{}", id.to_hyphenated()), &[])
            .await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError> {
        let result = self
            .get(&format!("databases/{}", id.to_hyphenated()), &[])
            .await?;
        parser::parse_database_response(result)
    }

    async fn retrieve_block(&self, id: &NotionId) -> Result<Block, AppError> {
        let result = self
            .get(&format!("blocks/{}", id.to_hyphenated()), &[])
            .await?;
        parser::parse_block_response(result)
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let pagination_result = super::pagination::fetch_all_pages(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let result = self.get(&endpoint, &query).await?;
                    parser::parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;
        log::debug!(
            "Fetched {} child blocks of {}",
            pagination_result.total_fetched,
            parent
        );
        Ok(pagination_result.items)
    }

    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let pagination_result = super::pagination::fetch_all_pages(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = serde_json::json!({ "page_size": page_size });
                    if let Some(cursor) = cursor {
                        query["start_cursor"] = serde_json::json!(cursor);
                    }
                    let result = self.post(&endpoint, &query).await?;
                    parser::parse_pages_pagination(result)
                }
            },
            None,
        )
        .await?;
        log::debug!(
            "Queried {} rows of database {}",
            pagination_result.total_fetched,
            database
        );
        Ok(pagination_result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
