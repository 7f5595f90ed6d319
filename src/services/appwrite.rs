use crate::models::{Mentor, Startup};
use crate::services::directory::{Directory, DirectoryError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub startups: String,
    pub mentors: String,
}

/// Appwrite document API client
///
/// Reads startup and mentor documents from the platform's Appwrite database:
/// - Fetching a single document by id
/// - Paging through the approved, active pool of a collection
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    page_size: usize,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        timeout: Duration,
        page_size: usize,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: page_size.max(1),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    /// Fetch one document, mapping a 404 to `None`
    async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppwriteError> {
        let url = format!(
            "{}/{}",
            self.documents_url(collection),
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching document {} from {}", id, collection);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppwriteError::Unauthorized)
            }
            status if !status.is_success() => {
                return Err(AppwriteError::ApiError(format!(
                    "Failed to fetch {} document {}: {}",
                    collection, id, status
                )));
            }
            _ => {}
        }

        let doc: Value = response.json().await?;
        let data = doc.get("data").unwrap_or(&doc);

        serde_json::from_value(data.clone())
            .map(Some)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse {} document {}: {}", collection, id, e)))
    }

    /// Page through every approved, active document of a collection
    ///
    /// Documents that fail to parse are skipped with a warning.
    async fn list_pool<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppwriteError> {
        let url = self.documents_url(collection);
        let mut pool = Vec::new();
        let mut offset = 0;

        loop {
            let queries = pool_queries(self.page_size, offset);
            let queries_json = serde_json::to_string(&queries)
                .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
            let full_url = format!("{}?query={}", url, urlencoding::encode(&queries_json));

            let response = self
                .client
                .get(&full_url)
                .header("X-Appwrite-Key", &self.api_key)
                .header("X-Appwrite-Project", &self.project_id)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(AppwriteError::Unauthorized);
            }
            if !status.is_success() {
                return Err(AppwriteError::ApiError(format!(
                    "Failed to list {}: {}",
                    collection, status
                )));
            }

            let json: Value = response.json().await?;

            let total = json.get("total").and_then(|t| t.as_u64());

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            let page_len = documents.len();

            pool.extend(documents.iter().filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value(data.clone()) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping {} document {:?}: {}",
                            collection,
                            doc.get("$id").and_then(|id| id.as_str()),
                            e
                        );
                        None
                    }
                }
            }));

            offset += page_len;

            let exhausted = total.map_or(false, |total| offset as u64 >= total);
            if page_len < self.page_size || exhausted {
                break;
            }
        }

        tracing::debug!("Listed {} {} (scanned {})", pool.len(), collection, offset);

        Ok(pool)
    }

    /// Cheap authenticated request against the mentors collection
    ///
    /// Non-success statuses report `false`; transport failures are errors.
    pub async fn ping(&self) -> Result<bool, AppwriteError> {
        let queries = serde_json::to_string(&["limit(1)"])
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let url = format!(
            "{}?query={}",
            self.documents_url(&self.collections.mentors),
            urlencoding::encode(&queries)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Appwrite health check returned {}", status);
        }

        Ok(status.is_success())
    }
}

/// Query strings selecting one page of the approved, active pool
pub(crate) fn pool_queries(page_size: usize, offset: usize) -> Vec<String> {
    vec![
        r#"equal("status", "approved")"#.to_string(),
        r#"equal("isActive", true)"#.to_string(),
        r#"orderAsc("$createdAt")"#.to_string(),
        format!("limit({})", page_size),
        format!("offset({})", offset),
    ]
}

#[async_trait]
impl Directory for AppwriteClient {
    async fn startup_by_id(&self, id: &str) -> Result<Option<Startup>, DirectoryError> {
        Ok(self.get_document(&self.collections.startups, id).await?)
    }

    async fn mentor_by_id(&self, id: &str) -> Result<Option<Mentor>, DirectoryError> {
        Ok(self.get_document(&self.collections.mentors, id).await?)
    }

    async fn approved_active_mentors(&self) -> Result<Vec<Mentor>, DirectoryError> {
        Ok(self.list_pool(&self.collections.mentors).await?)
    }

    async fn approved_active_startups(&self) -> Result<Vec<Startup>, DirectoryError> {
        Ok(self.list_pool(&self.collections.startups).await?)
    }

    async fn health_check(&self) -> Result<bool, DirectoryError> {
        Ok(self.ping().await?)
    }
}
