//! HTTP implementation of [`DirectoryClient`]

use crate::config::DirectorySection;
use crate::directory::{DirectoryClient, DirectoryEntry, DirectoryList};
use crate::directory_span;
use crate::error::{QuoteError, QuoteResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, Instrument};
use url::Url;

/// Directory client backed by the tucarga HTTP API
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    transport: HttpTransport,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectorySection) -> QuoteResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    async fn fetch_entries(&self, url: Url) -> QuoteResult<Vec<DirectoryEntry>> {
        let endpoint = url.path().to_string();
        let response = self.transport.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(QuoteError::unexpected_status(endpoint, status));
        }

        let body = response.text().await.map_err(|e| {
            QuoteError::transport(endpoint.clone(), format!("Failed to read response body: {e}"))
        })?;

        let entries: Vec<DirectoryEntry> = serde_json::from_str(&body)
            .map_err(|e| QuoteError::invalid_response(endpoint.clone(), e.to_string()))?;

        info!(endpoint = %endpoint, count = entries.len(), "Loaded directory entries");
        Ok(entries)
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn list(&self, list: DirectoryList) -> QuoteResult<Vec<DirectoryEntry>> {
        let url = self.transport.endpoint(&["directory", list.resource(), ""]);

        self.fetch_entries(url)
            .instrument(directory_span!(resource = %list))
            .await
    }

    async fn communes(&self, region_id: &str) -> QuoteResult<Vec<DirectoryEntry>> {
        let url = self.transport.endpoint(&["directory", "commune", region_id, ""]);

        self.fetch_entries(url)
            .instrument(directory_span!(resource = "commune", region_id = %region_id))
            .await
    }

    async fn user_exists(&self, email: &str) -> QuoteResult<bool> {
        let url = self.transport.endpoint(&["directory", "user", email]);
        let endpoint = url.path().to_string();

        let response = self
            .transport
            .get(url)
            .instrument(directory_span!(resource = "user"))
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(QuoteError::unexpected_status(endpoint, status)),
        }
    }
}
