//! Thin client for the DocRouter document-listing endpoint.

use log::{debug, info, warn};
use reqwest::Url;

use crate::config::DocRouterConfig;
use crate::error::DocRouterError;
use crate::types::ListDocumentsResult;

/// Issues `GET {base_url}/v0/orgs/{organization_id}/documents`.
///
/// Holds only immutable configuration plus a pooled `reqwest::Client`, so a
/// single instance can be shared by every concurrently running activity.
#[derive(Debug, Clone)]
pub struct DocRouterClient {
    http: reqwest::Client,
    config: DocRouterConfig,
}

impl DocRouterClient {
    pub fn new(config: DocRouterConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: DocRouterConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &DocRouterConfig {
        &self.config
    }

    /// URL of the documents collection for `organization_id`, without the
    /// pagination query.
    pub fn documents_url(&self, organization_id: &str) -> Url {
        let mut url = self.config.base_url.clone();
        // A validated base URL always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v0", "orgs", organization_id, "documents"]);
        }
        url
    }

    /// Fetch one page. Exactly one request is sent; nothing is retried here.
    pub async fn list_documents(
        &self,
        organization_id: &str,
        skip: u32,
        limit: u32,
    ) -> Result<ListDocumentsResult, DocRouterError> {
        let url = self.documents_url(organization_id);
        info!("Calling DocRouter API: {url} with skip={skip} limit={limit}");

        let response = self
            .http
            .get(url)
            .query(&[("skip", skip), ("limit", limit)])
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(DocRouterError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
            warn!("DocRouter API returned {status} for organization {organization_id}");
            return Err(DocRouterError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(DocRouterError::Transport)?;
        debug!("DocRouter API returned {} bytes", bytes.len());

        let result: ListDocumentsResult =
            serde_json::from_slice(&bytes).map_err(DocRouterError::Decode)?;

        info!(
            "Retrieved {} documents (total_count={:?}) for organization {organization_id}",
            result.document_count(),
            result.total_count()
        );
        Ok(result)
    }
}
