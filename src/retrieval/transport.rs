//! The transport collaborator: turns request descriptors into raw payload
//! bytes.

use crate::request::plan::RequestDescriptor;
use crate::retrieval::error::RetrievalError;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;

/// Fetches one remote payload for a [`RequestDescriptor`].
///
/// The core only supplies descriptors and consumes bytes; retry policy, SSL
/// configuration, and connection pooling all live behind this trait.
/// Implementations must be safe to call concurrently, as the orchestrator
/// dispatches fetches through a bounded worker pool.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one fetch, returning the raw response body.
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>, RetrievalError>;
}

/// Default [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a pre-configured client, e.g. with custom TLS or proxy settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>, RetrievalError> {
        let url = &request.url;
        info!(
            "Downloading {} for {} ({}..{})",
            url, request.variable, request.window.start, request.window.end
        );

        let response = self
            .client
            .get(url)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| RetrievalError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    RetrievalError::HttpStatus {
                        url: url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    RetrievalError::NetworkRequest(url.clone(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| RetrievalError::NetworkRequest(url.clone(), e))?;
        info!("Received {} bytes for {}", body.len(), request.variable);
        Ok(body.to_vec())
    }
}
