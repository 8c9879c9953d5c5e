//! Fetch stage: one GET per target, classified and persisted.

use crate::error::FetchError;
use crate::storage;
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};

/// Cap on how much of a non-2xx body is drained before discarding it.
const ERROR_DRAIN_LIMIT: usize = 4096;

/// Outcome of a successful fetch: status plus the persisted body.
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub status: u16,
    pub saved_body_path: PathBuf,
}

/// The fetch seam of the scan pipeline.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform exactly one GET of `url` and persist the body on success.
    async fn fetch(&self, url: &str) -> Result<FetchSuccess, FetchError>;
}

/// Production fetcher over the shared proxied client.
pub struct HttpFetcher {
    client: reqwest::Client,
    body_dir: PathBuf,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, body_dir: &Path) -> Self {
        Self {
            client,
            body_dir: body_dir.to_path_buf(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchSuccess, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            // Bounded read; the error body is discarded.
            let mut stream = response.bytes_stream();
            let mut drained = 0;
            while drained < ERROR_DRAIN_LIMIT {
                match stream.next().await {
                    Some(Ok(chunk)) => drained += chunk.len(),
                    _ => break,
                }
            }
            return Err(FetchError::HttpStatus { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let saved_body_path = storage::write_body(&self.body_dir, url, &body)
            .map_err(|source| FetchError::Persist { status, source })?;

        Ok(FetchSuccess {
            status,
            saved_body_path,
        })
    }
}
