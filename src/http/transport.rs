use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::HeaderMap;

use crate::error::HttpError;

/// Responses larger than this are treated as transport failures.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Status and raw body of one completed GET request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Issues one GET request. Implementations must be shareable across workers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET against `url` with `headers`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be completed or the body
    /// cannot be read.
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<TransportResponse, HttpError>;
}

/// `reqwest`-backed transport sharing one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    max_body_bytes: usize,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<TransportResponse, HttpError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|err| HttpError::RequestFailed {
                url: url.to_owned(),
                source: err,
            })?;
        let status = response.status().as_u16();
        let body = read_body_capped(response, url, self.max_body_bytes).await?;
        Ok(TransportResponse { status, body })
    }
}

async fn read_body_capped(
    response: reqwest::Response,
    url: &str,
    limit: usize,
) -> Result<Vec<u8>, HttpError> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|err| HttpError::ReadBodyFailed {
            url: url.to_owned(),
            source: err,
        })?;
        if body.len().saturating_add(bytes.len()) > limit {
            return Err(HttpError::BodyTooLarge {
                url: url.to_owned(),
                limit,
            });
        }
        body.extend_from_slice(&bytes);
    }
    Ok(body)
}
