//! Thin HTTP collaborator of the resource client.
//!
//! The client only needs status + raw body back, so every verb returns an
//! [`HttpResponse`] and a failure here always means the request never got a
//! response (connection refused, CORS, aborted).

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to build request: {0}")]
    Request(String),
}

/// Verbs used against the REST surface; paths are relative to the API base
#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    /// `query` is an already encoded query string without the leading `?`
    async fn get(&self, path: &str, query: Option<&str>) -> Result<HttpResponse, TransportError>;

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;

    async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;

    async fn delete(&self, path: &str) -> Result<HttpResponse, TransportError>;

    /// Binary download (spreadsheets)
    async fn get_bytes(&self, path: &str) -> Result<HttpResponse, TransportError>;

    /// `multipart/form-data` upload with a single `file` part
    async fn post_multipart(
        &self,
        path: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<HttpResponse, TransportError>;
}
