//! Browser implementation of [`HttpTransport`] on top of `gloo-net`.

use crate::shared::export::bytes_to_blob;
use crate::shared::master_data::transport::{HttpResponse, HttpTransport, TransportError};
use crate::system::auth::storage;
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};

const MULTIPART_FIELD: &str = "file";

pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    /// `base_url` without a trailing slash, e.g. `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{}{}?{}", self.base_url, path, q),
            None => format!("{}{}", self.base_url, path),
        }
    }

    fn authorized(builder: RequestBuilder) -> RequestBuilder {
        match storage::bearer_header() {
            Some(header) => builder.header("Authorization", &header),
            None => builder,
        }
    }
}

fn network(err: gloo_net::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

async fn into_response(response: Response) -> Result<HttpResponse, TransportError> {
    let status = response.status();
    let body = response.binary().await.map_err(network)?;
    Ok(HttpResponse::new(status, body))
}

async fn send(request: Request) -> Result<HttpResponse, TransportError> {
    let response = request.send().await.map_err(network)?;
    into_response(response).await
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn get(&self, path: &str, query: Option<&str>) -> Result<HttpResponse, TransportError> {
        let response = Self::authorized(Request::get(&self.url(path, query)))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(network)?;
        into_response(response).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let request = Self::authorized(Request::post(&self.url(path, None)))
            .json(body)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        send(request).await
    }

    async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let request = Self::authorized(Request::put(&self.url(path, None)))
            .json(body)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        send(request).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, TransportError> {
        let response = Self::authorized(Request::delete(&self.url(path, None)))
            .send()
            .await
            .map_err(network)?;
        into_response(response).await
    }

    async fn get_bytes(&self, path: &str) -> Result<HttpResponse, TransportError> {
        let response = Self::authorized(Request::get(&self.url(path, None)))
            .send()
            .await
            .map_err(network)?;
        into_response(response).await
    }

    async fn post_multipart(
        &self,
        path: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let form = web_sys::FormData::new()
            .map_err(|e| TransportError::Request(format!("{:?}", e)))?;
        let blob = bytes_to_blob(bytes, "application/octet-stream")
            .map_err(|e| TransportError::Request(format!("{:?}", e)))?;
        form.append_with_blob_and_filename(MULTIPART_FIELD, &blob, file_name)
            .map_err(|e| TransportError::Request(format!("{:?}", e)))?;

        // The browser sets the multipart boundary header itself
        let request = Self::authorized(Request::post(&self.url(path, None)))
            .body(form)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        send(request).await
    }
}
