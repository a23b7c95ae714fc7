//! Network access for uploads, behind the [`Transport`] trait.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use mvnpub_util::errors::MvnpubError;

use crate::auth::{self, Auth};

/// How a transport call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request did not complete in time.
    Timeout,
    /// Connection, TLS, or protocol failure.
    Failed(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Rejected { status, body } if body.is_empty() => {
                write!(f, "HTTP {status}")
            }
            TransportError::Rejected { status, body } => write!(f, "HTTP {status}: {body}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Failed(message) => f.write_str(message),
        }
    }
}

/// The network operations the publisher needs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`. `Ok(None)` when the server answers 404.
    async fn fetch(
        &self,
        url: &str,
        auth: Option<&Auth>,
    ) -> Result<Option<Vec<u8>>, TransportError>;

    /// PUT `body` at `url`.
    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        auth: Option<&Auth>,
    ) -> Result<(), TransportError>;

    /// POST `body` as a multipart `bundle` file part. Returns the response body.
    async fn post_bundle(
        &self,
        url: &str,
        file_name: &str,
        body: Vec<u8>,
        auth: Option<&Auth>,
    ) -> Result<String, TransportError>;
}

/// [`Transport`] over HTTPS with `reqwest`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, MvnpubError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mvnpub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MvnpubError::Generic {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

fn request_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Failed(e.to_string())
    }
}

async fn rejected(resp: reqwest::Response) -> TransportError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    TransportError::Rejected {
        status,
        body: body.trim().to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        url: &str,
        auth: Option<&Auth>,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        let req = auth::apply_auth(self.client.get(url), auth);
        let resp = req.send().await.map_err(request_error)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(rejected(resp).await);
        }
        let bytes = resp.bytes().await.map_err(request_error)?;
        Ok(Some(bytes.to_vec()))
    }

    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        auth: Option<&Auth>,
    ) -> Result<(), TransportError> {
        let req = auth::apply_auth(self.client.put(url), auth).body(body);
        let resp = req.send().await.map_err(request_error)?;
        if !resp.status().is_success() {
            return Err(rejected(resp).await);
        }
        tracing::debug!("PUT {url} -> {}", resp.status());
        Ok(())
    }

    async fn post_bundle(
        &self,
        url: &str,
        file_name: &str,
        body: Vec<u8>,
        auth: Option<&Auth>,
    ) -> Result<String, TransportError> {
        let part = Part::bytes(body)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(request_error)?;
        let form = Form::new().part("bundle", part);
        let req = auth::apply_auth(self.client.post(url), auth).multipart(form);
        let resp = req.send().await.map_err(request_error)?;
        if !resp.status().is_success() {
            return Err(rejected(resp).await);
        }
        resp.text().await.map_err(request_error)
    }
}

/// A request a [`DryRunTransport`] would have sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    pub method: &'static str,
    pub url: String,
    pub bytes: usize,
}

/// [`Transport`] that records requests instead of sending them. Fetches
/// behave as if nothing was deployed yet.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    requests: Mutex<Vec<PlannedRequest>>,
}

impl DryRunTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests recorded so far, in order.
    pub fn requests(&self) -> Vec<PlannedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn record(&self, method: &'static str, url: &str, bytes: usize) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(PlannedRequest {
                method,
                url: url.to_string(),
                bytes,
            });
        }
    }
}

#[async_trait]
impl Transport for DryRunTransport {
    async fn fetch(
        &self,
        url: &str,
        _auth: Option<&Auth>,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        self.record("GET", url, 0);
        Ok(None)
    }

    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
        _auth: Option<&Auth>,
    ) -> Result<(), TransportError> {
        self.record("PUT", url, body.len());
        Ok(())
    }

    async fn post_bundle(
        &self,
        url: &str,
        _file_name: &str,
        body: Vec<u8>,
        _auth: Option<&Auth>,
    ) -> Result<String, TransportError> {
        self.record("POST", url, body.len());
        Ok("dry-run".to_string())
    }
}
