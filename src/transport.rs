//! HTTP transport seam.
//!
//! [`Client`](crate::Client) hands a fully signed URL to a [`Transport`] and gets
//! the raw response back. [`HttpTransport`] is the reqwest-backed default; tests
//! and callers with special needs can plug in their own.

use crate::{Response, Result};
use std::fmt;
use std::future::Future;

/// Performs a single HTTP GET for an already signed URL.
///
/// Implementations must not retry and must not alter the URL: the signature
/// covers it byte for byte.
pub trait Transport: Send + Sync {
    /// Issue a GET to `url` and return status and body unchanged.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("http", &"<reqwest::Client>")
            .finish()
    }
}

impl HttpTransport {
    /// Wrap an already configured `reqwest::Client`.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(Response::new(status, body.to_vec()))
    }
}
