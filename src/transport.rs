//! HTTP seam between the client state and the marketplace backend.
//!
//! Network traffic is a JSON `POST` or `GET` with an optional bearer
//! credential, and the [`Transport`] trait is exactly those two calls.
//! [`HttpTransport`] is the `reqwest` implementation; tests plug in a
//! scripted transport instead.

use crate::error::Result;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::cell::OnceCell;
use std::time::Duration;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Issues JSON requests to paths relative to the backend base URL.
///
/// Non-success statuses are returned as an [`HttpReply`], not an error, so
/// callers can route 401 differently from other failures. Only transport
/// level failures (connect, timeout) surface as `Err`.
pub trait Transport: Send {
    fn post_json(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpReply>;

    fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<HttpReply>;
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    /// Backend origin, e.g. `https://lost.example.com`.
    pub base_url: String,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: OnceCell::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, url: &str, request: RequestBuilder, bearer: Option<&str>) -> Result<HttpReply> {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let resp = request.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        tracing::debug!(%url, status, "response received");
        Ok(HttpReply { status, body })
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpReply> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let request = self.client()?.post(&url).json(body);
        self.send(&url, request, bearer)
    }

    fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<HttpReply> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let request = self
            .client()?
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json");
        self.send(&url, request, bearer)
    }
}
