//! HTTP retrieval of the remote dataset.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use bytes::Bytes;
use tracing::debug;

use crate::error::{DashboardError, Result};

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Any transport failure or non-success status becomes
/// [`DashboardError::DataUnavailable`].
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| DashboardError::unavailable(url, format!("invalid URL: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| DashboardError::unavailable(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DashboardError::unavailable(
            url,
            format!("server responded with status {status}"),
        ));
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| DashboardError::unavailable(url, e))?;
    debug!(bytes = body.len(), "Dataset body received");
    Ok(body)
}

/// Canned-response transport for tests.
#[cfg(test)]
pub(crate) struct StubClient {
    pub status: u16,
    pub body: &'static str,
}

#[cfg(test)]
#[async_trait::async_trait]
impl HttpClient for StubClient {
    async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let resp = http::Response::builder()
            .status(self.status)
            .body(self.body)
            .expect("valid canned response");
        Ok(reqwest::Response::from(resp))
    }
}
