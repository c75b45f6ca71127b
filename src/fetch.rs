//! Remote theme retrieval.
//!
//! A single HTTP GET with a hard timeout and no retry: a failed fetch
//! aborts that one conversion and nothing else.

use std::time::Duration;

use url::Url;

use crate::error::FetchError;

/// Fetch a URL and return the response body bytes.
pub async fn fetch_bytes(url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    tracing::debug!("GET {url}");
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    Ok(response.bytes().await?.to_vec())
}
