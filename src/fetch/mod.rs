// src/fetch/mod.rs
use anyhow::{bail, Context, Result};
use reqwest::Client;
use url::Url;

/// Fetch the raw CSV text behind `url_str`.
///
/// One attempt only: the caller refreshes at most once per session, so there
/// is no retry or backoff here. Failures carry enough context for the caller
/// to surface a single user-visible message.
pub async fn fetch_text(client: &Client, url_str: &str) -> Result<String> {
    let url = Url::parse(url_str).with_context(|| format!("parsing source URL {}", url_str))?;

    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?;

    if !resp.status().is_success() {
        bail!("HTTP error from {}: {}", url, resp.status());
    }

    resp.text()
        .await
        .with_context(|| format!("reading body from {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_request() {
        let client = Client::new();
        let err = fetch_text(&client, "not a url").await.unwrap_err();
        assert!(err.to_string().contains("parsing source URL"));
    }
}
