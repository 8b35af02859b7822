use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub fn create_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36")
        .timeout(Duration::from_secs(25))
        .build()?;

    Ok(client)
}

/// GET a page and return its body. Any non-success status is an error;
/// there is no retry, a failed fetch aborts the run.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed for {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP error {status}: {url}");
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))
}
