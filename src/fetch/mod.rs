mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::Result;
use serde::Serialize;

/// GETs `url` and returns the body, failing on a non-success status.
pub async fn fetch_bytes<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse()?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// POSTs `body` as JSON to `url` and returns the response body.
pub async fn post_json<C: HttpClient, B: Serialize + ?Sized>(
    client: &C,
    url: &str,
    body: &B,
) -> Result<Vec<u8>> {
    let mut req = reqwest::Request::new(
        reqwest::Method::POST,
        url.parse()?,
    );
    req.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("server returned status {status}: {text}");
    }
    Ok(resp.bytes().await?.to_vec())
}
