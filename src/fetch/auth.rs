use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};

/// An [`HttpClient`] wrapper that adds HTTP basic credentials to every request.
///
/// The portal's JSON service sits behind a fixed service account, separate
/// from the student's own session ticket which travels in the request body.
pub struct BasicAuth<C> {
    pub inner: C,
    header: HeaderValue,
}

impl<C> BasicAuth<C> {
    /// Encodes `username:password` once, up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials contain bytes not allowed in a header.
    pub fn new(inner: C, username: &str, password: &str) -> Result<Self, InvalidHeaderValue> {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        let mut header = HeaderValue::from_str(&format!("Basic {encoded}"))?;
        header.set_sensitive(true);
        Ok(Self { inner, header })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for BasicAuth<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.header.clone());
        self.inner.execute(req).await
    }
}
