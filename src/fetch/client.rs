use async_trait::async_trait;
use reqwest::{Request, Response};

/// The transport seam for talking to the portal. Wrappers such as
/// [`BasicAuth`](super::auth::BasicAuth) decorate an inner client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
