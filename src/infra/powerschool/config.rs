use anyhow::{Context, Result};

/// Where the portal lives and how to authenticate to its JSON service.
///
/// Read from `POWERSCHOOL_URL`, `POWERSCHOOL_API_USER` and
/// `POWERSCHOOL_API_PASSWORD`, typically via a `.env` file.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub api_user: String,
    pub api_password: String,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: var("POWERSCHOOL_URL")?,
            api_user: var("POWERSCHOOL_API_USER")?,
            api_password: var("POWERSCHOOL_API_PASSWORD")?,
        })
    }
}

fn var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
