//! PowerSchool public portal client.
//!
//! [`PortalConfig`] reads the server address and service-account credentials
//! from the environment. [`PowerSchoolClient`] implements
//! [`TranscriptApi`](crate::services::transcript_api::TranscriptApi) against
//! the portal's JSON endpoint.

mod client;
mod config;

pub use client::PowerSchoolClient;
pub use config::PortalConfig;
