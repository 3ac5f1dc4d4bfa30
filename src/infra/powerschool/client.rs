use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use student_transcript::fetch::auth::BasicAuth;
use student_transcript::fetch::{BasicClient, post_json};
use student_transcript::parser::parse_response;
use student_transcript::raw::RawRecordSet;
use student_transcript::session::{ServerInfo, Session};
use tracing::debug;

use super::PortalConfig;
use crate::services::transcript_api::TranscriptApi;

const SERVICE_PATH: &str = "pearson-rest/services/PublicPortalServiceJSON?response=application/json";

#[derive(Serialize)]
struct StudentDataRequest<'a> {
    #[serde(rename = "userSessionVO")]
    user_session: UserSession<'a>,
    #[serde(rename = "studentIDs")]
    student_ids: &'a serde_json::Value,
    qil: Includes,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSession<'a> {
    user_id: &'a serde_json::Value,
    service_ticket: &'a str,
    server_info: &'a ServerInfo,
    server_current_time: &'a serde_json::Value,
    user_type: &'a serde_json::Value,
}

#[derive(Serialize)]
struct Includes {
    includes: &'static str,
}

impl<'a> StudentDataRequest<'a> {
    fn new(session: &'a Session) -> Self {
        Self {
            user_session: UserSession {
                user_id: &session.user_id,
                service_ticket: &session.service_ticket,
                server_info: &session.server_info,
                server_current_time: &session.server_current_time,
                user_type: &session.user_type,
            },
            student_ids: &session.student_ids,
            qil: Includes { includes: "1" },
        }
    }
}

pub struct PowerSchoolClient {
    endpoint: String,
    http: BasicAuth<BasicClient>,
}

impl PowerSchoolClient {
    pub fn new(config: PortalConfig) -> Result<Self> {
        let http = BasicClient::with_timeouts(Duration::from_secs(10), Duration::from_secs(60))?;

        let http = BasicAuth::new(http, &config.api_user, &config.api_password)
            .context("portal credentials are not a valid header value")?;

        Ok(Self {
            endpoint: endpoint(&config.base_url),
            http,
        })
    }
}

fn endpoint(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), SERVICE_PATH)
}

#[async_trait]
impl TranscriptApi for PowerSchoolClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn fetch_transcript(&self, session: &Session) -> Result<RawRecordSet> {
        let request = StudentDataRequest::new(session);

        let bytes = post_json(&self.http, &self.endpoint, &request)
            .await
            .context("getStudentData request failed")?;
        debug!(bytes = bytes.len(), "Student data received, parsing");

        parse_response(&bytes)
    }
}
