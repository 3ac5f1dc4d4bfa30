//! Trait for fetching a student's raw record set from a portal.

use anyhow::Result;
use student_transcript::raw::RawRecordSet;
use student_transcript::session::Session;

/// Abstraction over a student-information service (e.g., PowerSchool).
#[async_trait::async_trait]
pub trait TranscriptApi {
    /// Fetches everything the service holds for the session's student.
    async fn fetch_transcript(&self, session: &Session) -> Result<RawRecordSet>;
}
