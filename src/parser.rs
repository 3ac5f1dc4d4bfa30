//! JSON parser for `getStudentData` responses.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw::RawRecordSet;

/// Decodes a response body into a [`RawRecordSet`].
///
/// Accepts the full service envelope (`{"return": {"studentDataVOs": ...}}`),
/// a bare `{"studentDataVOs": ...}`, or the record set itself. When
/// `studentDataVOs` holds several students, the first one is used.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON, or if a collection has the
/// wrong shape. Missing collections are not checked here.
pub fn parse_response(bytes: &[u8]) -> Result<RawRecordSet> {
    let mut body: Value = serde_json::from_slice(bytes).context("response is not valid JSON")?;

    if let Some(inner) = body.get_mut("return").map(Value::take) {
        body = inner;
    }
    if let Some(data) = body.get_mut("studentDataVOs").map(Value::take) {
        body = match data {
            Value::Array(mut students) if !students.is_empty() => students.swap_remove(0),
            Value::Array(_) => anyhow::bail!("response holds no student data"),
            other => other,
        };
    }

    serde_json::from_value(body).context("failed to decode student data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_envelope() {
        let body = br#"{"return": {"studentDataVOs": {"student": {"id": 7}, "sections": []}}}"#;
        let raw = parse_response(body).unwrap();
        assert_eq!(raw.student.unwrap()["id"], 7);
        assert_eq!(raw.sections.map(|s| s.len()), Some(0));
        assert!(raw.teachers.is_none());
    }

    #[test]
    fn test_parse_first_of_many_students() {
        let body = br#"{"studentDataVOs": [{"student": {"id": 1}}, {"student": {"id": 2}}]}"#;
        let raw = parse_response(body).unwrap();
        assert_eq!(raw.student.unwrap()["id"], 1);
    }

    #[test]
    fn test_parse_bare_record_set() {
        let body = br#"{"teachers": [{"id": "T1", "name": "Jane Doe"}]}"#;
        let raw = parse_response(body).unwrap();
        assert_eq!(raw.teachers.unwrap()[0].name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_empty_student_list() {
        let body = br#"{"studentDataVOs": []}"#;
        assert!(parse_response(body).is_err());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let invalid_bytes = vec![0xFF, 0xFE, 0x00, 0x01];
        assert!(parse_response(&invalid_bytes).is_err());
    }

    #[test]
    fn test_parse_wrong_collection_shape() {
        let body = br#"{"sections": "S1"}"#;
        assert!(parse_response(body).is_err());
    }
}
