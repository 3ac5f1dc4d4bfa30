//! Flat, as-received collections from the student-information service.
//!
//! Every field is optional here: the service is loosely typed, mixes strings
//! and numbers for the same field, and sends a lone object where a list of
//! one is expected. Identifier checks happen later, when the collections are
//! indexed.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// The unprocessed response for one student.
///
/// A collection field is `None` only when its key was absent from the
/// response. An explicit `null` deserializes to an empty collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecordSet {
    #[serde(default, alias = "studentInformation")]
    pub student: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub assignment_categories: Option<Vec<RawCategory>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub assignment_scores: Option<Vec<RawScore>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub final_grades: Option<Vec<RawFinalGrade>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub reporting_terms: Option<Vec<RawReportingTerm>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub teachers: Option<Vec<RawTeacher>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub assignments: Option<Vec<RawAssignment>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub sections: Option<Vec<RawSection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScore {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, alias = "assignmentid", alias = "assignmentID", deserialize_with = "text")]
    pub assignment_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub score: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub percent: Option<f64>,
    #[serde(default, deserialize_with = "text")]
    pub letter_grade: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub collected: bool,
    #[serde(default, deserialize_with = "flag")]
    pub late: bool,
    #[serde(default, deserialize_with = "flag")]
    pub missing: bool,
    #[serde(default, deserialize_with = "flag")]
    pub exempt: bool,
    #[serde(default, deserialize_with = "text")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinalGrade {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, alias = "sectionid", alias = "sectionID", deserialize_with = "text")]
    pub section_id: Option<String>,
    #[serde(default, alias = "reportingTermID", alias = "reportingtermid", deserialize_with = "text")]
    pub reporting_term_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub percent: Option<f64>,
    #[serde(default, alias = "commentValue", deserialize_with = "text")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "date")]
    pub date_stored: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReportingTerm {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "number")]
    pub sort_order: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeacher {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub school_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssignment {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, alias = "sectionid", alias = "sectionID", deserialize_with = "text")]
    pub section_id: Option<String>,
    #[serde(default, alias = "categoryid", alias = "categoryID", deserialize_with = "text")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, alias = "pointspossible", deserialize_with = "number")]
    pub points_possible: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub weight: Option<f64>,
    #[serde(default, alias = "includeinfinalgrades", deserialize_with = "flag")]
    pub include_in_final_grades: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(default, deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(default, alias = "courseName", deserialize_with = "text")]
    pub school_course_title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub course_code: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub expression: Option<String>,
    #[serde(default, alias = "room", deserialize_with = "text")]
    pub room_name: Option<String>,
    #[serde(default, alias = "teacherID", alias = "teacherid", deserialize_with = "text")]
    pub teacher_id: Option<String>,
    #[serde(default, alias = "termID", alias = "termid", deserialize_with = "text")]
    pub term_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    // Reached only when the key is present, so `null` means "present but empty".
    Ok(Some(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    }))
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(|value| match value {
        Scalar::Text(s) => s.trim().parse().ok(),
        Scalar::Int(n) => Some(n as f64),
        Scalar::Float(f) => Some(f),
        Scalar::Bool(_) => None,
    }))
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(f)) => f != 0.0,
        Some(Scalar::Text(s)) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        None => false,
    })
}

/// Accepts `YYYY-MM-DD`, an ISO timestamp starting with one, or epoch
/// milliseconds. Anything else becomes `None`.
fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(|value| match value {
        Scalar::Text(s) => s
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()),
        Scalar::Int(ms) => DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive()),
        Scalar::Float(_) | Scalar::Bool(_) => None,
    }))
}
