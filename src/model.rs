//! The cross-referenced transcript produced by [`build`](crate::transcript::build).

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Identity and demographic fields of the student, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StudentInfo(serde_json::Map<String, serde_json::Value>);

impl StudentInfo {
    /// Wraps a raw `student` value. Anything but a JSON object yields an empty bag.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Object(fields)) => Self(fields.clone()),
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
}

/// A recorded mark for one assignment.
///
/// `score` is the mark as the service reports it, which may be numeric or a
/// letter, and may be absent even when the record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub id: Option<String>,
    pub assignment_id: String,
    pub score: Option<String>,
    pub percent: Option<f64>,
    pub letter_grade: Option<String>,
    pub collected: bool,
    pub late: bool,
    pub missing: bool,
    pub exempt: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportingTerm {
    pub id: String,
    pub title: Option<String>,
    pub abbreviation: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort_order: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teacher {
    pub id: String,
    /// Display name: the service's `name`, or first and last name joined.
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub school_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalGrade {
    pub id: String,
    pub section_id: Option<String>,
    pub reporting_term_id: Option<String>,
    pub grade: Option<String>,
    pub percent: Option<f64>,
    pub comment: Option<String>,
    pub date_stored: Option<NaiveDate>,
}

/// An assignment joined with its category and score.
///
/// `category` and `score` are `None` when the response holds no matching
/// record. A `None` score means nothing was recorded, not a zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub id: String,
    pub section_id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub points_possible: Option<f64>,
    pub weight: Option<f64>,
    pub include_in_final_grades: bool,
    pub category: Option<Category>,
    pub score: Option<Score>,
}

/// A course section with everything that references it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub course_title: Option<String>,
    pub course_code: Option<String>,
    pub expression: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<Teacher>,
    pub assignments: Vec<Assignment>,
    /// Final grades keyed by reporting term id. Grades without a term id are
    /// filed under the empty key.
    pub final_grades: BTreeMap<String, Vec<FinalGrade>>,
    pub reporting_terms: Vec<ReportingTerm>,
}

impl Section {
    /// Grades stored for `reporting_term_id`, in response order.
    pub fn grades_for_term(&self, reporting_term_id: &str) -> &[FinalGrade] {
        self.final_grades
            .get(reporting_term_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A student's full transcript.
///
/// Only [`build`](crate::transcript::build) creates one, and nothing mutates
/// it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    information: StudentInfo,
    sections: Vec<Section>,
    orphaned_assignments: Vec<Assignment>,
}

impl Student {
    pub(crate) fn new(
        information: StudentInfo,
        sections: Vec<Section>,
        orphaned_assignments: Vec<Assignment>,
    ) -> Self {
        Self {
            information,
            sections,
            orphaned_assignments,
        }
    }

    pub fn information(&self) -> &StudentInfo {
        &self.information
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Assignments whose section reference matched no section in the response.
    pub fn orphaned_assignments(&self) -> &[Assignment] {
        &self.orphaned_assignments
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Number of assignments filed under a section.
    pub fn assignment_count(&self) -> usize {
        self.sections.iter().map(|s| s.assignments.len()).sum()
    }
}
