//! Identifier lookups over raw collections.
//!
//! Each collection is indexed once per build. Records are validated and
//! converted into their typed form here, so joins never see a record without
//! an identifier.

use std::collections::HashMap;

use tracing::debug;

use crate::error::StructuralError;
use crate::model::{Category, FinalGrade, ReportingTerm, Score, Teacher};
use crate::raw::{RawCategory, RawFinalGrade, RawReportingTerm, RawScore, RawTeacher};

/// A raw record that can be keyed into a [`RecordIndex`].
pub trait IndexRecord {
    /// Response key of the collection, used in error reports.
    const COLLECTION: &'static str;

    type Output;

    /// The value the index is looked up by.
    fn key(&self) -> Option<&str>;

    /// The record's own identifier. Only a record without one is malformed;
    /// a record with an identifier but no lookup key is skipped.
    fn own_id(&self) -> Option<&str> {
        self.key()
    }

    fn to_record(&self, key: String) -> Self::Output;
}

/// Identifier to record map.
///
/// A later record with the same identifier replaces the earlier one but keeps
/// the earlier one's position, so iteration follows first-seen order.
#[derive(Debug, Clone)]
pub struct RecordIndex<T> {
    positions: HashMap<String, usize>,
    records: Vec<T>,
}

impl<T> Default for RecordIndex<T> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            records: Vec::new(),
        }
    }
}

impl<T> RecordIndex<T> {
    pub fn build<R>(raw: &[R]) -> Result<Self, StructuralError>
    where
        R: IndexRecord<Output = T>,
    {
        let mut index = Self::default();
        for (position, record) in raw.iter().enumerate() {
            require_id(R::COLLECTION, position, record.own_id())?;
            let Some(key) = reference(record.key()) else {
                debug!(collection = R::COLLECTION, position, "Record has no lookup key, skipped");
                continue;
            };
            let key = key.to_string();
            let value = record.to_record(key.clone());
            index.insert(key, value);
        }
        Ok(index)
    }

    fn insert(&mut self, key: String, value: T) {
        match self.positions.get(&key) {
            Some(&slot) => self.records[slot] = value,
            None => {
                self.positions.insert(key, self.records.len());
                self.records.push(value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&slot| &self.records[slot])
    }

    /// Like [`get`](Self::get), also returning the record's first-seen slot.
    pub fn locate(&self, key: &str) -> Option<(usize, &T)> {
        self.positions
            .get(key)
            .map(|&slot| (slot, &self.records[slot]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns the trimmed identifier, or a [`StructuralError`] naming the record.
pub fn require_id(
    collection: &'static str,
    position: usize,
    id: Option<&str>,
) -> Result<String, StructuralError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(StructuralError::MissingIdentifier {
            collection,
            position,
        }),
    }
}

/// Trims a reference field, treating blank as absent.
pub(crate) fn reference(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

impl IndexRecord for RawCategory {
    const COLLECTION: &'static str = "assignmentCategories";
    type Output = Category;

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self, key: String) -> Category {
        Category {
            id: key,
            name: self.name.clone(),
            abbreviation: self.abbreviation.clone(),
            description: self.description.clone(),
        }
    }
}

// Scores are looked up by the assignment they belong to.
impl IndexRecord for RawScore {
    const COLLECTION: &'static str = "assignmentScores";
    type Output = Score;

    fn key(&self) -> Option<&str> {
        self.assignment_id.as_deref()
    }

    fn own_id(&self) -> Option<&str> {
        reference(self.id.as_deref()).or(self.assignment_id.as_deref())
    }

    fn to_record(&self, key: String) -> Score {
        Score {
            id: self.id.clone(),
            assignment_id: key,
            score: self.score.clone(),
            percent: self.percent,
            letter_grade: self.letter_grade.clone(),
            collected: self.collected,
            late: self.late,
            missing: self.missing,
            exempt: self.exempt,
            comment: self.comment.clone(),
        }
    }
}

impl IndexRecord for RawFinalGrade {
    const COLLECTION: &'static str = "finalGrades";
    type Output = FinalGrade;

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self, key: String) -> FinalGrade {
        FinalGrade {
            id: key,
            section_id: reference(self.section_id.as_deref()).map(str::to_string),
            reporting_term_id: reference(self.reporting_term_id.as_deref()).map(str::to_string),
            grade: self.grade.clone(),
            percent: self.percent,
            comment: self.comment.clone(),
            date_stored: self.date_stored,
        }
    }
}

impl IndexRecord for RawReportingTerm {
    const COLLECTION: &'static str = "reportingTerms";
    type Output = ReportingTerm;

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self, key: String) -> ReportingTerm {
        ReportingTerm {
            id: key,
            title: self.title.clone(),
            abbreviation: self.abbreviation.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            sort_order: self.sort_order,
        }
    }
}

impl IndexRecord for RawTeacher {
    const COLLECTION: &'static str = "teachers";
    type Output = Teacher;

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self, key: String) -> Teacher {
        let name = match reference(self.name.as_deref()) {
            Some(name) => name.to_string(),
            None => [self.first_name.as_deref(), self.last_name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };

        Teacher {
            id: key,
            name,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            school_phone: self.school_phone.clone(),
        }
    }
}
