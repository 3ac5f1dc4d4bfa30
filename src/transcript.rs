//! Builds a [`Student`] from a raw response.

use tracing::debug;

use crate::assemble::{Assembled, assemble_sections};
use crate::error::StructuralError;
use crate::index::RecordIndex;
use crate::join::join_assignments;
use crate::model::{Student, StudentInfo};
use crate::raw::RawRecordSet;

/// Joins every collection of `raw` into one [`Student`].
///
/// Indexes are built first, then assignments are joined with categories and
/// scores, then sections collect assignments, grades, terms and teachers.
/// `raw` is only read, so the same record set always builds an equal student.
///
/// # Errors
///
/// Returns a [`StructuralError`] if a required collection is absent or a
/// record lacks its own identifier. No partial student is produced.
#[tracing::instrument(
    skip_all,
    fields(sections = tracing::field::Empty, assignments = tracing::field::Empty)
)]
pub fn build(raw: &RawRecordSet) -> Result<Student, StructuralError> {
    let categories = required("assignmentCategories", &raw.assignment_categories)?;
    let scores = required("assignmentScores", &raw.assignment_scores)?;
    let final_grades = required("finalGrades", &raw.final_grades)?;
    let reporting_terms = required("reportingTerms", &raw.reporting_terms)?;
    let teachers = required("teachers", &raw.teachers)?;
    let assignments = required("assignments", &raw.assignments)?;
    let sections = required("sections", &raw.sections)?;

    let categories = RecordIndex::build(categories)?;
    let scores = RecordIndex::build(scores)?;
    let final_grades = RecordIndex::build(final_grades)?;
    let reporting_terms = RecordIndex::build(reporting_terms)?;
    let teachers = RecordIndex::build(teachers)?;
    debug!(
        categories = categories.len(),
        scores = scores.len(),
        final_grades = final_grades.len(),
        reporting_terms = reporting_terms.len(),
        teachers = teachers.len(),
        "Indexes built"
    );

    let assignments = join_assignments(assignments, &categories, &scores)?;

    let Assembled {
        sections,
        orphaned_assignments,
    } = assemble_sections(
        sections,
        assignments,
        &final_grades,
        &reporting_terms,
        &teachers,
    )?;

    let span = tracing::Span::current();
    span.record("sections", sections.len());
    span.record(
        "assignments",
        sections.iter().map(|s| s.assignments.len()).sum::<usize>(),
    );

    Ok(Student::new(
        StudentInfo::from_value(raw.student.as_ref()),
        sections,
        orphaned_assignments,
    ))
}

fn required<'a, T>(
    collection: &'static str,
    records: &'a Option<Vec<T>>,
) -> Result<&'a [T], StructuralError> {
    records
        .as_deref()
        .ok_or(StructuralError::MissingCollection { collection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_set(value: serde_json::Value) -> RawRecordSet {
        serde_json::from_value(value).unwrap()
    }

    fn scenario() -> RawRecordSet {
        record_set(json!({
            "student": {"id": 1, "firstName": "Sam", "lastName": "Lee"},
            "assignmentCategories": [],
            "assignmentScores": [],
            "finalGrades": [],
            "reportingTerms": [{"id": "RT1"}],
            "teachers": [{"id": "T1", "name": "Jane Doe"}],
            "assignments": [{"id": "A1", "sectionId": "S1", "categoryId": "C1"}],
            "sections": [{"id": "S1", "teacherId": "T1"}]
        }))
    }

    fn full() -> RawRecordSet {
        record_set(json!({
            "student": {"id": 1},
            "assignmentCategories": [
                {"id": "C1", "name": "Homework"},
                {"id": "C2", "name": "Tests"}
            ],
            "assignmentScores": [
                {"id": "X1", "assignmentId": "A1", "score": "9", "percent": 90},
                {"id": "X2", "assignmentId": "A3", "score": "0", "percent": 0}
            ],
            "finalGrades": [
                {"id": "G1", "sectionid": "S1", "reportingTermId": "Q1", "grade": "A-"},
                {"id": "G2", "sectionid": "S2", "reportingTermId": "Q1", "grade": "B"}
            ],
            "reportingTerms": [{"id": "Q1", "title": "Quarter 1"}],
            "teachers": [
                {"id": "T1", "firstName": "Jane", "lastName": "Doe"},
                {"id": "T2", "firstName": "John", "lastName": "Roe"}
            ],
            "assignments": [
                {"id": "A1", "sectionid": "S1", "categoryId": "C1"},
                {"id": "A2", "sectionid": "S2", "categoryId": "C2"},
                {"id": "A3", "sectionid": "S1", "categoryId": "C2"},
                {"id": "A4", "sectionid": "S2", "categoryId": "C9"}
            ],
            "sections": [
                {"id": "S1", "schoolCourseTitle": "Algebra", "teacherID": "T1"},
                {"id": "S2", "schoolCourseTitle": "Biology", "teacherID": "T2"}
            ]
        }))
    }

    #[test]
    fn test_scenario_with_unresolved_references() {
        let student = build(&scenario()).unwrap();

        assert_eq!(student.sections().len(), 1);
        let s1 = student.section("S1").unwrap();
        assert_eq!(s1.teacher.as_ref().unwrap().name, "Jane Doe");
        assert_eq!(s1.assignments.len(), 1);

        let a1 = &s1.assignments[0];
        assert_eq!(a1.id, "A1");
        assert!(a1.category.is_none());
        assert!(a1.score.is_none());
        assert!(s1.final_grades.is_empty());
        assert!(s1.reporting_terms.is_empty());

        assert_eq!(student.information().get("firstName"), Some(&json!("Sam")));
    }

    #[test]
    fn test_counts_match_raw_collections() {
        let raw = full();
        let student = build(&raw).unwrap();

        assert_eq!(student.sections().len(), raw.sections.as_ref().unwrap().len());
        assert_eq!(
            student.assignment_count(),
            raw.assignments.as_ref().unwrap().len()
        );
        assert!(student.orphaned_assignments().is_empty());
    }

    #[test]
    fn test_joins_everything_in_order() {
        let student = build(&full()).unwrap();

        let s1 = &student.sections()[0];
        assert_eq!(s1.course_title.as_deref(), Some("Algebra"));
        let ids: Vec<_> = s1.assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["A1", "A3"]);
        assert_eq!(s1.assignments[0].score.as_ref().unwrap().percent, Some(90.0));
        assert_eq!(
            s1.assignments[1].category.as_ref().unwrap().name.as_deref(),
            Some("Tests")
        );
        assert_eq!(s1.grades_for_term("Q1")[0].grade.as_deref(), Some("A-"));
        assert_eq!(s1.reporting_terms[0].title.as_deref(), Some("Quarter 1"));

        let s2 = &student.sections()[1];
        assert_eq!(s2.teacher.as_ref().unwrap().name, "John Roe");
        assert!(s2.assignments[1].category.is_none());
    }

    #[test]
    fn test_score_without_assignment_reference_is_ignored() {
        let raw = record_set(json!({
            "assignmentCategories": [],
            "assignmentScores": [{"id": "X1", "score": "9"}],
            "finalGrades": [],
            "reportingTerms": [],
            "teachers": [],
            "assignments": [{"id": "A1", "sectionId": "S1"}],
            "sections": [{"id": "S1"}]
        }));

        let student = build(&raw).unwrap();

        let a1 = &student.section("S1").unwrap().assignments[0];
        assert_eq!(a1.id, "A1");
        assert!(a1.score.is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let raw = full();
        assert_eq!(build(&raw).unwrap(), build(&raw).unwrap());
    }

    #[test]
    fn test_missing_sections_is_structural() {
        let mut raw = full();
        raw.sections = None;

        let err = build(&raw).unwrap_err();

        assert_eq!(
            err,
            StructuralError::MissingCollection {
                collection: "sections"
            }
        );
    }

    #[test]
    fn test_missing_key_in_json_is_structural() {
        let raw = record_set(json!({
            "assignmentCategories": [],
            "assignmentScores": [],
            "finalGrades": [],
            "reportingTerms": [],
            "assignments": [],
            "sections": []
        }));

        let err = build(&raw).unwrap_err();

        assert_eq!(
            err,
            StructuralError::MissingCollection {
                collection: "teachers"
            }
        );
    }

    #[test]
    fn test_empty_collections_build_empty_student() {
        let raw = record_set(json!({
            "assignmentCategories": [],
            "assignmentScores": [],
            "finalGrades": [],
            "reportingTerms": [],
            "teachers": [],
            "assignments": [],
            "sections": []
        }));

        let student = build(&raw).unwrap();

        assert!(student.sections().is_empty());
        assert!(student.information().is_empty());
    }

    #[test]
    fn test_duplicate_category_uses_later_record() {
        let mut raw = full();
        raw.assignment_categories
            .as_mut()
            .unwrap()
            .push(serde_json::from_value(json!({"id": "C1", "name": "Classwork"})).unwrap());

        let student = build(&raw).unwrap();

        let a1 = &student.section("S1").unwrap().assignments[0];
        assert_eq!(
            a1.category.as_ref().unwrap().name.as_deref(),
            Some("Classwork")
        );
    }

    #[test]
    fn test_missing_record_id_aborts_build() {
        let mut raw = full();
        raw.teachers
            .as_mut()
            .unwrap()
            .push(serde_json::from_value(json!({"firstName": "Nobody"})).unwrap());

        let err = build(&raw).unwrap_err();

        assert_eq!(
            err,
            StructuralError::MissingIdentifier {
                collection: "teachers",
                position: 2,
            }
        );
    }

    #[test]
    fn test_build_from_many_threads() {
        let raw = full();
        let expected = build(&raw).unwrap();
        let raw = &raw;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(move || build(raw))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }
}
