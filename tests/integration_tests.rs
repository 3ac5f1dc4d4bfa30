use student_transcript::parser::parse_response;
use student_transcript::transcript::build;
use student_transcript::StructuralError;

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/student_data.json");
    let raw = parse_response(bytes).expect("Failed to parse response");
    let student = build(&raw).expect("Failed to build transcript");

    assert_eq!(student.sections().len(), 3);
    assert_eq!(student.assignment_count(), 4);
    assert!(student.orphaned_assignments().is_empty());
    assert_eq!(
        student.information().get("lastName"),
        Some(&serde_json::json!("Lee"))
    );

    let algebra = student.section("201").unwrap();
    assert_eq!(algebra.teacher.as_ref().unwrap().name, "Jane Doe");
    let names: Vec<_> = algebra
        .assignments
        .iter()
        .map(|a| a.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["Worksheet 1.1", "Unit 1 Test", "Extra Credit"]);

    // Zero score is recorded, not missing
    let test = &algebra.assignments[1];
    assert_eq!(test.score.as_ref().unwrap().score.as_deref(), Some("0"));
    assert!(test.score.as_ref().unwrap().missing);

    // Unknown category and no score
    let extra = &algebra.assignments[2];
    assert!(extra.category.is_none());
    assert!(extra.score.is_none());
    assert!(!extra.include_in_final_grades);

    assert_eq!(algebra.grades_for_term("61")[0].grade.as_deref(), Some("A-"));
    let terms: Vec<_> = algebra
        .reporting_terms
        .iter()
        .map(|t| t.abbreviation.as_deref().unwrap())
        .collect();
    assert_eq!(terms, ["Q1"]);

    let biology = student.section("202").unwrap();
    assert_eq!(biology.final_grades.len(), 2);
    assert_eq!(biology.reporting_terms.len(), 2);
    assert_eq!(
        biology.assignments[0].category.as_ref().unwrap().name.as_deref(),
        Some("Tests")
    );

    let study_hall = student.section("203").unwrap();
    assert!(study_hall.teacher.is_none());
    assert!(study_hall.assignments.is_empty());
    assert!(study_hall.final_grades.is_empty());
}

#[test]
fn test_pipeline_is_idempotent() {
    let bytes = include_bytes!("fixtures/student_data.json");
    let raw = parse_response(bytes).unwrap();

    let first = serde_json::to_value(build(&raw).unwrap()).unwrap();
    let second = serde_json::to_value(build(&raw).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_response_without_sections_fails() {
    let body = br#"{"studentDataVOs": {
        "student": {"id": 1},
        "assignmentCategories": [], "assignmentScores": [], "finalGrades": [],
        "reportingTerms": [], "teachers": [], "assignments": []
    }}"#;
    let raw = parse_response(body).unwrap();

    let err = build(&raw).unwrap_err();

    assert_eq!(
        err,
        StructuralError::MissingCollection {
            collection: "sections"
        }
    );
}
