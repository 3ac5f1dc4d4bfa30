//! Assembles sections from their raw records and everything that points at them.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::StructuralError;
use crate::index::{RecordIndex, reference, require_id};
use crate::model::{Assignment, FinalGrade, ReportingTerm, Section, Teacher};
use crate::raw::RawSection;

/// Sections in response order, plus the assignments no section claimed.
#[derive(Debug)]
pub struct Assembled {
    pub sections: Vec<Section>,
    pub orphaned_assignments: Vec<Assignment>,
}

/// Builds one [`Section`] per raw section.
///
/// Assignments and final grades are filed under the section whose id they
/// reference. If two raw sections share an id, the first one receives them.
/// Unknown teacher or reporting-term references leave those fields empty.
///
/// # Errors
///
/// Returns [`StructuralError::MissingIdentifier`] if a section has no id.
pub fn assemble_sections(
    raw: &[RawSection],
    assignments: Vec<Assignment>,
    final_grades: &RecordIndex<FinalGrade>,
    reporting_terms: &RecordIndex<ReportingTerm>,
    teachers: &RecordIndex<Teacher>,
) -> Result<Assembled, StructuralError> {
    let section_ids = raw
        .iter()
        .enumerate()
        .map(|(position, section)| require_id("sections", position, section.id.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;
    let known: HashSet<&str> = section_ids.iter().map(String::as_str).collect();

    let mut assignments_by_section: HashMap<String, Vec<Assignment>> = HashMap::new();
    let mut orphaned_assignments = Vec::new();
    for assignment in assignments {
        let section_id = assignment
            .section_id
            .as_deref()
            .filter(|id| known.contains(id))
            .map(str::to_string);
        match section_id {
            Some(section_id) => assignments_by_section
                .entry(section_id)
                .or_default()
                .push(assignment),
            None => orphaned_assignments.push(assignment),
        }
    }

    let mut grades_by_section: HashMap<&str, BTreeMap<String, Vec<FinalGrade>>> =
        HashMap::new();
    for grade in final_grades.iter() {
        match grade.section_id.as_deref() {
            Some(section_id) if known.contains(section_id) => grades_by_section
                .entry(section_id)
                .or_default()
                .entry(grade.reporting_term_id.clone().unwrap_or_default())
                .or_default()
                .push(grade.clone()),
            section_id => {
                debug!(final_grade_id = %grade.id, section_id, "Final grade section not resolved");
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());
    let mut sections = Vec::with_capacity(raw.len());
    for (section, id) in raw.iter().zip(section_ids.iter()) {
        if !seen.insert(id.as_str()) {
            warn!(section_id = %id, "Duplicate section id, later section left empty");
        }
        let assignments = assignments_by_section.remove(id).unwrap_or_default();
        let final_grades = grades_by_section
            .remove(id.as_str())
            .unwrap_or_default();

        let teacher_id = reference(section.teacher_id.as_deref());
        let teacher = teacher_id.and_then(|key| teachers.get(key)).cloned();
        if teacher.is_none() {
            debug!(section_id = %id, teacher_id, "Section teacher not resolved");
        }

        let term_id = reference(section.term_id.as_deref());
        let section_terms = resolve_terms(id, &final_grades, term_id, reporting_terms);

        sections.push(Section {
            id: id.clone(),
            course_title: section.school_course_title.clone(),
            course_code: section.course_code.clone(),
            expression: section.expression.clone(),
            room: section.room_name.clone(),
            teacher,
            assignments,
            final_grades,
            reporting_terms: section_terms,
        });
    }

    if !orphaned_assignments.is_empty() {
        warn!(
            count = orphaned_assignments.len(),
            "Assignments reference no known section"
        );
    }

    Ok(Assembled {
        sections,
        orphaned_assignments,
    })
}

/// Terms referenced by the section's grade groups or by its own term id,
/// in `reportingTerms` response order.
fn resolve_terms(
    section_id: &str,
    final_grades: &BTreeMap<String, Vec<FinalGrade>>,
    term_id: Option<&str>,
    reporting_terms: &RecordIndex<ReportingTerm>,
) -> Vec<ReportingTerm> {
    let mut found: Vec<(usize, &ReportingTerm)> = Vec::with_capacity(final_grades.len() + 1);
    for key in final_grades.keys().filter(|key| !key.is_empty()) {
        match reporting_terms.locate(key) {
            Some(entry) => found.push(entry),
            None => debug!(section_id, reporting_term_id = %key, "Reporting term not resolved"),
        }
    }
    if let Some(entry) = term_id.and_then(|key| reporting_terms.locate(key)) {
        found.push(entry);
    }

    found.sort_unstable_by_key(|(slot, _)| *slot);
    found.dedup_by_key(|(slot, _)| *slot);
    found.into_iter().map(|(_, term)| term.clone()).collect()
}
