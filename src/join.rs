//! Joins raw assignments with their category and score.

use tracing::debug;

use crate::error::StructuralError;
use crate::index::{RecordIndex, reference, require_id};
use crate::model::{Assignment, Category, Score};
use crate::raw::RawAssignment;

/// Enriches every raw assignment, keeping input order and count.
///
/// A category or score that is not in its index is left as `None`.
///
/// # Errors
///
/// Returns [`StructuralError::MissingIdentifier`] if an assignment has no id.
pub fn join_assignments(
    raw: &[RawAssignment],
    categories: &RecordIndex<Category>,
    scores: &RecordIndex<Score>,
) -> Result<Vec<Assignment>, StructuralError> {
    raw.iter()
        .enumerate()
        .map(|(position, assignment)| {
            let id = require_id("assignments", position, assignment.id.as_deref())?;

            let category_id = reference(assignment.category_id.as_deref());
            let category = category_id.and_then(|key| categories.get(key)).cloned();
            if category.is_none() {
                debug!(assignment_id = %id, category_id, "Assignment category not resolved");
            }

            let score = scores.get(&id).cloned();
            if score.is_none() {
                debug!(assignment_id = %id, "Assignment score not resolved");
            }

            Ok(Assignment {
                section_id: reference(assignment.section_id.as_deref()).map(str::to_string),
                name: assignment.name.clone(),
                abbreviation: assignment.abbreviation.clone(),
                description: assignment.description.clone(),
                due_date: assignment.due_date,
                points_possible: assignment.points_possible,
                weight: assignment.weight,
                include_in_final_grades: assignment.include_in_final_grades,
                category,
                score,
                id,
            })
        })
        .collect()
}
