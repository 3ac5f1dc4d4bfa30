//! Output formatting and persistence for built transcripts.
//!
//! Supports pretty-printing, JSON logging, a per-section summary, and writing
//! the transcript to a JSON file.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::model::Student;
use std::fs;
use std::path::Path;

/// Logs the transcript using Rust's debug pretty-print format.
pub fn print_pretty(student: &Student) {
    debug!("{:#?}", student);
}

/// Logs the transcript as pretty-printed JSON.
pub fn print_json(student: &Student) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(student)?);
    Ok(())
}

/// Logs one line per section: course, teacher, assignment and grade counts.
pub fn print_summary(student: &Student) {
    for section in student.sections() {
        let teacher = section.teacher.as_ref().map(|t| t.name.as_str()).unwrap_or("");
        let scored = section
            .assignments
            .iter()
            .filter(|a| a.score.is_some())
            .count();

        info!(
            section_id = %section.id,
            course = section.course_title.as_deref().unwrap_or(""),
            teacher,
            assignments = section.assignments.len(),
            scored,
            terms_graded = section.final_grades.len(),
            "Section"
        );
    }

    info!(
        sections = student.sections().len(),
        assignments = student.assignment_count(),
        orphaned = student.orphaned_assignments().len(),
        "Transcript summary"
    );
}

/// Writes the transcript to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json(path: &str, student: &Student) -> Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let body = serde_json::to_vec_pretty(student)?;
    fs::write(path, body).with_context(|| format!("failed to write {path}"))?;
    debug!(path, "Transcript written");

    Ok(())
}
