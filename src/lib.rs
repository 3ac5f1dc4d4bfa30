//! Builds a navigable student transcript from a student-information
//! service's flat `getStudentData` response.
//!
//! [`transcript::build`] is the entry point: it indexes the raw collections,
//! joins assignments with their categories and scores, and files assignments,
//! final grades, reporting terms and teachers under their sections.

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod index;
pub mod join;
pub mod model;
pub mod output;
pub mod parser;
pub mod raw;
pub mod session;
pub mod transcript;

pub use error::StructuralError;
pub use model::Student;
pub use raw::RawRecordSet;
pub use transcript::build;
