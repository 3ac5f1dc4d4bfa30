//! Errors raised while turning a raw response into a [`Student`](crate::model::Student).

use thiserror::Error;

/// A defect in the shape of the raw response itself.
///
/// Dangling cross-references are not errors; they leave the affected field
/// empty. Only a record that lacks its own identifier, or a required
/// collection that is missing altogether, aborts the build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A required top-level collection was absent from the response.
    #[error("required collection `{collection}` is missing from the response")]
    MissingCollection { collection: &'static str },

    /// A record in `collection` at `position` has no identifier.
    #[error("record {position} of `{collection}` has no identifier")]
    MissingIdentifier {
        collection: &'static str,
        position: usize,
    },
}
