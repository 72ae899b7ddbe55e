//! Fetch collaborator seam

use crate::{ClassRecord, MimError, Result};

/// Supplies the record of a single class on demand
///
/// Implementations return `MimError::SourceUnavailable` when the class
/// cannot be located at all and `MimError::ParseFailure` when it was found
/// but is malformed. Returned records must already be validated.
pub trait ClassSource {
    fn fetch(&self, class_name: &str) -> Result<ClassRecord>;
}

/// Source for snapshot-only models: every fetch fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl ClassSource for NoSource {
    fn fetch(&self, class_name: &str) -> Result<ClassRecord> {
        Err(MimError::source_unavailable(
            class_name,
            "class is not in the snapshot and no fetch source is configured",
        ))
    }
}
