//! Per-class metadata files as a fetch source

use crate::meta::parse_class_json;
use mimgen_common::{ClassRecord, ClassSource, MimError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches classes from a directory holding one `<className>.json` per class
///
/// A missing or unreadable file is `SourceUnavailable`; a file that reads
/// but does not decode into a valid class is a `ParseFailure`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path the document of `class_name` is expected at
    pub fn class_path(&self, class_name: &str) -> PathBuf {
        self.root.join(format!("{}.json", class_name))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ClassSource for DirectorySource {
    fn fetch(&self, class_name: &str) -> Result<ClassRecord> {
        if class_name.is_empty() || class_name.contains(['/', '\\', '.']) {
            return Err(MimError::source_unavailable(
                class_name,
                "not a valid class name",
            ));
        }

        let path = self.class_path(class_name);
        debug!(class = %class_name, path = %path.display(), "reading class document");

        let content = fs::read_to_string(&path).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::NotFound => format!("no class document at {}", path.display()),
                _ => format!("failed to read {}: {}", path.display(), e),
            };
            MimError::source_unavailable(class_name, reason)
        })?;

        parse_class_json(class_name, &content)
    }
}
