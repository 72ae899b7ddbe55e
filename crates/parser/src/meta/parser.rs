//! Metadata document parser

use super::converter::convert_class;
use super::types::{MetaDocument, RawClassMeta};
use mimgen_common::{ClassRecord, MimError, Result, Snapshot};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// ACI metadata document parser
///
/// Reads the `aci-meta.json` dump and turns it into a `Snapshot` that the
/// object model serves classes from.
pub struct MetaParser {
    /// Loaded metadata document
    doc: MetaDocument,
}

impl MetaParser {
    /// Load metadata document from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = MetaParser::from_file("aci-meta.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            MimError::Document(format!(
                "Failed to read metadata file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse metadata document from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: MetaDocument = serde_json::from_str(json)
            .map_err(|e| MimError::Document(format!("Failed to parse metadata JSON: {}", e)))?;

        Ok(Self { doc })
    }

    /// Convert every class of the document into a snapshot
    ///
    /// Classes that fail to decode or validate are kept as rejections.
    pub fn parse(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();

        for (class_name, value) in &self.doc.classes {
            let converted = serde_json::from_value::<RawClassMeta>(value.clone())
                .map_err(|e| MimError::parse_failure(class_name, e.to_string()))
                .and_then(|raw| convert_class(class_name, raw));

            match converted {
                Ok(entry) => snapshot.insert(class_name.clone(), entry),
                Err(e) => {
                    warn!(class = %class_name, error = %e, "rejecting snapshot class");
                    snapshot.reject(class_name.clone(), e.to_string());
                }
            }
        }

        info!(
            classes = snapshot.len(),
            rejected = snapshot.rejected().count(),
            "loaded metadata snapshot"
        );

        snapshot
    }

    /// Get reference to the underlying metadata document
    pub fn doc(&self) -> &MetaDocument {
        &self.doc
    }
}

/// Parse a single class document (the JSON object of one class)
pub fn parse_class_json(class_name: &str, json: &str) -> Result<ClassRecord> {
    let raw: RawClassMeta = serde_json::from_str(json)
        .map_err(|e| MimError::parse_failure(class_name, format!("invalid JSON: {}", e)))?;

    convert_class(class_name, raw).map(|entry| entry.record)
}
