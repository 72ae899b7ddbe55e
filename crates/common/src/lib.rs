//! Common types and utilities for mimgen
//!
//! This crate contains the normalized class record, RN template helpers,
//! model configuration, the fetch collaborator trait and the error type
//! shared by the parser, model and CLI components.

mod config;
mod record;
pub mod rn;
mod source;

pub use config::ModelConfig;
pub use record::{
    Cardinality, ClassRecord, DnFormat, PropertyDescriptor, RelationEdge, Snapshot, SnapshotEntry,
};
pub use source::{ClassSource, NoSource};

use std::fmt;
use thiserror::Error;

/// Processing phase a class-level error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Parse,
    Resolve,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Fetch => write!(f, "fetch"),
            Phase::Parse => write!(f, "parse"),
            Phase::Resolve => write!(f, "resolve"),
        }
    }
}

/// Which resolver guard stopped a DN resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionLimit {
    /// A containment branch grew past the configured depth
    Depth(usize),
    /// More container edges were explored than allowed
    Branches(usize),
    /// The named class appeared twice on the same branch
    Cycle(String),
}

impl fmt::Display for ResolutionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionLimit::Depth(max) => write!(f, "containment depth exceeded {}", max),
            ResolutionLimit::Branches(max) => {
                write!(f, "explored more than {} container branches", max)
            }
            ResolutionLimit::Cycle(class) => write!(f, "containment cycle through {}", class),
        }
    }
}

/// Errors that can occur while building the object model
#[derive(Error, Debug)]
pub enum MimError {
    #[error("fetch failed for class {class}: {reason}")]
    SourceUnavailable { class: String, reason: String },

    #[error("parse failed for class {class}: {reason}")]
    ParseFailure { class: String, reason: String },

    #[error("resolve failed for class {class}: no containment path to the root")]
    NoContainmentPath { class: String },

    #[error("resolve failed for class {class}: {limit}")]
    ResolutionTooComplex {
        class: String,
        limit: ResolutionLimit,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata document error: {0}")]
    Document(String),
}

impl MimError {
    pub fn source_unavailable(class: &str, reason: impl Into<String>) -> Self {
        MimError::SourceUnavailable {
            class: class.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse_failure(class: &str, reason: impl Into<String>) -> Self {
        MimError::ParseFailure {
            class: class.to_string(),
            reason: reason.into(),
        }
    }

    /// Class the error is about, if it is a class-level error
    pub fn class_name(&self) -> Option<&str> {
        match self {
            MimError::SourceUnavailable { class, .. }
            | MimError::ParseFailure { class, .. }
            | MimError::NoContainmentPath { class }
            | MimError::ResolutionTooComplex { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Phase the error was raised in, if it is a class-level error
    pub fn phase(&self) -> Option<Phase> {
        match self {
            MimError::SourceUnavailable { .. } => Some(Phase::Fetch),
            MimError::ParseFailure { .. } => Some(Phase::Parse),
            MimError::NoContainmentPath { .. } | MimError::ResolutionTooComplex { .. } => {
                Some(Phase::Resolve)
            }
            _ => None,
        }
    }
}

/// Result type for object model operations
pub type Result<T> = std::result::Result<T, MimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_class_and_phase() {
        let err = MimError::source_unavailable("fvTenant", "no document");
        assert_eq!(err.class_name(), Some("fvTenant"));
        assert_eq!(err.phase(), Some(Phase::Fetch));
        assert_eq!(
            err.to_string(),
            "fetch failed for class fvTenant: no document"
        );

        let err = MimError::ResolutionTooComplex {
            class: "fvBD".to_string(),
            limit: ResolutionLimit::Cycle("fvCtx".to_string()),
        };
        assert_eq!(err.phase(), Some(Phase::Resolve));
        assert!(err.to_string().contains("containment cycle through fvCtx"));
    }

    #[test]
    fn test_document_errors_have_no_class() {
        let err = MimError::Config("bad".to_string());
        assert_eq!(err.class_name(), None);
        assert_eq!(err.phase(), None);
    }
}
