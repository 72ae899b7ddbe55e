//! Containment symmetry audit
//!
//! `contains` and `containers` are declared independently in the metadata
//! and are not guaranteed to mirror each other. The model keeps both as
//! given; this audit only reports where they disagree.

use crate::store::ClassStore;
use crate::ObjectModel;
use std::fmt;
use tracing::warn;

/// One containment edge declared on only one side
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Asymmetry {
    /// `container` lists `child` in `contains`, `child` does not list `container`
    MissingContainer { container: String, child: String },
    /// `child` lists `container` in `containers`, `container` does not list `child`
    MissingContains { container: String, child: String },
}

impl fmt::Display for Asymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asymmetry::MissingContainer { container, child } => write!(
                f,
                "{} contains {} but {} does not list it as a container",
                container, child, child
            ),
            Asymmetry::MissingContains { container, child } => write!(
                f,
                "{} is contained by {} but {} does not list it in contains",
                child, container, container
            ),
        }
    }
}

/// Compare both edge directions over the loaded records
///
/// Edges to classes that are not loaded, and edges to the root marker, are
/// not judged.
pub fn audit_containment(store: &ClassStore, root_marker: &str) -> Vec<Asymmetry> {
    let mut findings = Vec::new();

    for (name, stored) in store.iter() {
        let record = stored.record();

        for child in &record.contains {
            if let Some(other) = store.get(child) {
                if !other.record().containers.contains(name) {
                    findings.push(Asymmetry::MissingContainer {
                        container: name.to_string(),
                        child: child.clone(),
                    });
                }
            }
        }

        for container in record.containers.iter().filter(|c| *c != root_marker) {
            if let Some(other) = store.get(container) {
                if !other.record().contains.contains(name) {
                    findings.push(Asymmetry::MissingContains {
                        container: container.clone(),
                        child: name.to_string(),
                    });
                }
            }
        }
    }

    findings.sort();
    findings
}

impl ObjectModel {
    /// Containment edges declared on one side only, among loaded classes
    pub fn containment_asymmetries(&self) -> Vec<Asymmetry> {
        let findings = audit_containment(&self.store, &self.config.root_marker);
        for finding in &findings {
            warn!(%finding, "containment asymmetry");
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimgen_common::{ClassRecord, NoSource, Snapshot, SnapshotEntry};

    fn entry(contains: &[&str], containers: &[&str]) -> SnapshotEntry {
        SnapshotEntry {
            record: ClassRecord {
                rn_format: "x".to_string(),
                contains: contains.iter().map(|c| c.to_string()).collect(),
                containers: containers.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
            dn_format: None,
        }
    }

    #[test]
    fn test_reports_both_directions() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("polUni", entry(&["fvTenant"], &["topRoot"]));
        snapshot.insert("fvTenant", entry(&["fvBD"], &[]));
        snapshot.insert("fvBD", entry(&[], &["fvTenant", "fvCtx"]));
        snapshot.insert("fvCtx", entry(&[], &["fvTenant"]));

        let mut store = ClassStore::with_snapshot(snapshot, Box::new(NoSource));
        for name in ["polUni", "fvTenant", "fvBD", "fvCtx"] {
            store.ensure(name).unwrap();
        }

        let findings = audit_containment(&store, "topRoot");
        assert_eq!(
            findings,
            vec![
                Asymmetry::MissingContainer {
                    container: "polUni".to_string(),
                    child: "fvTenant".to_string(),
                },
                Asymmetry::MissingContains {
                    container: "fvCtx".to_string(),
                    child: "fvBD".to_string(),
                },
                Asymmetry::MissingContains {
                    container: "fvTenant".to_string(),
                    child: "fvCtx".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_symmetric_edges_are_clean() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("polUni", entry(&["fvTenant"], &["topRoot"]));
        snapshot.insert("fvTenant", entry(&[], &["polUni"]));

        let mut store = ClassStore::with_snapshot(snapshot, Box::new(NoSource));
        store.ensure("polUni").unwrap();
        store.ensure("fvTenant").unwrap();

        assert!(audit_containment(&store, "topRoot").is_empty());
    }
}
