//! Normalized class records
//!
//! A `ClassRecord` is the validated form of one MIM class. Records are built
//! once by a parser or fetch source and never mutated afterwards; the DN
//! formats computed from them live next to the record in the model store.

use crate::{rn, MimError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One configurable or read-only property of a class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Display label, when the metadata carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether the property can be set by a client
    #[serde(default)]
    pub is_configurable: bool,

    /// Documentation text
    #[serde(default)]
    pub help: String,

    /// Allowed values; empty means free-form
    #[serde(default)]
    pub options: Vec<String>,
}

/// Cardinality of a relation edge, as coded by the extraction tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    /// Target side of a relation; the source decides the cardinality
    Unspecified,
}

impl TryFrom<i64> for Cardinality {
    type Error = String;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(Cardinality::OneToOne),
            1 => Ok(Cardinality::OneToMany),
            2 => Ok(Cardinality::ManyToOne),
            3 => Ok(Cardinality::ManyToMany),
            -1 => Ok(Cardinality::Unspecified),
            other => Err(format!("unknown relation cardinality code {}", other)),
        }
    }
}

impl From<Cardinality> for i64 {
    fn from(cardinality: Cardinality) -> i64 {
        match cardinality {
            Cardinality::OneToOne => 0,
            Cardinality::OneToMany => 1,
            Cardinality::ManyToOne => 2,
            Cardinality::ManyToMany => 3,
            Cardinality::Unspecified => -1,
        }
    }
}

/// Reference from one class to instances of another through a relation class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub cardinality: Cardinality,
    pub class: String,
}

/// One complete distinguished-name path from a root container to a class
///
/// Serialized as the `[path, [classes...]]` pair used in metadata documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Vec<String>)", into = "(String, Vec<String>)")]
pub struct DnFormat {
    /// RN fragments joined by `/`, e.g. `uni/tn-{name}/BD-{name}`
    pub path: String,

    /// Classes on the path, parent first, target last
    pub classes: Vec<String>,
}

impl DnFormat {
    pub fn new(path: impl Into<String>, classes: Vec<String>) -> Self {
        Self {
            path: path.into(),
            classes,
        }
    }

    /// The class this DN names
    pub fn target(&self) -> Option<&str> {
        self.classes.last().map(String::as_str)
    }

    /// Direct container of the target on this path
    pub fn immediate_parent(&self) -> Option<&str> {
        self.classes
            .len()
            .checked_sub(2)
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// Every class on the path except the target
    pub fn parents(&self) -> &[String] {
        match self.classes.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }

    pub fn depth(&self) -> usize {
        self.classes.len()
    }
}

impl From<(String, Vec<String>)> for DnFormat {
    fn from((path, classes): (String, Vec<String>)) -> Self {
        Self { path, classes }
    }
}

impl From<DnFormat> for (String, Vec<String>) {
    fn from(dn: DnFormat) -> Self {
        (dn.path, dn.classes)
    }
}

/// Normalized metadata of one MIM class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub label: String,
    pub is_abstract: bool,
    pub is_configurable: bool,
    pub is_deletable: bool,
    pub is_relation: bool,
    pub help: String,

    /// RN template with `{name}` placeholders
    pub rn_format: String,

    /// Naming properties, in RN placeholder order
    pub identified_by: Vec<String>,

    pub properties: BTreeMap<String, PropertyDescriptor>,

    /// Classes this class may directly contain
    pub contains: BTreeSet<String>,

    /// Classes that may directly contain this class
    pub containers: BTreeSet<String>,

    pub relation_to: Vec<RelationEdge>,
    pub relation_from: Vec<RelationEdge>,
}

impl ClassRecord {
    /// Check the record invariants for `class_name`
    ///
    /// `identified_by` must list exactly the RN placeholders, in order.
    pub fn validate(&self, class_name: &str) -> Result<()> {
        let names = rn::placeholders(&self.rn_format);

        if names.len() != self.identified_by.len() {
            return Err(MimError::parse_failure(
                class_name,
                format!(
                    "rnFormat '{}' has {} placeholder(s) but identifiedBy lists {}",
                    self.rn_format,
                    names.len(),
                    self.identified_by.len()
                ),
            ));
        }

        if let Some((placeholder, prop)) = names
            .iter()
            .zip(&self.identified_by)
            .find(|(placeholder, prop)| **placeholder != prop.as_str())
        {
            return Err(MimError::parse_failure(
                class_name,
                format!(
                    "naming property '{}' does not match rnFormat placeholder '{}'",
                    prop, placeholder
                ),
            ));
        }

        Ok(())
    }

    /// True when `marker` is one of this class's containers
    pub fn is_root_child(&self, marker: &str) -> bool {
        self.containers.contains(marker)
    }
}

/// A snapshot-supplied class: its record and, optionally, precomputed DN formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub record: ClassRecord,
    pub dn_format: Option<Vec<DnFormat>>,
}

/// Pre-built metadata covering many classes at once
///
/// Classes that failed validation while the snapshot was loaded are kept as
/// rejections so a later request reports the parse failure instead of
/// fetching the class from elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: BTreeMap<String, SnapshotEntry>,
    rejected: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: impl Into<String>, entry: SnapshotEntry) {
        let class_name = class_name.into();
        self.rejected.remove(&class_name);
        self.entries.insert(class_name, entry);
    }

    pub fn reject(&mut self, class_name: impl Into<String>, reason: impl Into<String>) {
        let class_name = class_name.into();
        self.entries.remove(&class_name);
        self.rejected.insert(class_name, reason.into());
    }

    /// Look up a class: `None` if the snapshot does not know it,
    /// `Some(Err(reason))` if it was rejected at load time
    pub fn get(&self, class_name: &str) -> Option<std::result::Result<&SnapshotEntry, &str>> {
        if let Some(entry) = self.entries.get(class_name) {
            return Some(Ok(entry));
        }
        self.rejected
            .get(class_name)
            .map(|reason| Err(reason.as_str()))
    }

    /// All known class names, accepted and rejected, sorted
    pub fn class_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.entries.keys().chain(self.rejected.keys()).collect();
        names.into_iter().cloned().collect()
    }

    pub fn rejected(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rejected.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of accepted classes; rejections are counted by `rejected()`
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no class was accepted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
