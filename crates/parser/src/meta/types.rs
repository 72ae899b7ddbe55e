//! ACI metadata document type definitions
//!
//! These mirror the extraction tool's JSON as loosely as it is emitted;
//! `converter` turns them into validated `ClassRecord`s.

use mimgen_common::{DnFormat, RelationEdge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaDocument {
    /// Class name to raw class metadata; kept as JSON so every class is
    /// decoded on its own
    #[serde(default)]
    pub classes: BTreeMap<String, serde_json::Value>,
}

/// Raw metadata of one class
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassMeta {
    /// Display label
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub is_configurable: bool,

    #[serde(default)]
    pub is_deletable: bool,

    #[serde(default)]
    pub is_relation: bool,

    /// Documentation text
    #[serde(default)]
    pub help: Option<String>,

    /// RN template, either `tn-%(name)s` or `tn-{name}`
    #[serde(default)]
    pub rn_format: Option<String>,

    /// Ordered naming properties
    #[serde(default)]
    pub identified_by: Vec<String>,

    /// Property descriptors; older dumps omit them entirely
    #[serde(default)]
    pub properties: BTreeMap<String, RawProperty>,

    /// Directly contained classes
    #[serde(default)]
    pub contains: NameSet,

    /// Direct container classes
    #[serde(default)]
    pub containers: NameSet,

    #[serde(default)]
    pub relation_to: Vec<RelationEdge>,

    #[serde(default)]
    pub relation_from: Vec<RelationEdge>,

    /// Precomputed DN formats, present in enriched dumps
    #[serde(default)]
    pub dn_format: Option<Vec<DnFormat>>,
}

/// Raw property descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub is_configurable: bool,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default)]
    pub options: RawOptions,
}

/// Property options: a plain list, or a label-to-value map of which the
/// labels are the options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    List(Vec<String>),
    Map(BTreeMap<String, serde_json::Value>),
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions::List(Vec::new())
    }
}

impl RawOptions {
    pub fn into_names(self) -> Vec<String> {
        match self {
            RawOptions::List(names) => names,
            RawOptions::Map(map) => map.into_keys().collect(),
        }
    }
}

/// A set of class names, written either as a list or as a map keyed by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameSet {
    List(Vec<String>),
    Map(BTreeMap<String, serde_json::Value>),
}

impl Default for NameSet {
    fn default() -> Self {
        NameSet::List(Vec::new())
    }
}

impl NameSet {
    pub fn into_names(self) -> Vec<String> {
        match self {
            NameSet::List(names) => names,
            NameSet::Map(map) => map.into_keys().collect(),
        }
    }
}
