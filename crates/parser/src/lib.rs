//! Metadata loading for MIM class models
//!
//! This crate turns the two metadata formats the model accepts into
//! `mimgen-common` types:
//!
//! - [`meta::MetaParser`] reads a whole `aci-meta.json` dump into a `Snapshot`
//! - [`DirectorySource`] fetches single classes from `<dir>/<className>.json`
//!   files on demand

mod directory;
pub mod meta;

pub use directory::DirectorySource;
pub use meta::{parse_class_json, MetaParser};
