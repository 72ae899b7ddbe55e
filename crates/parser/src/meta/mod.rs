//! ACI metadata document parser
//!
//! Parses the JSON metadata dump produced by the offline extraction tool
//! (`aci-meta.json`) into a `Snapshot` of normalized class records.
//!
//! ## Document Format
//!
//! The document is a single object with a `classes` map keyed by the
//! package-qualified class name:
//!
//! ```json
//! {
//!   "classes": {
//!     "fvTenant": {
//!       "label": "Tenant",
//!       "isAbstract": false,
//!       "isConfigurable": true,
//!       "isDeletable": true,
//!       "isRelation": false,
//!       "help": "A policy owner in the virtual fabric.",
//!       "rnFormat": "tn-%(name)s",
//!       "identifiedBy": ["name"],
//!       "contains": ["fvBD", "fvCtx"],
//!       "containers": ["polUni"],
//!       "relationTo": [],
//!       "relationFrom": []
//!     }
//!   }
//! }
//! ```
//!
//! Each class is converted independently: a malformed class is recorded as
//! rejected in the snapshot and does not prevent the others from loading.
//!
//! ## Usage
//! ```rust,ignore
//! use mimgen_parser::meta::MetaParser;
//!
//! let parser = MetaParser::from_file("aci-meta.json")?;
//! let snapshot = parser.parse();
//! ```

mod converter;
mod parser;
mod types;

pub use converter::convert_class;
pub use parser::{parse_class_json, MetaParser};
pub use types::*;
