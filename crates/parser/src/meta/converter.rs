//! Converts raw class metadata to validated class records

use super::types::RawClassMeta;
use mimgen_common::{rn, ClassRecord, MimError, PropertyDescriptor, Result, SnapshotEntry};
use std::collections::BTreeSet;

/// Convert raw metadata of `class_name` into a snapshot entry
///
/// Fails with `ParseFailure` when `rnFormat` is missing, a class name in
/// `contains`/`containers` is blank, `dnFormat` is present but empty, or the
/// naming properties do not match the RN placeholders.
pub fn convert_class(class_name: &str, raw: RawClassMeta) -> Result<SnapshotEntry> {
    let rn_format = raw
        .rn_format
        .ok_or_else(|| MimError::parse_failure(class_name, "missing required field rnFormat"))?;

    if raw.dn_format.as_ref().is_some_and(|formats| formats.is_empty()) {
        return Err(MimError::parse_failure(class_name, "dnFormat is present but lists no DN"));
    }

    let contains = collect_names(class_name, "contains", raw.contains.into_names())?;
    let containers = collect_names(class_name, "containers", raw.containers.into_names())?;

    let properties = raw
        .properties
        .into_iter()
        .map(|(name, prop)| {
            (
                name,
                PropertyDescriptor {
                    label: prop.label,
                    is_configurable: prop.is_configurable,
                    help: prop.help.unwrap_or_default(),
                    options: prop.options.into_names(),
                },
            )
        })
        .collect();

    let record = ClassRecord {
        label: raw.label.unwrap_or_default(),
        is_abstract: raw.is_abstract,
        is_configurable: raw.is_configurable,
        is_deletable: raw.is_deletable,
        is_relation: raw.is_relation,
        help: raw.help.unwrap_or_default(),
        rn_format: rn::normalize_rn_format(&rn_format).into_owned(),
        identified_by: raw.identified_by,
        properties,
        contains,
        containers,
        relation_to: raw.relation_to,
        relation_from: raw.relation_from,
    };

    record.validate(class_name)?;

    Ok(SnapshotEntry {
        record,
        dn_format: raw.dn_format,
    })
}

fn collect_names(class_name: &str, field: &str, names: Vec<String>) -> Result<BTreeSet<String>> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(MimError::parse_failure(
            class_name,
            format!("blank class name in {}", field),
        ));
    }
    Ok(names.into_iter().collect())
}
