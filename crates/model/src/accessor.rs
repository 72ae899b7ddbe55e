//! Read-only view of a resolved class

use mimgen_common::{rn, ClassRecord, DnFormat, PropertyDescriptor, RelationEdge};
use std::collections::{BTreeMap, BTreeSet};

/// A loaded and resolved class as seen by generators
#[derive(Debug, Clone, Copy)]
pub struct ClassAccessor<'m> {
    name: &'m str,
    record: &'m ClassRecord,
    dn_format: &'m [DnFormat],
}

impl<'m> ClassAccessor<'m> {
    pub(crate) fn new(name: &'m str, record: &'m ClassRecord, dn_format: &'m [DnFormat]) -> Self {
        Self {
            name,
            record,
            dn_format,
        }
    }

    /// Class name, e.g. `fvTenant`
    pub fn name(&self) -> &'m str {
        self.name
    }

    pub fn label(&self) -> &'m str {
        &self.record.label
    }

    pub fn help(&self) -> &'m str {
        &self.record.help
    }

    pub fn is_abstract(&self) -> bool {
        self.record.is_abstract
    }

    pub fn is_configurable(&self) -> bool {
        self.record.is_configurable
    }

    pub fn is_deletable(&self) -> bool {
        self.record.is_deletable
    }

    pub fn is_relation(&self) -> bool {
        self.record.is_relation
    }

    pub fn rn_format(&self) -> &'m str {
        &self.record.rn_format
    }

    /// RN text before the first `-`
    pub fn rn_prefix(&self) -> &'m str {
        rn::rn_prefix(&self.record.rn_format)
    }

    pub fn identified_by(&self) -> &'m [String] {
        &self.record.identified_by
    }

    pub fn properties(&self) -> &'m BTreeMap<String, PropertyDescriptor> {
        &self.record.properties
    }

    pub fn property(&self, name: &str) -> Option<&'m PropertyDescriptor> {
        self.record.properties.get(name)
    }

    /// Properties a client can set, sorted by name
    pub fn configurable_properties(
        &self,
    ) -> impl Iterator<Item = (&'m str, &'m PropertyDescriptor)> + 'm {
        self.record
            .properties
            .iter()
            .filter(|(_, prop)| prop.is_configurable)
            .map(|(name, prop)| (name.as_str(), prop))
    }

    /// Descriptors of the naming properties in RN order; a naming property
    /// without a descriptor yields `None`
    pub fn naming_properties(&self) -> Vec<(&'m str, Option<&'m PropertyDescriptor>)> {
        self.record
            .identified_by
            .iter()
            .map(|name| (name.as_str(), self.record.properties.get(name)))
            .collect()
    }

    pub fn contains(&self) -> &'m BTreeSet<String> {
        &self.record.contains
    }

    pub fn containers(&self) -> &'m BTreeSet<String> {
        &self.record.containers
    }

    pub fn relation_to(&self) -> &'m [RelationEdge] {
        &self.record.relation_to
    }

    pub fn relation_from(&self) -> &'m [RelationEdge] {
        &self.record.relation_from
    }

    /// Every DN path of the class; never empty
    pub fn dn_format(&self) -> &'m [DnFormat] {
        self.dn_format
    }

    pub fn record(&self) -> &'m ClassRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge_domain() -> ClassRecord {
        let mut properties = BTreeMap::new();
        properties.insert(
            "name".to_string(),
            PropertyDescriptor {
                is_configurable: true,
                help: "The bridge domain name".to_string(),
                ..Default::default()
            },
        );
        properties.insert(
            "bcastP".to_string(),
            PropertyDescriptor {
                is_configurable: false,
                ..Default::default()
            },
        );
        properties.insert(
            "arpFlood".to_string(),
            PropertyDescriptor {
                is_configurable: true,
                options: vec!["no".to_string(), "yes".to_string()],
                ..Default::default()
            },
        );

        ClassRecord {
            label: "Bridge Domain".to_string(),
            is_configurable: true,
            is_deletable: true,
            rn_format: "BD-{name}".to_string(),
            identified_by: vec!["name".to_string()],
            properties,
            containers: ["fvTenant".to_string()].into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_projection() {
        let record = bridge_domain();
        let dn = vec![DnFormat::new(
            "uni/tn-{name}/BD-{name}",
            vec!["polUni".into(), "fvTenant".into(), "fvBD".into()],
        )];
        let view = ClassAccessor::new("fvBD", &record, &dn);

        assert_eq!(view.name(), "fvBD");
        assert_eq!(view.label(), "Bridge Domain");
        assert_eq!(view.rn_prefix(), "BD");
        assert!(view.is_deletable());
        assert!(!view.is_abstract());
        assert_eq!(view.dn_format().len(), 1);
        assert!(view.containers().contains("fvTenant"));
        assert_eq!(view.property("arpFlood").unwrap().options.len(), 2);
    }

    #[test]
    fn test_configurable_properties() {
        let record = bridge_domain();
        let view = ClassAccessor::new("fvBD", &record, &[]);

        let names: Vec<&str> = view.configurable_properties().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["arpFlood", "name"]);
    }

    #[test]
    fn test_naming_properties() {
        let record = bridge_domain();
        let view = ClassAccessor::new("fvBD", &record, &[]);

        let naming = view.naming_properties();
        assert_eq!(naming.len(), 1);
        assert_eq!(naming[0].0, "name");
        assert_eq!(naming[0].1.unwrap().help, "The bridge domain name");
    }
}
