//! Class record store
//!
//! Owns every record loaded during one generation run. Records come from
//! the snapshot when it knows the class and from the fetch source otherwise.

use mimgen_common::{ClassRecord, ClassSource, DnFormat, MimError, Result, Snapshot};
use std::collections::HashMap;
use tracing::debug;

/// Work a resolution took, kept with its result
///
/// `height` is the number of containment levels entered, the class itself
/// included; `work` is the number of resolver steps spent. A result is only
/// reused where a fresh walk would stay within the same limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolutionCost {
    pub(crate) height: usize,
    pub(crate) work: usize,
}

impl ResolutionCost {
    /// Cost of a result taken as given from the snapshot, or of none yet
    const GIVEN: ResolutionCost = ResolutionCost { height: 1, work: 0 };
}

/// A loaded class and, once resolved, its DN formats
#[derive(Debug, Clone)]
pub struct StoredClass {
    record: ClassRecord,
    dn_format: Option<Vec<DnFormat>>,
    cost: ResolutionCost,
}

impl StoredClass {
    pub fn record(&self) -> &ClassRecord {
        &self.record
    }

    /// `None` until the class has been resolved
    pub fn dn_format(&self) -> Option<&[DnFormat]> {
        self.dn_format.as_deref()
    }

    pub(crate) fn cost(&self) -> ResolutionCost {
        self.cost
    }
}

/// Mapping from class name to loaded record
pub struct ClassStore {
    records: HashMap<String, StoredClass>,
    snapshot: Snapshot,
    source: Box<dyn ClassSource>,
    fetches: usize,
}

impl ClassStore {
    /// Empty store fetching every class from `source`
    pub fn new(source: Box<dyn ClassSource>) -> Self {
        Self::with_snapshot(Snapshot::new(), source)
    }

    /// Store serving snapshot classes first and fetching the rest
    pub fn with_snapshot(snapshot: Snapshot, source: Box<dyn ClassSource>) -> Self {
        Self {
            records: HashMap::new(),
            snapshot,
            source,
            fetches: 0,
        }
    }

    /// Make sure `class_name` is loaded and return it
    ///
    /// A failed load leaves the store unchanged.
    pub fn ensure(&mut self, class_name: &str) -> Result<&StoredClass> {
        if !self.records.contains_key(class_name) {
            let stored = self.load(class_name)?;
            self.records.insert(class_name.to_string(), stored);
        }
        Ok(&self.records[class_name])
    }

    fn load(&mut self, class_name: &str) -> Result<StoredClass> {
        match self.snapshot.get(class_name) {
            Some(Ok(entry)) => {
                debug!(class = %class_name, "serving class from snapshot");
                return Ok(StoredClass {
                    record: entry.record.clone(),
                    dn_format: entry.dn_format.clone().filter(|formats| !formats.is_empty()),
                    cost: ResolutionCost::GIVEN,
                });
            }
            Some(Err(reason)) => return Err(MimError::parse_failure(class_name, reason)),
            None => {}
        }

        self.fetches += 1;
        debug!(class = %class_name, "fetching class");
        let record = self.source.fetch(class_name)?;
        record.validate(class_name)?;

        Ok(StoredClass {
            record,
            dn_format: None,
            cost: ResolutionCost::GIVEN,
        })
    }

    /// Record the DN formats of a loaded class; a class keeps its first value
    pub(crate) fn memoize_dn(
        &mut self,
        class_name: &str,
        formats: Vec<DnFormat>,
        cost: ResolutionCost,
    ) {
        if let Some(stored) = self.records.get_mut(class_name) {
            if stored.dn_format.is_none() && !formats.is_empty() {
                debug!(
                    class = %class_name,
                    count = formats.len(),
                    height = cost.height,
                    work = cost.work,
                    "memoized DN formats"
                );
                stored.dn_format = Some(formats);
                stored.cost = cost;
            }
        }
    }

    pub fn get(&self, class_name: &str) -> Option<&StoredClass> {
        self.records.get(class_name)
    }

    pub(crate) fn get_entry(&self, class_name: &str) -> Option<(&str, &StoredClass)> {
        self.records
            .get_key_value(class_name)
            .map(|(name, stored)| (name.as_str(), stored))
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.records.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Loaded class names, sorted
    pub fn loaded_class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every class the snapshot knows, loaded or not
    pub fn snapshot_class_names(&self) -> Vec<String> {
        self.snapshot.class_names()
    }

    /// Number of calls made to the fetch source
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &StoredClass)> {
        self.records
            .iter()
            .map(|(name, stored)| (name.as_str(), stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimgen_common::{NoSource, SnapshotEntry};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSource {
        calls: Rc<Cell<usize>>,
    }

    impl ClassSource for CountingSource {
        fn fetch(&self, class_name: &str) -> Result<ClassRecord> {
            self.calls.set(self.calls.get() + 1);
            match class_name {
                "fvTenant" => Ok(ClassRecord {
                    label: "Tenant".to_string(),
                    rn_format: "tn-{name}".to_string(),
                    identified_by: vec!["name".to_string()],
                    ..Default::default()
                }),
                "fvBroken" => Ok(ClassRecord {
                    rn_format: "x-{name}".to_string(),
                    ..Default::default()
                }),
                _ => Err(MimError::source_unavailable(class_name, "unknown")),
            }
        }
    }

    fn counting_store() -> (ClassStore, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let store = ClassStore::new(Box::new(CountingSource {
            calls: Rc::clone(&calls),
        }));
        (store, calls)
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let (mut store, calls) = counting_store();

        let first = store.ensure("fvTenant").unwrap().record().clone();
        let second = store.ensure("fvTenant").unwrap().record().clone();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn test_failed_fetch_leaves_store_unchanged() {
        let (mut store, _) = counting_store();

        assert!(store.ensure("fvMissing").is_err());
        assert!(!store.contains("fvMissing"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_fetched_record_is_not_inserted() {
        let (mut store, _) = counting_store();

        let err = store.ensure("fvBroken").err().unwrap();
        assert!(matches!(err, MimError::ParseFailure { .. }));
        assert!(!store.contains("fvBroken"));
    }

    #[test]
    fn test_snapshot_rejection_is_parse_failure() {
        let mut snapshot = Snapshot::new();
        snapshot.reject("fvBD", "missing required field rnFormat");
        let (_, calls) = counting_store();
        let mut store = ClassStore::with_snapshot(
            snapshot,
            Box::new(CountingSource {
                calls: Rc::clone(&calls),
            }),
        );

        let err = store.ensure("fvBD").err().unwrap();
        assert!(matches!(err, MimError::ParseFailure { ref class, .. } if class == "fvBD"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_memoize_keeps_first_value() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "polUni",
            SnapshotEntry {
                record: ClassRecord {
                    rn_format: "uni".to_string(),
                    ..Default::default()
                },
                dn_format: None,
            },
        );
        let mut store = ClassStore::with_snapshot(snapshot, Box::new(NoSource));

        store.ensure("polUni").unwrap();
        assert!(store.get("polUni").unwrap().dn_format().is_none());

        let first = vec![DnFormat::new("uni", vec!["polUni".to_string()])];
        let cost = ResolutionCost { height: 1, work: 1 };
        store.memoize_dn("polUni", Vec::new(), cost);
        assert!(store.get("polUni").unwrap().dn_format().is_none());
        store.memoize_dn("polUni", first.clone(), cost);
        store.memoize_dn("polUni", Vec::new(), ResolutionCost { height: 5, work: 9 });

        assert_eq!(store.get("polUni").unwrap().dn_format(), Some(&first[..]));
        assert_eq!(store.get("polUni").unwrap().cost(), cost);
        assert_eq!(store.loaded_class_names(), vec!["polUni"]);
        assert_eq!(store.snapshot_class_names(), vec!["polUni"]);
    }

    #[test]
    fn test_empty_snapshot_dn_format_is_unresolved() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "fvX",
            SnapshotEntry {
                record: ClassRecord {
                    rn_format: "x".to_string(),
                    ..Default::default()
                },
                dn_format: Some(Vec::new()),
            },
        );
        let mut store = ClassStore::with_snapshot(snapshot, Box::new(NoSource));

        assert!(store.ensure("fvX").unwrap().dn_format().is_none());
    }
}
