//! Queryable MIM class model
//!
//! [`ObjectModel`] is the single entry point generators use. Asking it for a
//! class loads the class record (from the snapshot, or through the fetch
//! source), resolves every DN path of the class through the containment
//! tree, and hands back a read-only [`ClassAccessor`].
//!
//! ```rust,ignore
//! use mimgen_model::ObjectModel;
//! use mimgen_parser::MetaParser;
//!
//! let snapshot = MetaParser::from_file("aci-meta.json")?.parse();
//! let mut model = ObjectModel::from_snapshot(snapshot, None, Default::default());
//!
//! let bd = model.get_class("fvBD")?;
//! for dn in bd.dn_format() {
//!     println!("{}", dn.path);
//! }
//! ```
//!
//! One model serves one generation run: records fetched while resolving a
//! class stay loaded and are reused for every later request.

mod accessor;
mod audit;
mod hierarchy;
mod resolver;
mod store;

pub use accessor::ClassAccessor;
pub use audit::{audit_containment, Asymmetry};
pub use hierarchy::NamingStep;
pub use resolver::ContainmentResolver;
pub use store::{ClassStore, StoredClass};

use mimgen_common::{ClassSource, DnFormat, MimError, ModelConfig, NoSource, Result, Snapshot};
use tracing::debug;

/// Facade over the class store and the containment resolver
pub struct ObjectModel {
    store: ClassStore,
    config: ModelConfig,
}

impl ObjectModel {
    /// Model that fetches every class from `source`
    pub fn new(source: Box<dyn ClassSource>, config: ModelConfig) -> Self {
        Self {
            store: ClassStore::new(source),
            config,
        }
    }

    /// Model serving snapshot classes, fetching unknown ones from `source`
    ///
    /// Without a source, classes missing from the snapshot are unavailable.
    pub fn from_snapshot(
        snapshot: Snapshot,
        source: Option<Box<dyn ClassSource>>,
        config: ModelConfig,
    ) -> Self {
        let source = source.unwrap_or_else(|| Box::new(NoSource));
        Self {
            store: ClassStore::with_snapshot(snapshot, source),
            config,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn store(&self) -> &ClassStore {
        &self.store
    }

    /// Load the record of `class_name` without resolving it
    pub fn ensure(&mut self, class_name: &str) -> Result<()> {
        self.store.ensure(class_name).map(|_| ())
    }

    /// DN formats of `class_name`, resolving them on first use
    pub fn dn_formats(&mut self, class_name: &str) -> Result<Vec<DnFormat>> {
        ContainmentResolver::new(&self.config).resolve(&mut self.store, class_name)
    }

    /// Load and resolve `class_name`
    pub fn get_class(&mut self, class_name: &str) -> Result<ClassAccessor<'_>> {
        self.dn_formats(class_name)?;
        self.class(class_name).ok_or_else(|| MimError::NoContainmentPath {
            class: class_name.to_string(),
        })
    }

    /// View of a class that was already resolved by an earlier request
    pub fn class(&self, class_name: &str) -> Option<ClassAccessor<'_>> {
        let (name, stored) = self.store.get_entry(class_name)?;
        let dn_format = stored.dn_format()?;
        Some(ClassAccessor::new(name, stored.record(), dn_format))
    }

    /// Resolve several classes, one result per name
    ///
    /// A failure only affects its own class; resolved classes are available
    /// through [`ObjectModel::class`] afterwards.
    pub fn get_classes<S: AsRef<str>>(&mut self, class_names: &[S]) -> Vec<(String, Result<()>)> {
        class_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let result = self.dn_formats(name).map(|_| ());
                if let Err(e) = &result {
                    debug!(class = %name, error = %e, "class failed");
                }
                (name.to_string(), result)
            })
            .collect()
    }

    /// Load every snapshot class; returns the classes that failed
    pub fn preload_snapshot(&mut self) -> Vec<(String, MimError)> {
        self.store
            .snapshot_class_names()
            .into_iter()
            .filter_map(|name| match self.store.ensure(&name) {
                Ok(_) => None,
                Err(e) => Some((name, e)),
            })
            .collect()
    }
}
