//! Containment-path resolution
//!
//! Enumerates every distinguished-name path of a class by walking its
//! `containers` edges up to the classes that sit directly under the root
//! marker. Each class on the way contributes its RN template, so the
//! resulting path reads parent first: `uni/tn-{name}/BD-{name}`.
//!
//! The walk is guarded three ways: a class seen twice on one branch is a
//! cycle, a branch may not grow past `max_depth` classes, and the total work
//! (container edges followed plus partial paths produced) is capped by
//! `max_branches`. Any of them fails the class with `ResolutionTooComplex`.
//!
//! Resolved ancestors are memoized with the height and work their walk took.
//! A memo is only reused where walking the ancestor again would fit the
//! remaining depth and budget, otherwise the ancestor is walked again, so a
//! class resolves the same way whatever was resolved before it.

use crate::store::{ClassStore, ResolutionCost};
use mimgen_common::{DnFormat, MimError, ModelConfig, ResolutionLimit, Result};
use tracing::debug;

/// Computes and memoizes DN formats
pub struct ContainmentResolver<'a> {
    config: &'a ModelConfig,
}

/// State of one resolution
struct Walk<'t> {
    target: &'t str,
    steps: usize,
    max_steps: usize,
    trail: Vec<String>,
}

/// DN formats of one class on the walk and the levels entered to find them
struct Branch {
    formats: Vec<DnFormat>,
    height: usize,
}

impl Walk<'_> {
    fn step(&mut self) -> Result<()> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(self.too_complex(ResolutionLimit::Branches(self.max_steps)));
        }
        Ok(())
    }

    fn too_complex(&self, limit: ResolutionLimit) -> MimError {
        MimError::ResolutionTooComplex {
            class: self.target.to_string(),
            limit,
        }
    }
}

impl<'a> ContainmentResolver<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    /// DN formats of `class_name`, computing and storing them on first use
    pub fn resolve(&self, store: &mut ClassStore, class_name: &str) -> Result<Vec<DnFormat>> {
        if let Some(formats) = store.ensure(class_name)?.dn_format() {
            return Ok(formats.to_vec());
        }

        let mut walk = Walk {
            target: class_name,
            steps: 0,
            max_steps: self.config.max_branches,
            trail: Vec::new(),
        };
        let branch = self.chains(store, class_name, &mut walk)?;

        if branch.formats.is_empty() {
            return Err(MimError::NoContainmentPath {
                class: class_name.to_string(),
            });
        }

        debug!(
            class = %class_name,
            formats = branch.formats.len(),
            steps = walk.steps,
            "resolved containment"
        );
        let cost = ResolutionCost {
            height: branch.height,
            work: walk.steps,
        };
        store.memoize_dn(class_name, branch.formats.clone(), cost);
        Ok(branch.formats)
    }

    /// Every DN of `class_name` that reaches the root marker
    ///
    /// Returns no formats when no container chain reaches the root.
    fn chains(
        &self,
        store: &mut ClassStore,
        class_name: &str,
        walk: &mut Walk<'_>,
    ) -> Result<Branch> {
        if walk.trail.iter().any(|seen| seen == class_name) {
            return Err(walk.too_complex(ResolutionLimit::Cycle(class_name.to_string())));
        }
        if walk.trail.len() >= self.config.max_depth {
            return Err(walk.too_complex(ResolutionLimit::Depth(self.config.max_depth)));
        }

        let stored = store.ensure(class_name)?;
        if let Some(formats) = stored.dn_format() {
            let cost = stored.cost();
            if walk.trail.len() + cost.height <= self.config.max_depth
                && walk.steps + cost.work <= walk.max_steps
            {
                walk.steps += cost.work;
                return Ok(Branch {
                    formats: formats.to_vec(),
                    height: cost.height,
                });
            }
        }

        let record = stored.record();
        let rn_format = record.rn_format.clone();

        if record.is_root_child(&self.config.root_marker) {
            walk.step()?;
            return Ok(Branch {
                formats: vec![DnFormat::new(rn_format, vec![class_name.to_string()])],
                height: 1,
            });
        }

        let containers: Vec<String> = record.containers.iter().cloned().collect();
        let start = walk.steps;
        let mut height = 1;

        walk.trail.push(class_name.to_string());
        let mut formats = Vec::new();
        for container in &containers {
            walk.step()?;
            let parent = self.chains(store, container, walk)?;
            height = height.max(parent.height + 1);
            for dn in parent.formats {
                walk.step()?;
                formats.push(extend(dn, &rn_format, class_name));
            }
        }
        walk.trail.pop();

        if class_name != walk.target {
            let cost = ResolutionCost {
                height,
                work: walk.steps - start,
            };
            store.memoize_dn(class_name, formats.clone(), cost);
        }

        Ok(Branch { formats, height })
    }
}

/// Append one class and its RN to a parent DN
fn extend(parent: DnFormat, rn_format: &str, class_name: &str) -> DnFormat {
    let path = match (parent.path.is_empty(), rn_format.is_empty()) {
        (true, _) => rn_format.to_string(),
        (false, true) => parent.path,
        (false, false) => format!("{}/{}", parent.path, rn_format),
    };

    let mut classes = parent.classes;
    classes.push(class_name.to_string());

    DnFormat { path, classes }
}
