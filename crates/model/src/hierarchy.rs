//! Naming and containment hierarchy queries used by generators

use crate::ObjectModel;
use mimgen_common::{DnFormat, MimError, ResolutionLimit, Result};

/// One named level of a DN, with the RNs of unnamed ancestors folded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingStep {
    /// Class named at this level
    pub class: String,
    /// RN template of this level, e.g. `uni/tn-{name}`
    ///
    /// Unnamed ancestors are kept, the root-level `uni` included, so joining
    /// every step's `rn_format` with `/` gives back the full DN path. Callers
    /// whose URL builder already supplies `uni/` strip it from the first step.
    pub rn_format: String,
    /// Naming properties of `class`, in RN order
    pub naming_properties: Vec<String>,
}

impl ObjectModel {
    /// Split a DN into the levels a caller has to supply names for
    ///
    /// Ancestors without naming properties carry no user input, so their
    /// RNs are prefixed to the next named level. The target always gets a
    /// step, named or not.
    pub fn naming_hierarchy(&mut self, dn: &DnFormat) -> Result<Vec<NamingStep>> {
        let target = dn.target();
        let mut steps = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for class_name in &dn.classes {
            let record = self.store.ensure(class_name)?.record();
            pending.push(record.rn_format.clone());

            if record.identified_by.is_empty() && Some(class_name.as_str()) != target {
                continue;
            }

            steps.push(NamingStep {
                class: class_name.clone(),
                rn_format: pending.join("/"),
                naming_properties: record.identified_by.clone(),
            });
            pending.clear();
        }

        Ok(steps)
    }

    /// Paths of contained classes below `class_name`, at most `depth` deep
    ///
    /// Every path starts at a direct child. Abstract classes are skipped, a
    /// class is never repeated within a path, and a path ends where nothing
    /// further can be expanded or the depth is reached.
    pub fn contained_paths(&mut self, class_name: &str, depth: usize) -> Result<Vec<Vec<String>>> {
        let mut paths = Vec::new();
        if depth == 0 {
            return Ok(paths);
        }

        let record = self.store.ensure(class_name)?.record();
        if record.is_abstract {
            return Ok(paths);
        }

        let children: Vec<String> = record.contains.iter().cloned().collect();
        let mut budget = self.config.max_branches;
        for child in children {
            self.expand_contained(class_name, vec![child], depth, &mut budget, &mut paths)?;
        }

        Ok(paths)
    }

    /// Expand `path` downwards; returns false when the path was dropped
    fn expand_contained(
        &mut self,
        origin: &str,
        path: Vec<String>,
        depth: usize,
        budget: &mut usize,
        out: &mut Vec<Vec<String>>,
    ) -> Result<bool> {
        if *budget == 0 {
            return Err(MimError::ResolutionTooComplex {
                class: origin.to_string(),
                limit: ResolutionLimit::Branches(self.config.max_branches),
            });
        }
        *budget -= 1;

        let Some(last) = path.last() else {
            return Ok(false);
        };
        let record = self.store.ensure(last)?.record();
        if record.is_abstract {
            return Ok(false);
        }

        let next: Vec<String> = if path.len() < depth {
            record
                .contains
                .iter()
                .filter(|c| c.as_str() != origin && !path.contains(c))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let mut expanded = false;
        for child in next {
            let mut longer = path.clone();
            longer.push(child);
            expanded |= self.expand_contained(origin, longer, depth, budget, out)?;
        }

        if !expanded {
            out.push(path);
        }
        Ok(true)
    }
}
