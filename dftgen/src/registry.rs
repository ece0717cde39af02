// SPDX-License-Identifier: Apache-2.0

//! Fault-model variant registry.
//!
//! Each pipeline has its own tag-to-variant table. A tag the pipeline does not
//! know resolves to [`Variant::BASE`], which overrides nothing and therefore
//! produces the shared default clauses in every hook slot.

use std::collections::HashMap;

use crate::config::Config;
use crate::dftgen_error::ConfigError;
use crate::engine::{Hooks, Pipeline};
use crate::{atpg, fault_sim};

/// Known fault-model tags.
pub mod tags {
    pub const STUCK: &str = "stuck";
    pub const TRANSITION: &str = "transition";
    pub const IDDQ: &str = "iddq";
    pub const BRIDGING: &str = "bridging";
    pub const PATH_DELAY: &str = "path_delay";
    pub const HOLD_TIME: &str = "hold_time";
    pub const EXPERIMENTAL: &str = "experimental";
}

pub type ValidateFn = fn(&Config) -> Result<(), ConfigError>;

/// Input file a variant needs produced before its script is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    None,
    /// Node-pair file for the bridging fault list.
    BridgingSites,
    /// Timing-path report for the delay-path fault models.
    DelayPaths,
}

#[derive(Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub hooks: Hooks,
    /// Extra configuration check run when the generator is constructed.
    pub validate: Option<ValidateFn>,
    pub prerequisite: Prerequisite,
}

impl Variant {
    pub const BASE: Variant = Variant {
        name: "default",
        hooks: Hooks::NONE,
        validate: None,
        prerequisite: Prerequisite::None,
    };
}

impl std::fmt::Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("hooks", &self.hooks)
            .field("validate", &self.validate.is_some())
            .field("prerequisite", &self.prerequisite)
            .finish()
    }
}

#[derive(Debug)]
pub struct VariantRegistry {
    variants: HashMap<(Pipeline, String), Variant>,
    base: Variant,
}

impl VariantRegistry {
    /// A registry with no tags; every lookup yields the base variant.
    pub fn empty() -> Self {
        VariantRegistry {
            variants: HashMap::new(),
            base: Variant::BASE,
        }
    }

    /// A registry holding every built-in ATPG and fault-simulation variant.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        atpg::register_variants(&mut registry);
        fault_sim::register_variants(&mut registry);
        registry
    }

    /// Adds `variant` under `tag`, replacing (and returning) any previous one.
    pub fn register(
        &mut self,
        pipeline: Pipeline,
        tag: &str,
        variant: Variant,
    ) -> Option<Variant> {
        log::debug!("VariantRegistry::register; pipeline: {}; tag: {}", pipeline, tag);
        self.variants.insert((pipeline, tag.to_string()), variant)
    }

    pub fn lookup(&self, pipeline: Pipeline, tag: &str) -> &Variant {
        match self.variants.get(&(pipeline, tag.to_string())) {
            Some(variant) => variant,
            None => {
                log::info!(
                    "no {} variant for fault model {:?}; using {}",
                    pipeline,
                    tag,
                    self.base.name
                );
                &self.base
            }
        }
    }

    /// Registered tags for `pipeline`, sorted.
    pub fn tags(&self, pipeline: Pipeline) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .variants
            .keys()
            .filter(|(p, _)| *p == pipeline)
            .map(|(_, tag)| tag.as_str())
            .collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::HookSlot;

    #[test]
    fn builtin_tags_per_pipeline() {
        let registry = VariantRegistry::builtin();
        assert_eq!(
            registry.tags(Pipeline::Atpg),
            vec![
                "bridging",
                "experimental",
                "hold_time",
                "iddq",
                "path_delay",
                "stuck",
                "transition"
            ]
        );
        assert_eq!(
            registry.tags(Pipeline::FaultSim),
            vec!["bridging", "iddq", "stuck", "transition"]
        );
        assert!(registry.tags(Pipeline::ScanInsert).is_empty());
    }

    #[test]
    fn unknown_tag_falls_back_to_base() {
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::FaultSim, tags::PATH_DELAY);
        assert_eq!(variant.name, "default");
        assert!(variant.hooks.overridden().is_empty());
        assert_eq!(variant.prerequisite, Prerequisite::None);
    }

    #[test]
    fn tags_are_case_sensitive() {
        let registry = VariantRegistry::builtin();
        assert_eq!(registry.lookup(Pipeline::Atpg, "Stuck").name, "default");
    }

    #[test]
    fn register_replaces_existing_tag() {
        let mut registry = VariantRegistry::builtin();
        let previous = registry.register(Pipeline::Atpg, tags::STUCK, Variant::BASE);
        assert_eq!(previous.map(|v| v.name), Some(tags::STUCK));
        assert_eq!(registry.lookup(Pipeline::Atpg, tags::STUCK).name, "default");
    }

    #[test]
    fn pipelines_are_independent() {
        let registry = VariantRegistry::builtin();
        let atpg = registry.lookup(Pipeline::Atpg, tags::BRIDGING);
        let fault_sim = registry.lookup(Pipeline::FaultSim, tags::BRIDGING);
        assert_eq!(atpg.prerequisite, Prerequisite::BridgingSites);
        assert_eq!(fault_sim.prerequisite, Prerequisite::None);
        assert!(atpg.hooks.get(HookSlot::AtpgOptions).is_some());
        assert!(fault_sim.hooks.get(HookSlot::AtpgOptions).is_none());
    }
}
