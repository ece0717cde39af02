// SPDX-License-Identifier: Apache-2.0

//! Script assembly engine.
//!
//! Every pipeline is a fixed table of [`PhaseStep`]s. A step emits fixed text,
//! dispatches to a hook slot, or both; hook slots resolve to the selected
//! variant's override when it has one and to the shared default otherwise.
//! Variants therefore change what a phase says, never where it appears.

use crate::clauses;
use crate::directive_writer::{DirectiveWriter, Script};
use crate::phase::Phase;
use crate::registry::Variant;
use crate::resolved_config::ResolvedConfig;
use crate::{atpg, fault_sim, scan_insert};

/// Emits the directives for one step (or one hook) into the writer.
pub type HookFn = fn(&ResolvedConfig<'_>, &mut DirectiveWriter);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    ScanInsert,
    Atpg,
    FaultSim,
}

impl Pipeline {
    pub fn name(&self) -> &'static str {
        match self {
            Pipeline::ScanInsert => "scan-insert",
            Pipeline::Atpg => "atpg",
            Pipeline::FaultSim => "fault-sim",
        }
    }

    /// The fixed phase table for this pipeline.
    pub fn phases(&self) -> &'static [PhaseStep] {
        match self {
            Pipeline::ScanInsert => scan_insert::PHASES,
            Pipeline::Atpg => atpg::PHASES,
            Pipeline::FaultSim => fault_sim::PHASES,
        }
    }

    /// Pipeline-qualified replacement for the generic `_report` marker in the
    /// summary file name, for the pipelines that write a summary.
    pub fn summary_marker(&self) -> Option<&'static str> {
        match self {
            Pipeline::ScanInsert => None,
            Pipeline::Atpg => Some("_ATPG_report"),
            Pipeline::FaultSim => Some("_FS_report"),
        }
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The steps a variant may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSlot {
    FaultModel,
    DelayOptions,
    AtpgOptions,
    FaultSource,
    PatternOptions,
    Run,
}

impl HookSlot {
    /// Shared implementation used when a variant leaves the slot alone.
    pub fn default_hook(&self) -> HookFn {
        match self {
            HookSlot::FaultModel => clauses::fault_model_stuck,
            HookSlot::DelayOptions => clauses::nothing,
            HookSlot::AtpgOptions => clauses::nothing,
            HookSlot::FaultSource => clauses::fault_source_all,
            HookSlot::PatternOptions => clauses::nothing,
            HookSlot::Run => clauses::run_atpg,
        }
    }
}

/// Per-slot overrides; `None` means "use the shared default".
#[derive(Clone, Copy, Default)]
pub struct Hooks {
    pub fault_model: Option<HookFn>,
    pub delay_options: Option<HookFn>,
    pub atpg_options: Option<HookFn>,
    pub fault_source: Option<HookFn>,
    pub pattern_options: Option<HookFn>,
    pub run: Option<HookFn>,
}

impl Hooks {
    /// No overrides at all.
    pub const NONE: Hooks = Hooks {
        fault_model: None,
        delay_options: None,
        atpg_options: None,
        fault_source: None,
        pattern_options: None,
        run: None,
    };

    pub fn get(&self, slot: HookSlot) -> Option<HookFn> {
        match slot {
            HookSlot::FaultModel => self.fault_model,
            HookSlot::DelayOptions => self.delay_options,
            HookSlot::AtpgOptions => self.atpg_options,
            HookSlot::FaultSource => self.fault_source,
            HookSlot::PatternOptions => self.pattern_options,
            HookSlot::Run => self.run,
        }
    }

    /// Slots this set overrides.
    pub fn overridden(&self) -> Vec<HookSlot> {
        [
            HookSlot::FaultModel,
            HookSlot::DelayOptions,
            HookSlot::AtpgOptions,
            HookSlot::FaultSource,
            HookSlot::PatternOptions,
            HookSlot::Run,
        ]
        .into_iter()
        .filter(|slot| self.get(*slot).is_some())
        .collect()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("overridden", &self.overridden())
            .finish()
    }
}

/// One entry of a pipeline's phase table: optional fixed text, then an
/// optional hook slot.
#[derive(Clone, Copy)]
pub struct PhaseStep {
    pub phase: Phase,
    pub before: Option<HookFn>,
    pub hook: Option<HookSlot>,
}

impl PhaseStep {
    pub const fn fixed(phase: Phase, emit: HookFn) -> Self {
        PhaseStep {
            phase,
            before: Some(emit),
            hook: None,
        }
    }

    pub const fn hook(phase: Phase, slot: HookSlot) -> Self {
        PhaseStep {
            phase,
            before: None,
            hook: Some(slot),
        }
    }

    pub const fn fixed_then_hook(phase: Phase, before: HookFn, slot: HookSlot) -> Self {
        PhaseStep {
            phase,
            before: Some(before),
            hook: Some(slot),
        }
    }
}

impl std::fmt::Debug for PhaseStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseStep")
            .field("phase", &self.phase)
            .field("hook", &self.hook)
            .finish()
    }
}

/// Runs a pipeline's phase table against one variant and one resolved
/// configuration.
///
/// Construction never fails and assembly has no side effects: all validation
/// happened when the [`ResolvedConfig`] was derived, and all collaborator work
/// happens before the assembler is built.
pub struct ScriptAssembler<'a> {
    pipeline: Pipeline,
    variant: &'a Variant,
    config: ResolvedConfig<'a>,
}

impl<'a> ScriptAssembler<'a> {
    pub fn new(pipeline: Pipeline, variant: &'a Variant, config: ResolvedConfig<'a>) -> Self {
        ScriptAssembler {
            pipeline,
            variant,
            config,
        }
    }

    pub fn resolved_config(&self) -> &ResolvedConfig<'a> {
        &self.config
    }

    pub fn assemble(&self) -> Script {
        log::info!(
            "ScriptAssembler::assemble; pipeline: {}; variant: {}",
            self.pipeline,
            self.variant.name
        );
        let mut writer = DirectiveWriter::new();
        for step in self.pipeline.phases() {
            writer.begin_phase(step.phase);
            if let Some(before) = step.before {
                before(&self.config, &mut writer);
            }
            if let Some(slot) = step.hook {
                let emit = match self.variant.hooks.get(slot) {
                    Some(hook) => {
                        log::debug!("phase {}: {} override for {:?}", step.phase, self.variant.name, slot);
                        hook
                    }
                    None => slot.default_hook(),
                };
                emit(&self.config, &mut writer);
            }
        }
        writer.finish()
    }
}
