// SPDX-License-Identifier: Apache-2.0

//! Fault-simulation script: grades an existing pattern set against the fault
//! list written by a previous ATPG run.

use crate::clauses;
use crate::directive_writer::DirectiveWriter;
use crate::engine::{HookSlot, Hooks, PhaseStep, Pipeline};
use crate::phase::Phase;
use crate::registry::{tags, Prerequisite, Variant, VariantRegistry};
use crate::resolved_config::{validate_capture_cycle, ResolvedConfig};

/// Clock and scan-enable pins of the scan-inserted netlist.
const CLOCK_PIN: &str = "CK";
const SCAN_ENABLE_PIN: &str = "test_se";

pub static PHASES: &[PhaseStep] = &[
    PhaseStep::fixed(Phase::Setup, setup),
    PhaseStep::fixed(Phase::ClockConstraints, clock_constraints),
    PhaseStep::fixed(Phase::DesignRuleCheck, clauses::run_drc),
    PhaseStep::hook(Phase::FaultModel, HookSlot::FaultModel),
    PhaseStep::fixed(Phase::FaultReporting, clauses::fault_reporting),
    PhaseStep::fixed(Phase::ReadFaults, read_faults),
    PhaseStep::fixed_then_hook(Phase::ReadPatterns, external_patterns, HookSlot::PatternOptions),
    PhaseStep::hook(Phase::DelayOptions, HookSlot::DelayOptions),
    PhaseStep::hook(Phase::AtpgOptions, HookSlot::AtpgOptions),
    PhaseStep::hook(Phase::FaultSource, HookSlot::FaultSource),
    PhaseStep::fixed(Phase::SimulationMeasure, simulation_measure),
    PhaseStep::fixed(Phase::FaultSimRun, run_fault_sim),
    PhaseStep::fixed(Phase::Output, output),
];

fn setup(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.banner("FaultSim");
    w.blank();
    clauses::read_design(rc, w);
}

fn clock_constraints(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("add_clocks 0 {}", CLOCK_PIN));
    w.line(format!("add_pi_constraint 0 {}", SCAN_ENABLE_PIN));
    w.blank();
}

fn read_faults(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("read_faults {}", rc.config.faults_file));
}

fn external_patterns(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set_patterns -external {}", rc.config.patterns_file));
}

fn simulation_measure(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_simulation -measure pat");
    w.line("run_simulation -sequential");
    w.blank();
}

fn run_fault_sim(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let mut command = String::from("run_fault_sim");
    if rc.config.simulation_sequential {
        command.push_str(" -sequential");
    }
    if rc.config.simulation_sequential_nodrop {
        command.push_str(" -sequential_nodrop");
    }
    w.line(command);
    w.blank();
}

fn output(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    clauses::summaries(rc, w);
    w.line("exit");
}

fn iddq_model(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model IDDQ");
}

pub const STUCK: Variant = Variant {
    name: tags::STUCK,
    hooks: Hooks {
        fault_model: Some(clauses::fault_model_stuck),
        ..Hooks::NONE
    },
    validate: None,
    prerequisite: Prerequisite::None,
};

pub const TRANSITION: Variant = Variant {
    name: tags::TRANSITION,
    hooks: Hooks {
        fault_model: Some(clauses::fault_model_transition),
        delay_options: Some(clauses::launch_cycle),
        atpg_options: Some(clauses::capture_cycle),
        ..Hooks::NONE
    },
    validate: Some(validate_capture_cycle),
    prerequisite: Prerequisite::None,
};

pub const IDDQ: Variant = Variant {
    name: tags::IDDQ,
    hooks: Hooks {
        fault_model: Some(iddq_model),
        delay_options: Some(clauses::launch_cycle),
        atpg_options: Some(clauses::iddq_pattern_limit),
        ..Hooks::NONE
    },
    validate: Some(validate_capture_cycle),
    prerequisite: Prerequisite::None,
};

/// Reuses the node file left behind by the ATPG run.
pub const BRIDGING: Variant = Variant {
    name: tags::BRIDGING,
    hooks: Hooks {
        fault_model: Some(clauses::fault_model_bridging),
        fault_source: Some(clauses::fault_source_node_file),
        ..Hooks::NONE
    },
    validate: None,
    prerequisite: Prerequisite::None,
};

pub fn register_variants(registry: &mut VariantRegistry) {
    for variant in [STUCK, TRANSITION, IDDQ, BRIDGING] {
        registry.register(Pipeline::FaultSim, variant.name, variant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::*;
    use crate::config::Config;
    use crate::engine::ScriptAssembler;
    use pretty_assertions::assert_eq;

    fn assemble(config: &Config, variant: &Variant) -> crate::Script {
        let rc = ResolvedConfig::derive(config, Pipeline::FaultSim, variant).unwrap();
        ScriptAssembler::new(Pipeline::FaultSim, variant, rc).assemble()
    }

    #[test]
    fn sequential_flags_extend_the_run_command() {
        let config = Config {
            simulation_sequential: true,
            simulation_sequential_nodrop: true,
            ..s1423_config()
        };
        let script = assemble(&config, &STUCK);
        assert_eq!(
            script.section(Phase::FaultSimRun),
            Some("run_fault_sim -sequential -sequential_nodrop\n\n")
        );
        let script = assemble(&s1423_config(), &STUCK);
        assert_eq!(script.section(Phase::FaultSimRun), Some("run_fault_sim\n\n"));
    }

    #[test]
    fn output_has_no_pattern_write() {
        let script = assemble(&s1423_config(), &STUCK);
        assert!(!script.text().contains("write_patterns"));
        assert_eq!(
            script.section(Phase::Output),
            Some(
                "report_summaries\n\
                 report_summaries > ./Netlist/s1423_FS_report.rpt\n\n\
                 write_faults ./Netlist/s1423.fault -all -replace\n\n\
                 exit\n"
            )
        );
    }

    #[test]
    fn iddq_uses_configured_launch_cycle() {
        let config = Config {
            launch_cycle: "last_shift".to_string(),
            ..with_fault_model(tags::IDDQ)
        };
        let script = assemble(&config, &IDDQ);
        assert_eq!(script.section(Phase::FaultModel), Some("set_faults -model IDDQ\n"));
        assert_eq!(
            script.section(Phase::DelayOptions),
            Some("set_delay -launch last_shift\n\n")
        );
    }

    #[test]
    fn patterns_are_read_before_the_fault_source() {
        let script = assemble(&with_fault_model(tags::BRIDGING), &BRIDGING);
        let text = script.text();
        let patterns = text.find("set_patterns -external ./Netlist/s1423.stil\n").unwrap();
        let faults = text.find("add_faults -node_file nodes.txt\n").unwrap();
        assert!(patterns < faults);
    }
}
