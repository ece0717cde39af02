// SPDX-License-Identifier: Apache-2.0

//! ATPG script: phase table and fault-model variants.

use crate::clauses;
use crate::delay_path_script::delay_report_file;
use crate::directive_writer::DirectiveWriter;
use crate::engine::{HookFn, HookSlot, Hooks, PhaseStep, Pipeline};
use crate::phase::Phase;
use crate::registry::{tags, Prerequisite, Variant, VariantRegistry};
use crate::resolved_config::{validate_capture_cycle, validate_experimental_static, ResolvedConfig};

pub static PHASES: &[PhaseStep] = &[
    PhaseStep::fixed(Phase::Setup, setup),
    PhaseStep::fixed(Phase::AtpgMode, clauses::atpg_mode),
    PhaseStep::hook(Phase::FaultModel, HookSlot::FaultModel),
    PhaseStep::fixed(Phase::FaultReporting, clauses::fault_reporting),
    PhaseStep::hook(Phase::DelayOptions, HookSlot::DelayOptions),
    PhaseStep::hook(Phase::AtpgOptions, HookSlot::AtpgOptions),
    PhaseStep::hook(Phase::FaultSource, HookSlot::FaultSource),
    PhaseStep::hook(Phase::Run, HookSlot::Run),
    PhaseStep::fixed(Phase::Output, output),
];

fn setup(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.banner("ATPG");
    w.blank();
    clauses::read_design(rc, w);
    clauses::run_drc(rc, w);
}

fn output(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    clauses::summaries(rc, w);
    w.line(format!(
        "write_patterns {} -format STIL -replace",
        rc.config.patterns_file
    ));
    w.blank();
    w.line("exit");
}

// -- Variant hooks

fn run_atpg_ndetect(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    if rc.config.auto_compression {
        w.line(format!("run_atpg -auto_compression -ndetect {}", rc.config.n_detect));
    } else {
        w.line(format!("run_atpg -ndetect {}", rc.config.n_detect));
    }
    w.blank();
}

fn iddq_model(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let c = rc.config;
    w.line("set_faults -model iddq");
    if c.iddq_toggle {
        w.line("set_iddq -toggle");
    }
    if !c.iddq_float {
        w.line("set_iddq nofloat");
    }
    if !c.iddq_strong {
        w.line("set_iddq nostrong");
    }
    w.line(format!("set_iddq -interval_size {}", c.iddq_interval_size));
}

fn system_clock_launch(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_delay -launch system_clock");
    w.blank();
}

fn bridging_options(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    if rc.config.bridging_optimize_bridge_strengths {
        w.line("set_atpg -optimize_bridge_strengths");
    }
    w.line("set_atpg -merge high");
}

fn delay_paths(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!(
        "add_delay_paths {}",
        delay_report_file(&rc.config.top_module)
    ));
    w.blank();
}

fn path_delay_model(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model path_delay");
    delay_paths(rc, w);
}

fn hold_time_model(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model hold_time");
    delay_paths(rc, w);
}

fn static_expression(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let expr = rc.config.experimental_static.as_deref().unwrap_or_default();
    w.line(format!("set_static {}", expr.trim()));
}

const fn model_only(name: &'static str, fault_model: HookFn, prerequisite: Prerequisite) -> Variant {
    Variant {
        name,
        hooks: Hooks {
            fault_model: Some(fault_model),
            ..Hooks::NONE
        },
        validate: None,
        prerequisite,
    }
}

pub const STUCK: Variant = Variant {
    name: tags::STUCK,
    hooks: Hooks {
        fault_model: Some(clauses::fault_model_stuck),
        run: Some(run_atpg_ndetect),
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
        delay_options: Some(system_clock_launch),
        atpg_options: Some(clauses::iddq_pattern_limit),
        ..Hooks::NONE
    },
    validate: Some(validate_capture_cycle),
    prerequisite: Prerequisite::None,
};

pub const BRIDGING: Variant = Variant {
    name: tags::BRIDGING,
    hooks: Hooks {
        fault_model: Some(clauses::fault_model_bridging),
        atpg_options: Some(bridging_options),
        fault_source: Some(clauses::fault_source_node_file),
        ..Hooks::NONE
    },
    validate: None,
    prerequisite: Prerequisite::BridgingSites,
};

pub const PATH_DELAY: Variant =
    model_only(tags::PATH_DELAY, path_delay_model, Prerequisite::DelayPaths);

pub const HOLD_TIME: Variant =
    model_only(tags::HOLD_TIME, hold_time_model, Prerequisite::DelayPaths);

pub const EXPERIMENTAL: Variant = Variant {
    validate: Some(validate_experimental_static),
    ..model_only(tags::EXPERIMENTAL, static_expression, Prerequisite::None)
};

pub fn register_variants(registry: &mut VariantRegistry) {
    for variant in [
        STUCK,
        TRANSITION,
        IDDQ,
        BRIDGING,
        PATH_DELAY,
        HOLD_TIME,
        EXPERIMENTAL,
    ] {
        registry.register(Pipeline::Atpg, variant.name, variant);
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
        let rc = ResolvedConfig::derive(config, Pipeline::Atpg, variant).unwrap();
        ScriptAssembler::new(Pipeline::Atpg, variant, rc).assemble()
    }

    #[test]
    fn iddq_model_flags() {
        let config = Config {
            iddq_toggle: false,
            iddq_float: false,
            iddq_strong: false,
            iddq_interval_size: 3,
            ..with_fault_model(tags::IDDQ)
        };
        let script = assemble(&config, &IDDQ);
        assert_eq!(
            script.section(Phase::FaultModel),
            Some("set_faults -model iddq\nset_iddq nofloat\nset_iddq nostrong\nset_iddq -interval_size 3\n")
        );
        assert_eq!(
            script.section(Phase::DelayOptions),
            Some("set_delay -launch system_clock\n\n")
        );
        assert_eq!(
            script.section(Phase::AtpgOptions),
            Some("set_atpg -patterns 1000\n\n")
        );
    }

    #[test]
    fn bridging_strength_optimization_is_optional() {
        let config = Config {
            bridging_optimize_bridge_strengths: false,
            ..with_fault_model(tags::BRIDGING)
        };
        let script = assemble(&config, &BRIDGING);
        assert_eq!(script.section(Phase::AtpgOptions), Some("set_atpg -merge high\n"));
        let script = assemble(&with_fault_model(tags::BRIDGING), &BRIDGING);
        assert_eq!(
            script.section(Phase::AtpgOptions),
            Some("set_atpg -optimize_bridge_strengths\nset_atpg -merge high\n")
        );
    }

    #[test]
    fn delay_path_models_read_the_extracted_report() {
        let config = with_fault_model(tags::HOLD_TIME);
        let script = assemble(&config, &HOLD_TIME);
        assert_eq!(
            script.section(Phase::FaultModel),
            Some("set_faults -model hold_time\nadd_delay_paths s1423_delay.rpt\n\n")
        );
        assert_eq!(script.section(Phase::FaultSource), Some("add_faults -all\n\n"));
    }

    #[test]
    fn experimental_clause_is_its_own_line() {
        let config = Config {
            experimental_static: Some("-max_iterations 5".to_string()),
            ..with_fault_model(tags::EXPERIMENTAL)
        };
        let script = assemble(&config, &EXPERIMENTAL);
        assert_eq!(
            script.section(Phase::FaultModel),
            Some("set_static -max_iterations 5\n")
        );
        assert!(script
            .text()
            .contains("set_static -max_iterations 5\nset_faults -report collapsed\n"));
    }

    #[test]
    fn remove_fault_leaves_the_fault_list_alone() {
        for remove_fault in [0, 30, 100, 250] {
            let config = Config {
                remove_fault: Some(remove_fault),
                ..s1423_config()
            };
            let script = assemble(&config, &STUCK);
            assert_eq!(script.section(Phase::FaultSource), Some("add_faults -all\n\n"));
            assert!(!script.text().contains("remove_faults"));
        }
    }

    #[test]
    fn output_ends_with_exit() {
        let script = assemble(&s1423_config(), &STUCK);
        assert_eq!(
            script.section(Phase::Output),
            Some(
                "report_summaries\n\
                 report_summaries > ./Netlist/s1423_ATPG_report.rpt\n\n\
                 write_faults ./Netlist/s1423.fault -all -replace\n\n\
                 write_patterns ./Netlist/s1423.stil -format STIL -replace\n\n\
                 exit\n"
            )
        );
    }
}
