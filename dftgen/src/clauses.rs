// SPDX-License-Identifier: Apache-2.0

//! Directive clauses shared by the ATPG and fault-simulation pipelines.
//!
//! Each function has the [`crate::engine::HookFn`] shape so it can sit in a
//! phase table directly or serve as a hook default or override.

use crate::bridging_sites::NODES_FILE;
use crate::config::PatternSpecification;
use crate::directive_writer::DirectiveWriter;
use crate::resolved_config::ResolvedConfig;

pub fn nothing(_: &ResolvedConfig<'_>, _: &mut DirectiveWriter) {}

/// `read_netlist` for the library and the design, then `run_build_model`.
pub fn read_design(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let c = rc.config;
    w.line(format!("read_netlist {}", c.tech_library));
    w.blank();
    w.line(format!("read_netlist {}", c.netlist_file));
    w.blank();
    w.line(format!("run_build_model {}", c.top_module));
    w.blank();
}

pub fn run_drc(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("run_drc {}", rc.config.spf_file));
    w.blank();
}

pub fn atpg_mode(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set_atpg -coverage {}", rc.config.fault_coverage));
    if rc.config.pattern_specification == PatternSpecification::Partial {
        w.line("set_atpg -fill X");
    }
}

pub fn fault_reporting(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    if rc.config.fault_collapsing {
        w.line("set_faults -report collapsed");
    }
    w.line("set_faults -fault_coverage");
    w.line("set_faults -summary verbose");
    w.blank();
}

// -- Fault model

pub fn fault_model_stuck(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model Stuck");
}

pub fn fault_model_transition(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model transition");
}

pub fn fault_model_bridging(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("set_faults -model bridging");
}

// -- Delay and ATPG options

pub fn launch_cycle(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set_delay -launch {}", rc.config.launch_cycle));
    w.blank();
}

pub fn capture_cycle(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set_atpg -capture {}", rc.capture_cycle));
    w.blank();
}

pub fn iddq_pattern_limit(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set_atpg -patterns {}", rc.config.iddq_max_patterns));
    w.blank();
}

// -- Fault list source

pub fn fault_source_all(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("add_faults -all");
    w.blank();
}

pub fn fault_source_node_file(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("add_faults -node_file {}", NODES_FILE));
    w.blank();
}

// -- Run and output

pub fn run_atpg(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    if rc.config.auto_compression {
        w.line("run_atpg -auto_compression");
    } else {
        w.line("run_atpg");
    }
    w.blank();
}

/// Summary and fault-list output common to both pipelines.
pub fn summaries(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("report_summaries");
    w.line(format!("report_summaries > {}", rc.summary_file));
    w.blank();
    w.line(format!("write_faults {} -all -replace", rc.config.faults_file));
    w.blank();
}
