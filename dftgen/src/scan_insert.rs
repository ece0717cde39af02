// SPDX-License-Identifier: Apache-2.0

//! Scan-insertion script for the synthesis shell. There are no fault-model
//! variants here; every phase is fixed text.

use std::path::Path;

use crate::directive_writer::DirectiveWriter;
use crate::engine::PhaseStep;
use crate::phase::Phase;
use crate::resolved_config::ResolvedConfig;

const NETLIST_DIR: &str = "./Netlist/";
const REPORT_DIR: &str = "./rpt/";

pub static PHASES: &[PhaseStep] = &[
    PhaseStep::fixed(Phase::WorkDir, work_dir),
    PhaseStep::fixed(Phase::Libraries, libraries),
    PhaseStep::fixed(Phase::ReadDesign, read_design),
    PhaseStep::fixed(Phase::TestDefaults, test_defaults),
    PhaseStep::fixed(Phase::TestProtocol, test_protocol),
    PhaseStep::fixed(Phase::ScanConfiguration, scan_configuration),
    PhaseStep::fixed(Phase::InsertDft, insert_dft),
    PhaseStep::fixed(Phase::WriteOutputs, write_outputs),
    PhaseStep::fixed(Phase::Reports, reports),
    PhaseStep::fixed(Phase::Terminate, terminate),
];

/// Timing constraints that accompany the synthesized netlist.
pub fn constraints_file(synthesized: &str) -> String {
    Path::new(synthesized)
        .with_extension("sdc")
        .to_string_lossy()
        .into_owned()
}

fn work_dir(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("sh mkdir -p rpt");
    w.blank();
}

fn libraries(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!(
        "set search_path      \". {} $search_path\"",
        rc.config.db_library
    ));
    w.line("set target_library   \"slow.db                 \\");
    w.line("    fast.db                 \\");
    w.line("    typical.db              \\");
    w.line("\"");
    w.line("set link_library     \"* $target_library\"");
    w.blank();
}

fn read_design(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let c = rc.config;
    w.line(format!("set my_toplevel {}", c.top_module));
    w.line(format!("read_verilog {}", c.synthesized_files));
    w.line("current_design $my_toplevel");
    w.line("link");
    w.line(format!("source {}", constraints_file(&c.synthesized_files)));
    w.blank();
}

fn test_defaults(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!("set test_default_scan_style {}", rc.config.scan_style));
    w.line("set test_default_delay 0");
    w.line("set test_default_bidir_delay 0");
    w.line("set test_default_strobe 40");
    w.line("set test_default_period 100");
    w.blank();
}

fn test_protocol(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("create_test_protocol -infer_asynch -infer_clock");
    w.line("dft_drc");
    w.blank();
}

fn scan_configuration(rc: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line(format!(
        "set_scan_configuration -chain_count {}",
        rc.config.num_scan_chain
    ));
    w.line("set_dft_configuration -fix_clock enable");
    w.line("set_dft_configuration -fix_reset enable");
    w.line("set_dft_configuration -fix_set enable");
    w.blank();
}

fn insert_dft(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("preview_dft");
    w.line("insert_dft");
    w.blank();
    w.line("dft_drc");
    w.blank();
    w.line("check_design");
    w.blank();
}

/// Sets `$filename` to `<top><suffix>`.
fn set_filename(w: &mut DirectiveWriter, suffix: &str) {
    w.line(format!(
        "set filename [format \"%s%s\"  $my_toplevel \"{}\"]",
        suffix
    ));
}

fn under(dir: &str, name: &str) -> String {
    format!("[format \"%s%s\"  \"{}\" {}]", dir, name)
}

fn write_outputs(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    let outputs: [(&str, &str); 5] = [
        ("_dft.v", "write -f verilog -hier -output"),
        ("_dft.spf", "write_test_protocol -output"),
        ("_dft.ddc", "write -f ddc -hier -output"),
        ("_dft.sdf", "write_sdf -version 2.1"),
        ("_dft.spef", "write_parasitics -output"),
    ];
    for (suffix, command) in outputs {
        set_filename(w, suffix);
        w.line(format!("{} {}", command, under(NETLIST_DIR, "$filename")));
        w.blank();
    }
}

fn reports(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    for suffix in ["_dft.scan_path", "_dft.cell"] {
        set_filename(w, suffix);
        w.line(format!(
            "redirect {} {{ report_constraint -all_violators -verbose }}",
            under(REPORT_DIR, "$filename")
        ));
        w.blank();
    }

    let area = format!(
        "[format \"%s%s\"  {} \".area\"]",
        under(REPORT_DIR, "$my_toplevel")
    );
    let redirects: [(String, &str); 5] = [
        (under(REPORT_DIR, "violation.rpt"), "report_constraint -all_violators -verbose"),
        (area, "report_area"),
        (under(REPORT_DIR, "timing.rpt"), "report_timing"),
        (under(REPORT_DIR, "cell.rpt"), "report_cell"),
        (under(REPORT_DIR, "power.rpt"), "report_power"),
    ];
    for (target, command) in redirects {
        w.line(format!("redirect {} {{ {} }}", target, command));
    }
}

fn terminate(_: &ResolvedConfig<'_>, w: &mut DirectiveWriter) {
    w.line("exit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::*;
    use crate::config::{Config, ScanStyle};
    use crate::engine::{Pipeline, ScriptAssembler};
    use crate::registry::VariantRegistry;

    fn assemble(config: &Config) -> crate::Script {
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::ScanInsert, &config.fault_model);
        let rc = ResolvedConfig::derive(config, Pipeline::ScanInsert, variant).unwrap();
        ScriptAssembler::new(Pipeline::ScanInsert, variant, rc).assemble()
    }

    #[test]
    fn constraints_file_replaces_the_extension() {
        assert_eq!(constraints_file("./Netlist/s1423_syn.v"), "./Netlist/s1423_syn.sdc");
        assert_eq!(constraints_file("design"), "design.sdc");
    }

    #[test]
    fn scan_style_and_chain_count_come_from_config() {
        let config = Config {
            scan_style: ScanStyle::Lssd,
            num_scan_chain: 3,
            ..s1423_config()
        };
        let script = assemble(&config);
        assert!(script
            .section(Phase::TestDefaults)
            .unwrap()
            .starts_with("set test_default_scan_style lssd\n"));
        assert!(script
            .section(Phase::ScanConfiguration)
            .unwrap()
            .starts_with("set_scan_configuration -chain_count 3\n"));
    }

    #[test]
    fn summary_path_is_not_rewritten() {
        let config = s1423_config();
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::ScanInsert, "stuck");
        let rc = ResolvedConfig::derive(&config, Pipeline::ScanInsert, variant).unwrap();
        assert_eq!(rc.summary_file, config.summary_file);
    }

    #[test]
    fn reports_cover_scan_path_and_cell_files() {
        let script = assemble(&s1423_config());
        let reports = script.section(Phase::Reports).unwrap();
        let constraint = "redirect [format \"%s%s\"  \"./rpt/\" $filename] { report_constraint -all_violators -verbose }\n\n";
        assert!(reports.starts_with(&format!(
            "set filename [format \"%s%s\"  $my_toplevel \"_dft.scan_path\"]\n{}\
             set filename [format \"%s%s\"  $my_toplevel \"_dft.cell\"]\n{}",
            constraint, constraint
        )));
    }

    #[test]
    fn ends_with_exit() {
        let script = assemble(&s1423_config());
        assert!(script.text().ends_with("{ report_power }\nexit\n"));
        assert_eq!(script.phases(), PHASES.iter().map(|s| s.phase).collect::<Vec<_>>());
    }
}
