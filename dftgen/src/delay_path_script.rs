// SPDX-License-Identifier: Apache-2.0

//! Timing-analysis script that extracts the critical paths the delay-path
//! fault models (`path_delay`, `hold_time`) load with `add_delay_paths`.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::dftgen_error::DftgenError;

/// Name of the auxiliary script handed to the timing shell.
pub const DELAY_PATH_SCRIPT: &str = "pt_path.tcl";

/// Report the timing shell writes for `top`.
pub fn delay_report_file(top: &str) -> String {
    format!("{}_delay.rpt", top)
}

/// Renders the auxiliary timing script for `config`.
pub fn delay_path_script(config: &Config) -> String {
    let top = &config.top_module;
    let lines = [
        "remove_design -all".to_string(),
        format!("set search_path \". {}\"", config.db_library),
        "set link_path \"* typical.db  fast.db  slow.db\"".to_string(),
        String::new(),
        format!("read_verilog {}", config.netlist_file),
        format!("link_design {}", top),
        format!("read_parasitics {}", config.spef_file),
        "set_operating_conditions typical -library typical".to_string(),
        String::new(),
        format!("set CLK_PERIOD {}", config.path_delay_slack),
        "set CLK CK".to_string(),
        "create_clock -period $CLK_PERIOD [get_ports $CLK]".to_string(),
        "set_clock_transition -rise 0.05 [get_clocks $CLK]".to_string(),
        "set_clock_transition -fall 0.03 [get_clocks $CLK]".to_string(),
        "set_clock_latency -rise 0.01 [get_clocks $CLK]".to_string(),
        "set_clock_latency -fall 0.03 [get_clocks $CLK]".to_string(),
        "set_ideal_network [get_ports CK]".to_string(),
        String::new(),
        "source pt2tmax.tcl".to_string(),
        format!(
            "write_delay_paths -max_paths {} -nworst 1 -delay_type max ./{}",
            config.path_delay_max_paths,
            delay_report_file(top)
        ),
        String::new(),
        "exit".to_string(),
    ];
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes the auxiliary script into `work_dir` and returns its path.
pub fn write_delay_path_script(config: &Config, work_dir: &Path) -> Result<PathBuf, DftgenError> {
    let path = work_dir.join(DELAY_PATH_SCRIPT);
    log::info!("write_delay_path_script; path: {}", path.display());
    std::fs::write(&path, delay_path_script(config)).map_err(|e| DftgenError::io(&path, e))?;
    Ok(path)
}

/// Produces the timing-path report for the delay-path fault models.
pub trait DelayPathExtractor {
    /// Runs the extraction in `work_dir` and returns the path of the report.
    fn extract(&self, config: &Config, work_dir: &Path) -> Result<PathBuf, DftgenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn script_uses_slack_and_path_limit() {
        let config = Config {
            path_delay_slack: 0.4,
            path_delay_max_paths: 50,
            ..s1423_config()
        };
        let script = delay_path_script(&config);
        assert!(script.contains("set CLK_PERIOD 0.4\n"));
        assert!(script.contains(
            "write_delay_paths -max_paths 50 -nworst 1 -delay_type max ./s1423_delay.rpt\n"
        ));
    }

    #[test]
    fn script_layout() {
        let script = delay_path_script(&s1423_config());
        let head: Vec<&str> = script.lines().take(9).collect();
        assert_eq!(
            head,
            vec![
                "remove_design -all",
                "set search_path \". /cad/lib/db\"",
                "set link_path \"* typical.db  fast.db  slow.db\"",
                "",
                "read_verilog ./Netlist/s1423_dft.v",
                "link_design s1423",
                "read_parasitics ./Netlist/s1423_dft.spef",
                "set_operating_conditions typical -library typical",
                "",
            ]
        );
        assert!(script.contains("set CLK_PERIOD 0.15\n"));
        assert!(script.ends_with("\n\nexit\n"));
    }

    #[test]
    fn write_into_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_delay_path_script(&s1423_config(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("pt_path.tcl"));
        assert!(std::fs::read_to_string(path)
            .unwrap()
            .starts_with("remove_design -all\n"));
    }
}
