// SPDX-License-Identifier: Apache-2.0

//! This is a command line driver program that writes the control scripts of a
//! design-for-test flow from a TOML configuration file.
//!
//! Commands are given like:
//!
//! ```text
//! dftgen-driver <global-options> <command> <command-args-and-options>
//! ```
//!
//! Commands are:
//!
//! - scan-insert: Writes the scan-insertion script for the synthesis shell.
//! - atpg: Writes the ATPG script, producing collaborator files (bridging node
//!   pairs, delay path report) first when the fault model needs them.
//! - fault-sim: Writes the fault-simulation script.
//! - show-config: Prints the parsed configuration as JSON.
//!
//! Sample usage:
//!
//! ```shell
//! $ cargo run -- atpg --config dftgen.toml --output atpg.tcl
//! $ cargo run -- --toolchain=$HOME/dftgen-toolchain.toml \
//!     atpg --config dftgen.toml --output run/atpg.tcl --work_dir run
//! $ cargo run -- show-config --config dftgen.toml
//! ```

mod atpg;
mod common;
mod fault_sim;
mod flag_defaults;
mod report_cli_error;
mod scan_insert;
mod show_config;
mod toolchain_config;
mod tools;

use crate::toolchain_config::ToolchainConfig;
use clap::{Arg, ArgAction};
use report_cli_error::report_cli_error_and_exit;
use serde::Deserialize;

#[derive(Deserialize)]
struct DftgenToolchain {
    toolchain: ToolchainConfig,
}

trait AppExt {
    fn add_config_arg(self) -> Self;
    fn add_output_arg(self, default: &'static str) -> Self;
    fn add_work_dir_arg(self) -> Self;
    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self;
}

impl AppExt for clap::Command {
    fn add_config_arg(self) -> Self {
        (self as clap::Command).arg(
            Arg::new("config")
                .long("config")
                .value_name("CONFIG_TOML")
                .help("The configuration file")
                .required(true)
                .action(ArgAction::Set),
        )
    }

    fn add_output_arg(self, default: &'static str) -> Self {
        (self as clap::Command).arg(
            Arg::new("output")
                .long("output")
                .value_name("OUTPUT_PATH")
                .help("Path of the script to write")
                .default_value(default)
                .action(ArgAction::Set),
        )
    }

    fn add_work_dir_arg(self) -> Self {
        (self as clap::Command).arg(
            Arg::new("work_dir")
                .long("work_dir")
                .value_name("WORK_DIR")
                .help("Directory for collaborator files; defaults to the directory of the output script")
                .action(ArgAction::Set),
        )
    }

    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self {
        (self as clap::Command).arg(
            Arg::new(long)
                .long(long)
                .value_name("BOOL")
                .action(ArgAction::Set)
                .value_parser(["true", "false"])
                .num_args(1)
                .help(help),
        )
    }
}

fn main() {
    let _ = env_logger::try_init();

    let matches = clap::Command::new("dftgen-driver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Writes scan insertion, ATPG and fault simulation scripts")
        .arg(
            Arg::new("toolchain")
                .long("toolchain")
                .value_name("TOOLCHAIN")
                .help("Path to a dftgen-toolchain.toml file")
                .action(ArgAction::Set),
        )
        .subcommand(
            clap::Command::new("scan-insert")
                .about("Writes the scan-insertion script")
                .add_config_arg()
                .add_output_arg(flag_defaults::SCAN_INSERT_OUTPUT),
        )
        .subcommand(
            clap::Command::new("atpg")
                .about("Writes the ATPG script")
                .add_config_arg()
                .add_output_arg(flag_defaults::ATPG_OUTPUT)
                .add_work_dir_arg()
                .arg(
                    Arg::new("bridging_pairs")
                        .long("bridging_pairs")
                        .value_name("COUNT")
                        .help("Number of node pairs sampled for the bridging fault model")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for bridging node pair sampling")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("tool_path")
                        .long("tool_path")
                        .value_name("TOOL_PATH")
                        .help("Directory holding pt_shell; overrides the toolchain file")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            clap::Command::new("fault-sim")
                .about("Writes the fault-simulation script")
                .add_config_arg()
                .add_output_arg(flag_defaults::FAULT_SIM_OUTPUT)
                .add_work_dir_arg(),
        )
        .subcommand(
            clap::Command::new("show-config")
                .about("Prints the parsed configuration as JSON")
                .add_config_arg()
                .add_bool_arg("pretty", "Pretty-print the JSON (default: true)"),
        )
        .subcommand(clap::Command::new("version").about("Prints the driver version"))
        .get_matches();

    let mut toml_path: Option<String> = matches
        .get_one::<String>("toolchain")
        .map(|s| s.to_string());

    // If there is no toolchain flag specified, but there is a
    // dftgen-toolchain.toml in the current directory, use that.
    if toml_path.is_none() {
        let cwd_toml_path = std::path::Path::new(flag_defaults::TOOLCHAIN_FILE);
        if cwd_toml_path.exists() {
            log::info!(
                "Using {} in current directory",
                flag_defaults::TOOLCHAIN_FILE
            );
            toml_path = Some(flag_defaults::TOOLCHAIN_FILE.to_string());
        }
    }

    let toolchain: Option<ToolchainConfig> = toml_path.map(|path| load_toolchain(&path));

    let (subcommand, result) = match matches.subcommand() {
        Some(("scan-insert", matches)) => ("scan-insert", scan_insert::handle_scan_insert(matches)),
        Some(("atpg", matches)) => ("atpg", atpg::handle_atpg(matches, &toolchain)),
        Some(("fault-sim", matches)) => ("fault-sim", fault_sim::handle_fault_sim(matches)),
        Some(("show-config", matches)) => ("show-config", show_config::handle_show_config(matches)),
        Some(("version", _)) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => report_cli_error_and_exit("No valid subcommand provided.", None, vec![]),
    };
    if let Err(e) = result {
        report_cli_error_and_exit(&format!("{:#}", e), Some(subcommand), vec![]);
    }
}

fn load_toolchain(path: &str) -> ToolchainConfig {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let toml_str = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => report_cli_error_and_exit(
            "could not read toolchain toml file",
            None,
            vec![
                ("path", path),
                ("working directory", &cwd),
                ("error", &e.to_string()),
            ],
        ),
    };
    match toml::from_str::<DftgenToolchain>(&toml_str) {
        Ok(parsed) => parsed.toolchain,
        Err(e) => report_cli_error_and_exit(
            "could not parse toolchain toml file",
            None,
            vec![("path", path), ("error", &e.to_string())],
        ),
    }
}
