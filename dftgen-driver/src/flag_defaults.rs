// SPDX-License-Identifier: Apache-2.0

//! Central definition of default flag values used by the driver subcommands.

// -- Output scripts

/// `scan-insert --output`.
pub const SCAN_INSERT_OUTPUT: &str = "dft_dc.tcl";

/// `atpg --output`.
pub const ATPG_OUTPUT: &str = "atpg.tcl";

/// `fault-sim --output`.
pub const FAULT_SIM_OUTPUT: &str = "faultsim.tcl";

// -- Bridging site sampling

/// `atpg --seed`.
pub const BRIDGING_SEED: u64 = 0;

// -- Toolchain

/// Toolchain file picked up from the current directory when `--toolchain` is
/// not given.
pub const TOOLCHAIN_FILE: &str = "dftgen-toolchain.toml";

/// Timing shell run to extract delay paths.
pub const PT_SHELL: &str = "pt_shell";

// -- show-config

pub const SHOW_CONFIG_PRETTY: bool = true;
