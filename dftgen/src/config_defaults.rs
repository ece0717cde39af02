// SPDX-License-Identifier: Apache-2.0

//! Central definition of the default values the configuration provider fills
//! in when a key is absent from the configuration file.
//!
//! Generated scripts embed several of these verbatim, so changing one changes
//! the text handed to the downstream tools.

// -- Scan chain insertion

/// Number of scan chains requested from `set_scan_configuration -chain_count`.
pub const NUM_SCAN_CHAIN: u32 = 8;

// -- Fault selection

/// Fault-model tag used when `[fault_types]` does not name one.
pub const FAULT_MODEL: &str = "stuck";

// -- Pattern options

/// `set_atpg -coverage` target, in percent.
pub const FAULT_COVERAGE: u32 = 100;

// -- Stuck-at

/// `run_atpg -ndetect` count.
pub const N_DETECT: u32 = 1;

// -- Transition / IDDQ

/// Launch cycle handed to `set_delay -launch`.
pub const LAUNCH_CYCLE: &str = "any";

/// Capture cycle used when the configuration leaves it out.
pub const CAPTURE_CYCLE: i64 = 4;

/// Inclusive range a capture cycle must lie in for the variants that use it.
pub const CAPTURE_CYCLE_RANGE: std::ops::RangeInclusive<i64> = 2..=10;

/// `set_atpg -patterns` cap for IDDQ pattern generation.
pub const IDDQ_MAX_PATTERNS: u32 = 1000;

/// `set_iddq -interval_size`.
pub const IDDQ_INTERVAL_SIZE: u32 = 1;

// -- Path delay

/// Clock period (ns) used by the delay path extraction script.
pub const PATH_DELAY_SLACK: f64 = 0.15;

/// `write_delay_paths -max_paths`.
pub const PATH_DELAY_MAX_PATHS: u32 = 200;

// -- Bridging

/// Number of node pairs the bridging site generator samples.
pub const BRIDGING_PAIRS: usize = 1000;
