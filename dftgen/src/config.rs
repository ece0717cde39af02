// SPDX-License-Identifier: Apache-2.0

//! The configuration record consumed by every pipeline, plus the TOML
//! configuration provider that builds it.
//!
//! The file is organized in sections:
//!
//! ```toml
//! [default]
//! top_module = "s1423"
//! netlist_file = "./Netlist/s1423_dft.v"
//! # ... remaining paths
//!
//! [scan_chain_insert]
//! scan_style = "multiplexed_flip_flop"
//! num_scan_chain = 8
//!
//! [fault_types]
//! fault_model = "transition"
//!
//! [transition_fault_options]
//! launch_cycle = "any"
//! capture_cycle = 4
//! ```
//!
//! Boolean keys accept either TOML booleans or strings (a string is true iff
//! it is `true`, ignoring case). Optional integers accept digit-only strings;
//! any other string is treated as absent.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config_defaults;
use crate::dftgen_error::{ConfigError, DftgenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStyle {
    MultiplexedFlipFlop,
    ClockedScan,
    Lssd,
    AuxClockLssd,
    Combinational,
    None,
}

impl ScanStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStyle::MultiplexedFlipFlop => "multiplexed_flip_flop",
            ScanStyle::ClockedScan => "clocked_scan",
            ScanStyle::Lssd => "lssd",
            ScanStyle::AuxClockLssd => "aux_clock_lssd",
            ScanStyle::Combinational => "combinational",
            ScanStyle::None => "none",
        }
    }
}

impl std::fmt::Display for ScanStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSpecification {
    Full,
    Partial,
}

/// All run parameters for every pipeline and every fault-model variant.
///
/// Built once per run (normally through [`Config::from_path`]) and only read
/// afterwards; per-generator adjustments live in
/// [`crate::resolved_config::ResolvedConfig`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub top_module: String,
    pub netlist_file: String,
    pub tech_library: String,
    pub db_library: String,
    pub synthesized_files: String,
    pub spf_file: String,
    pub spef_file: String,
    pub faults_file: String,
    pub summary_file: String,
    pub patterns_file: String,

    pub scan_style: ScanStyle,
    pub num_scan_chain: u32,

    /// Fault-model tag; see [`crate::registry`] for the known tags.
    pub fault_model: String,

    pub pattern_specification: PatternSpecification,
    pub fault_collapsing: bool,
    pub fault_coverage: u32,

    pub n_detect: u32,

    pub launch_cycle: String,
    /// Left as given; defaulting and range checking happen per variant.
    pub capture_cycle: Option<i64>,

    pub iddq_max_patterns: u32,
    pub iddq_toggle: bool,
    pub iddq_float: bool,
    pub iddq_strong: bool,
    pub iddq_interval_size: u32,

    pub path_delay_slack: f64,
    pub path_delay_max_paths: u32,

    pub bridging_optimize_bridge_strengths: bool,

    pub auto_compression: bool,
    /// Carried for `show-config`; no generated directive reads it.
    pub remove_fault: Option<i64>,

    pub simulation_sequential: bool,
    pub simulation_sequential_nodrop: bool,

    /// Free-form `set_static` expression for the experimental variant.
    pub experimental_static: Option<String>,
}

impl Config {
    /// Reads and validates a TOML configuration file.
    pub fn from_path(path: &Path) -> Result<Config, DftgenError> {
        log::info!("Config::from_path; path: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| DftgenError::io(path, e))?;
        Ok(Config::from_toml_str(&text)?)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(text: &str) -> Result<Config, ConfigError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants that hold regardless of the selected variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required: [(&'static str, &str); 10] = [
            ("top_module", &self.top_module),
            ("netlist_file", &self.netlist_file),
            ("tech_library", &self.tech_library),
            ("db_library", &self.db_library),
            ("synthesized_files", &self.synthesized_files),
            ("spf_file", &self.spf_file),
            ("spef_file", &self.spef_file),
            ("faults_file", &self.faults_file),
            ("summary_file", &self.summary_file),
            ("patterns_file", &self.patterns_file),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    section: "default",
                    key,
                });
            }
        }
        Ok(())
    }
}

// -- File layout

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    default: DefaultSection,
    scan_chain_insert: ScanChainInsertSection,
    fault_types: FaultTypesSection,
    pattern_options: PatternOptionsSection,
    stuck_fault_options: StuckFaultOptionsSection,
    transition_fault_options: TransitionFaultOptionsSection,
    iddq_fault_options: IddqFaultOptionsSection,
    path_delay_fault_options: PathDelayFaultOptionsSection,
    bridging_fault_options: BridgingFaultOptionsSection,
    atpg_general_options: AtpgGeneralOptionsSection,
    simulation_option: SimulationOptionSection,
    experimental_options: ExperimentalOptionsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultSection {
    top_module: String,
    netlist_file: String,
    tech_library: String,
    db_library: String,
    synthesized_files: String,
    spf_file: String,
    spef_file: String,
    faults_file: String,
    summary_file: String,
    patterns_file: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScanChainInsertSection {
    scan_style: ScanStyle,
    #[serde(deserialize_with = "lenient_u32")]
    num_scan_chain: u32,
}

impl Default for ScanChainInsertSection {
    fn default() -> Self {
        ScanChainInsertSection {
            scan_style: ScanStyle::MultiplexedFlipFlop,
            num_scan_chain: config_defaults::NUM_SCAN_CHAIN,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FaultTypesSection {
    fault_model: String,
}

impl Default for FaultTypesSection {
    fn default() -> Self {
        FaultTypesSection {
            fault_model: config_defaults::FAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PatternOptionsSection {
    pattern_specification: PatternSpecification,
    #[serde(deserialize_with = "lenient_bool")]
    fault_collapsing: bool,
    #[serde(deserialize_with = "lenient_u32")]
    fault_coverage: u32,
}

impl Default for PatternOptionsSection {
    fn default() -> Self {
        PatternOptionsSection {
            pattern_specification: PatternSpecification::Full,
            fault_collapsing: true,
            fault_coverage: config_defaults::FAULT_COVERAGE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct StuckFaultOptionsSection {
    #[serde(alias = "N_detect", deserialize_with = "lenient_u32")]
    n_detect: u32,
}

impl Default for StuckFaultOptionsSection {
    fn default() -> Self {
        StuckFaultOptionsSection {
            n_detect: config_defaults::N_DETECT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TransitionFaultOptionsSection {
    launch_cycle: String,
    #[serde(deserialize_with = "lenient_opt_int")]
    capture_cycle: Option<i64>,
}

impl Default for TransitionFaultOptionsSection {
    fn default() -> Self {
        TransitionFaultOptionsSection {
            launch_cycle: config_defaults::LAUNCH_CYCLE.to_string(),
            capture_cycle: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct IddqFaultOptionsSection {
    #[serde(deserialize_with = "lenient_u32")]
    iddq_max_patterns: u32,
    #[serde(deserialize_with = "lenient_bool")]
    iddq_toggle: bool,
    #[serde(deserialize_with = "lenient_bool")]
    iddq_float: bool,
    #[serde(deserialize_with = "lenient_bool")]
    iddq_strong: bool,
    #[serde(deserialize_with = "lenient_u32")]
    iddq_interval_size: u32,
}

impl Default for IddqFaultOptionsSection {
    fn default() -> Self {
        IddqFaultOptionsSection {
            iddq_max_patterns: config_defaults::IDDQ_MAX_PATTERNS,
            iddq_toggle: true,
            iddq_float: true,
            iddq_strong: true,
            iddq_interval_size: config_defaults::IDDQ_INTERVAL_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PathDelayFaultOptionsSection {
    #[serde(alias = "slack")]
    path_delay_slack: f64,
    #[serde(deserialize_with = "lenient_u32")]
    path_delay_max_paths: u32,
}

impl Default for PathDelayFaultOptionsSection {
    fn default() -> Self {
        PathDelayFaultOptionsSection {
            path_delay_slack: config_defaults::PATH_DELAY_SLACK,
            path_delay_max_paths: config_defaults::PATH_DELAY_MAX_PATHS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BridgingFaultOptionsSection {
    #[serde(deserialize_with = "lenient_bool")]
    bridging_optimize_bridge_strengths: bool,
}

impl Default for BridgingFaultOptionsSection {
    fn default() -> Self {
        BridgingFaultOptionsSection {
            bridging_optimize_bridge_strengths: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AtpgGeneralOptionsSection {
    #[serde(deserialize_with = "lenient_bool")]
    auto_compression: bool,
    #[serde(deserialize_with = "lenient_opt_int")]
    remove_fault: Option<i64>,
}

impl Default for AtpgGeneralOptionsSection {
    fn default() -> Self {
        AtpgGeneralOptionsSection {
            auto_compression: true,
            remove_fault: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimulationOptionSection {
    #[serde(deserialize_with = "lenient_bool")]
    simulation_sequential: bool,
    #[serde(deserialize_with = "lenient_bool")]
    simulation_sequential_nodrop: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperimentalOptionsSection {
    experimental_static: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Config {
        let d = self.default;
        Config {
            top_module: d.top_module,
            netlist_file: d.netlist_file,
            tech_library: d.tech_library,
            db_library: d.db_library,
            synthesized_files: d.synthesized_files,
            spf_file: d.spf_file,
            spef_file: d.spef_file,
            faults_file: d.faults_file,
            summary_file: d.summary_file,
            patterns_file: d.patterns_file,
            scan_style: self.scan_chain_insert.scan_style,
            num_scan_chain: self.scan_chain_insert.num_scan_chain,
            fault_model: self.fault_types.fault_model.trim().to_string(),
            pattern_specification: self.pattern_options.pattern_specification,
            fault_collapsing: self.pattern_options.fault_collapsing,
            fault_coverage: self.pattern_options.fault_coverage,
            n_detect: self.stuck_fault_options.n_detect,
            launch_cycle: self.transition_fault_options.launch_cycle,
            capture_cycle: self.transition_fault_options.capture_cycle,
            iddq_max_patterns: self.iddq_fault_options.iddq_max_patterns,
            iddq_toggle: self.iddq_fault_options.iddq_toggle,
            iddq_float: self.iddq_fault_options.iddq_float,
            iddq_strong: self.iddq_fault_options.iddq_strong,
            iddq_interval_size: self.iddq_fault_options.iddq_interval_size,
            path_delay_slack: self.path_delay_fault_options.path_delay_slack,
            path_delay_max_paths: self.path_delay_fault_options.path_delay_max_paths,
            bridging_optimize_bridge_strengths: self
                .bridging_fault_options
                .bridging_optimize_bridge_strengths,
            auto_compression: self.atpg_general_options.auto_compression,
            remove_fault: self.atpg_general_options.remove_fault,
            simulation_sequential: self.simulation_option.simulation_sequential,
            simulation_sequential_nodrop: self.simulation_option.simulation_sequential_nodrop,
            experimental_static: self.experimental_options.experimental_static,
        }
    }
}

// -- Lenient scalar parsing

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match BoolOrText::deserialize(deserializer)? {
        BoolOrText::Bool(b) => b,
        BoolOrText::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    use serde::de::Error;
    match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(v) => u32::try_from(v)
            .map_err(|_| D::Error::custom(format!("expected a non-negative integer, got {}", v))),
        IntOrText::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| D::Error::custom(format!("expected an integer, got {:?}: {}", s, e))),
    }
}

fn lenient_opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<IntOrText>::deserialize(deserializer)? {
        None => None,
        Some(IntOrText::Int(v)) => Some(v),
        Some(IntOrText::Text(s)) => {
            let s = s.trim();
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        }
    })
}
