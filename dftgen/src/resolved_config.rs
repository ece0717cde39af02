// SPDX-License-Identifier: Apache-2.0

//! Per-generator view of the configuration record.
//!
//! The record itself is never modified; the values a generator adjusts (the
//! capture-cycle default and the pipeline-qualified summary path) are derived
//! here once, when the generator is constructed.

use crate::config::Config;
use crate::config_defaults;
use crate::dftgen_error::ConfigError;
use crate::engine::Pipeline;
use crate::registry::Variant;

/// Generic marker the pipelines qualify in the summary report file name.
const REPORT_MARKER: &str = "_report";

#[derive(Debug, Clone)]
pub struct ResolvedConfig<'a> {
    pub config: &'a Config,
    /// Summary report path qualified for the pipeline.
    pub summary_file: String,
    /// Capture cycle with the default filled in.
    pub capture_cycle: i64,
}

impl<'a> ResolvedConfig<'a> {
    /// Validates `config` for `variant` and derives the per-generator values.
    ///
    /// Deriving repeatedly from the same record always yields the same result.
    pub fn derive(
        config: &'a Config,
        pipeline: Pipeline,
        variant: &Variant,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(validate) = variant.validate {
            validate(config)?;
        }
        let summary_file = match pipeline.summary_marker() {
            Some(marker) => qualify_summary_path(&config.summary_file, marker),
            None => config.summary_file.clone(),
        };
        log::debug!(
            "ResolvedConfig::derive; pipeline: {}; variant: {}; summary_file: {}",
            pipeline,
            variant.name,
            summary_file
        );
        Ok(ResolvedConfig {
            config,
            summary_file,
            capture_cycle: config
                .capture_cycle
                .unwrap_or(config_defaults::CAPTURE_CYCLE),
        })
    }
}

/// Rewrites the last `_report` in the file name of `path` to `marker` (e.g.
/// `_ATPG_report`).
///
/// Only the final path component is considered. A file name that already
/// carries `marker`, or has no `_report` at all, is returned unchanged.
pub fn qualify_summary_path(path: &str, marker: &str) -> String {
    let name_start = path.rfind(&['/', '\\'][..]).map(|i| i + 1).unwrap_or(0);
    let (dir, name) = path.split_at(name_start);
    if name.contains(marker) {
        return path.to_string();
    }
    match name.rfind(REPORT_MARKER) {
        Some(pos) => format!(
            "{}{}{}{}",
            dir,
            &name[..pos],
            marker,
            &name[pos + REPORT_MARKER.len()..]
        ),
        None => path.to_string(),
    }
}

/// Construction check for variants that schedule a capture cycle.
pub fn validate_capture_cycle(config: &Config) -> Result<(), ConfigError> {
    let capture_cycle = config
        .capture_cycle
        .unwrap_or(config_defaults::CAPTURE_CYCLE);
    if config_defaults::CAPTURE_CYCLE_RANGE.contains(&capture_cycle) {
        Ok(())
    } else {
        Err(ConfigError::CaptureCycleOutOfRange {
            fault_model: config.fault_model.clone(),
            capture_cycle,
        })
    }
}

/// Construction check for the experimental variant.
pub fn validate_experimental_static(config: &Config) -> Result<(), ConfigError> {
    match config.experimental_static.as_deref() {
        Some(expr) if !expr.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingExperimentalStatic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::*;
    use crate::registry::{tags, VariantRegistry};
    use test_case::test_case;

    #[test_case("./Netlist/s1423_report.rpt", "./Netlist/s1423_ATPG_report.rpt"; "generic")]
    #[test_case("./Netlist/s1423_ATPG_report.rpt", "./Netlist/s1423_ATPG_report.rpt"; "already_qualified")]
    #[test_case("./run_report/s1423.rpt", "./run_report/s1423.rpt"; "marker_only_in_directory")]
    #[test_case("./run_report/x_report_report.rpt", "./run_report/x_report_ATPG_report.rpt"; "last_occurrence")]
    #[test_case("summary.txt", "summary.txt"; "no_marker")]
    fn qualify_for_atpg(input: &str, want: &str) {
        assert_eq!(qualify_summary_path(input, "_ATPG_report"), want);
    }

    #[test]
    fn derive_does_not_touch_the_record() {
        let config = s1423_config();
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::Atpg, tags::STUCK);
        let first = ResolvedConfig::derive(&config, Pipeline::Atpg, variant).unwrap();
        let second = ResolvedConfig::derive(&config, Pipeline::Atpg, variant).unwrap();
        assert_eq!(first.summary_file, "./Netlist/s1423_ATPG_report.rpt");
        assert_eq!(second.summary_file, first.summary_file);
        assert_eq!(config.summary_file, "./Netlist/s1423_report.rpt");
    }

    #[test]
    fn fault_sim_uses_its_own_marker() {
        let config = s1423_config();
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::FaultSim, tags::STUCK);
        let resolved = ResolvedConfig::derive(&config, Pipeline::FaultSim, variant).unwrap();
        assert_eq!(resolved.summary_file, "./Netlist/s1423_FS_report.rpt");
    }

    #[test]
    fn capture_cycle_defaults_to_four() {
        let config = with_fault_model(tags::TRANSITION);
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::Atpg, tags::TRANSITION);
        let resolved = ResolvedConfig::derive(&config, Pipeline::Atpg, variant).unwrap();
        assert_eq!(resolved.capture_cycle, 4);
        assert_eq!(config.capture_cycle, None);
    }

    #[test]
    fn capture_cycle_is_not_checked_for_stuck() {
        let config = Config {
            capture_cycle: Some(0),
            ..with_fault_model(tags::STUCK)
        };
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::Atpg, tags::STUCK);
        assert!(ResolvedConfig::derive(&config, Pipeline::Atpg, variant).is_ok());
    }

    #[test]
    fn experimental_requires_an_expression() {
        let config = with_fault_model(tags::EXPERIMENTAL);
        let registry = VariantRegistry::builtin();
        let variant = registry.lookup(Pipeline::Atpg, tags::EXPERIMENTAL);
        assert_eq!(
            ResolvedConfig::derive(&config, Pipeline::Atpg, variant).unwrap_err(),
            ConfigError::MissingExperimentalStatic
        );
    }
}
