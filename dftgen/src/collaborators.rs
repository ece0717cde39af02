// SPDX-License-Identifier: Apache-2.0

//! External producers of the input files some variants reference.
//!
//! They always run before a script is assembled, so a failing collaborator
//! never leaves a partially written script behind.

use std::path::{Path, PathBuf};

use crate::bridging_sites::{SiteGenerator, NODES_FILE};
use crate::config::Config;
use crate::delay_path_script::{delay_report_file, DelayPathExtractor};
use crate::dftgen_error::DftgenError;
use crate::registry::Prerequisite;

pub struct Collaborators<'a> {
    /// Directory the collaborator files are produced in; the generated script
    /// refers to them by bare file name, so it must be run from here.
    pub work_dir: PathBuf,
    pub site_generator: &'a dyn SiteGenerator,
    pub delay_path_extractor: Option<&'a dyn DelayPathExtractor>,
}

impl<'a> Collaborators<'a> {
    pub fn new(work_dir: impl Into<PathBuf>, site_generator: &'a dyn SiteGenerator) -> Self {
        Collaborators {
            work_dir: work_dir.into(),
            site_generator,
            delay_path_extractor: None,
        }
    }

    pub fn with_delay_path_extractor(mut self, extractor: &'a dyn DelayPathExtractor) -> Self {
        self.delay_path_extractor = Some(extractor);
        self
    }

    /// Produces whatever `prerequisite` needs.
    pub fn prepare(&self, prerequisite: Prerequisite, config: &Config) -> Result<(), DftgenError> {
        match prerequisite {
            Prerequisite::None => Ok(()),
            Prerequisite::BridgingSites => self.prepare_bridging_sites(config),
            Prerequisite::DelayPaths => self.prepare_delay_paths(config),
        }
    }

    fn prepare_bridging_sites(&self, config: &Config) -> Result<(), DftgenError> {
        let output = self.work_dir.join(NODES_FILE);
        let written = self
            .site_generator
            .generate(Path::new(&config.netlist_file), &output)?;
        log::info!("wrote {} bridging pairs to {}", written, output.display());
        if written == 0 {
            return Err(DftgenError::collaborator(
                "site generator",
                format!("no node pairs written to {}", output.display()),
            ));
        }
        Ok(())
    }

    fn prepare_delay_paths(&self, config: &Config) -> Result<(), DftgenError> {
        let extractor = self.delay_path_extractor.ok_or_else(|| {
            DftgenError::collaborator("delay path extractor", "no extractor is configured")
        })?;
        let report = extractor.extract(config, &self.work_dir)?;
        let expected = self.work_dir.join(delay_report_file(&config.top_module));
        if report != expected {
            log::warn!(
                "delay path report at {}; the script reads {}",
                report.display(),
                expected.display()
            );
        }
        let len = std::fs::metadata(&report)
            .map_err(|e| DftgenError::io(&report, e))?
            .len();
        if len == 0 {
            return Err(DftgenError::collaborator(
                "delay path extractor",
                format!("{} is empty", report.display()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridging_sites::NetlistSiteGenerator;
    use crate::config::testing::*;

    struct FixedReport(&'static str);

    impl DelayPathExtractor for FixedReport {
        fn extract(&self, config: &Config, work_dir: &Path) -> Result<PathBuf, DftgenError> {
            let path = work_dir.join(delay_report_file(&config.top_module));
            std::fs::write(&path, self.0).map_err(|e| DftgenError::io(&path, e))?;
            Ok(path)
        }
    }

    #[test]
    fn no_prerequisite_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = NetlistSiteGenerator::default();
        let collaborators = Collaborators::new(dir.path(), &generator);
        collaborators
            .prepare(Prerequisite::None, &s1423_config())
            .unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn delay_paths_without_extractor_fail() {
        let dir = tempfile::tempdir().unwrap();
        let generator = NetlistSiteGenerator::default();
        let collaborators = Collaborators::new(dir.path(), &generator);
        let err = collaborators
            .prepare(Prerequisite::DelayPaths, &s1423_config())
            .unwrap_err();
        assert!(matches!(err, DftgenError::Collaborator { .. }));
    }

    #[test]
    fn empty_delay_report_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let generator = NetlistSiteGenerator::default();
        let extractor = FixedReport("");
        let collaborators =
            Collaborators::new(dir.path(), &generator).with_delay_path_extractor(&extractor);
        let err = collaborators
            .prepare(Prerequisite::DelayPaths, &s1423_config())
            .unwrap_err();
        assert!(err.to_string().contains("s1423_delay.rpt is empty"));

        let extractor = FixedReport("Path 1\n");
        let collaborators =
            Collaborators::new(dir.path(), &generator).with_delay_path_extractor(&extractor);
        collaborators
            .prepare(Prerequisite::DelayPaths, &s1423_config())
            .unwrap();
    }
}
