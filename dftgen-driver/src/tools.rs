// SPDX-License-Identifier: Apache-2.0

//! Helpers for running the external timing tool that can be provided to the
//! driver.

use std::path::{Path, PathBuf};
use std::process::Command;

use dftgen::{
    delay_report_file, write_delay_path_script, Config, DelayPathExtractor, DftgenError,
    DELAY_PATH_SCRIPT,
};

use crate::flag_defaults;

const COLLABORATOR: &str = "pt_shell";

/// Extracts delay paths by running `pt_shell -f pt_path.tcl` in the work
/// directory.
pub struct PtShellDelayPathExtractor {
    /// Directory holding `pt_shell`; `PATH` is searched when absent.
    tool_path: Option<String>,
}

impl PtShellDelayPathExtractor {
    pub fn new(tool_path: Option<String>) -> Self {
        PtShellDelayPathExtractor { tool_path }
    }

    fn pt_shell_path(&self) -> Result<PathBuf, DftgenError> {
        match &self.tool_path {
            Some(dir) => {
                let path = Path::new(dir).join(flag_defaults::PT_SHELL);
                if !path.exists() {
                    return Err(DftgenError::collaborator(
                        COLLABORATOR,
                        format!("pt_shell tool not found at: {}", path.display()),
                    ));
                }
                // The tool runs from the work directory, so a relative
                // tool_path must be resolved against ours first.
                std::fs::canonicalize(&path).map_err(|e| {
                    DftgenError::collaborator(
                        COLLABORATOR,
                        format!("failed to canonicalize {}: {}", path.display(), e),
                    )
                })
            }
            None => which::which(flag_defaults::PT_SHELL).map_err(|e| {
                DftgenError::collaborator(COLLABORATOR, format!("pt_shell not found on PATH: {}", e))
            }),
        }
    }
}

impl DelayPathExtractor for PtShellDelayPathExtractor {
    fn extract(&self, config: &Config, work_dir: &Path) -> Result<PathBuf, DftgenError> {
        log::info!("PtShellDelayPathExtractor::extract; work_dir: {}", work_dir.display());
        let pt_shell = self.pt_shell_path()?;
        let script = write_delay_path_script(config, work_dir)?;
        log::info!("wrote {}", script.display());

        let mut command = Command::new(&pt_shell);
        command.arg("-f").arg(DELAY_PATH_SCRIPT).current_dir(work_dir);
        log::info!("Running command: {:?}", command);
        let output = command.output().map_err(|e| {
            DftgenError::collaborator(
                COLLABORATOR,
                format!("could not run {}: {}", pt_shell.display(), e),
            )
        })?;
        if !output.status.success() {
            return Err(DftgenError::collaborator(
                COLLABORATOR,
                format!(
                    "delay path extraction failed with status: {}; stderr: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr)
                ),
            ));
        }

        let report = work_dir.join(delay_report_file(&config.top_module));
        if !report.exists() {
            return Err(DftgenError::collaborator(
                COLLABORATOR,
                format!("expected report was not written: {}", report.display()),
            ));
        }
        Ok(report)
    }
}
