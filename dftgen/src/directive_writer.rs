// SPDX-License-Identifier: Apache-2.0

//! Line sink shared by every assembly step.
//!
//! Text is accumulated in memory and grouped by the phase that emitted it, so
//! callers can both persist the byte-exact script and inspect its phase
//! structure.

use std::io::Write;
use std::ops::Range;
use std::path::Path;

use crate::dftgen_error::DftgenError;
use crate::phase::Phase;

const BANNER_WIDTH: usize = 46;

#[derive(Debug, Default)]
pub struct DirectiveWriter {
    text: String,
    sections: Vec<(Phase, Range<usize>)>,
}

impl DirectiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts attributing subsequent text to `phase`.
    pub fn begin_phase(&mut self, phase: Phase) {
        self.close_section();
        let start = self.text.len();
        self.sections.push((phase, start..start));
    }

    /// Emits one newline-terminated directive.
    pub fn line(&mut self, directive: impl AsRef<str>) {
        self.text.push_str(directive.as_ref());
        self.text.push('\n');
    }

    /// Emits an empty separator line.
    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Emits a boxed comment banner, e.g. the `ATPG` title block.
    pub fn banner(&mut self, title: &str) {
        let inner = BANNER_WIDTH - 2;
        let left = inner.saturating_sub(title.len()) / 2;
        let left = left.saturating_sub(1);
        let right = inner.saturating_sub(title.len() + left);
        self.line("#".repeat(BANNER_WIDTH));
        self.line(format!("#{}{}{}#", " ".repeat(left), title, " ".repeat(right)));
        self.line("#".repeat(BANNER_WIDTH));
    }

    pub fn finish(mut self) -> Script {
        self.close_section();
        Script {
            text: self.text,
            sections: self.sections,
        }
    }

    fn close_section(&mut self) {
        let end = self.text.len();
        if let Some((_, range)) = self.sections.last_mut() {
            range.end = end;
        }
    }
}

/// A fully assembled control script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    text: String,
    sections: Vec<(Phase, Range<usize>)>,
}

impl Script {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Phase labels in emission order, including phases that emitted nothing.
    pub fn phases(&self) -> Vec<Phase> {
        self.sections.iter().map(|(phase, _)| *phase).collect()
    }

    /// The text emitted by `phase`, if the script has that phase.
    pub fn section(&self, phase: Phase) -> Option<&str> {
        self.sections
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, range)| &self.text[range.clone()])
    }

    /// Writes the script to `path`, creating or truncating it.
    ///
    /// Nothing is cleaned up if the write fails part way.
    pub fn write_to_path(&self, path: &Path) -> Result<(), DftgenError> {
        log::info!(
            "Script::write_to_path; path: {}; bytes: {}",
            path.display(),
            self.text.len()
        );
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| DftgenError::io(path, e))?;
        file.write_all(self.text.as_bytes())
            .map_err(|e| DftgenError::io(path, e))?;
        file.flush().map_err(|e| DftgenError::io(path, e))
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
