// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::ArgMatches;
use dftgen::{Collaborators, Config, Pipeline, VariantRegistry};

pub fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let path = matches
        .get_one::<String>("config")
        .context("--config is required")?;
    Config::from_path(Path::new(path))
        .with_context(|| format!("loading configuration from {}", path))
}

pub fn output_path(matches: &ArgMatches) -> anyhow::Result<PathBuf> {
    matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("--output is required")
}

/// The `--work_dir` flag, or the directory the output script is written to.
pub fn work_dir(matches: &ArgMatches, output: &Path) -> PathBuf {
    if let Some(dir) = matches.get_one::<String>("work_dir") {
        return PathBuf::from(dir);
    }
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Parses an optional numeric flag, falling back to `default`.
pub fn parse_flag<T>(matches: &ArgMatches, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match matches.get_one::<String>(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value for --{}: {:?}", name, value)),
        None => Ok(default),
    }
}

/// Generates the script for `pipeline` and writes it to `output`.
pub fn write_pipeline_script(
    pipeline: Pipeline,
    config: &Config,
    collaborators: &Collaborators<'_>,
    output: &Path,
) -> anyhow::Result<()> {
    let script = dftgen::write_script(
        pipeline,
        config,
        &VariantRegistry::builtin(),
        collaborators,
        output,
    )
    .with_context(|| format!("generating {} script {}", pipeline, output.display()))?;
    log::info!(
        "{} script: {} phases, {} bytes",
        pipeline,
        script.phases().len(),
        script.text().len()
    );
    println!("Script generated: {}", output.display());
    Ok(())
}
