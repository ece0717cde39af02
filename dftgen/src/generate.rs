// SPDX-License-Identifier: Apache-2.0

//! Pipeline selection: configuration record in, assembled script out.
//!
//! The order is fixed: validate and derive, run the variant's collaborator,
//! assemble. Any failure returns before the script exists, and
//! [`write_script`] only opens the output once assembly has succeeded.

use std::path::Path;

use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::dftgen_error::DftgenError;
use crate::directive_writer::Script;
use crate::engine::{Pipeline, ScriptAssembler};
use crate::registry::VariantRegistry;
use crate::resolved_config::ResolvedConfig;

pub fn generate_script(
    pipeline: Pipeline,
    config: &Config,
    registry: &VariantRegistry,
    collaborators: &Collaborators<'_>,
) -> Result<Script, DftgenError> {
    let variant = registry.lookup(pipeline, &config.fault_model);
    log::info!(
        "generate_script; pipeline: {}; fault_model: {}; variant: {}",
        pipeline,
        config.fault_model,
        variant.name
    );
    let resolved = ResolvedConfig::derive(config, pipeline, variant)?;
    collaborators.prepare(variant.prerequisite, config)?;
    Ok(ScriptAssembler::new(pipeline, variant, resolved).assemble())
}

/// ATPG script with the built-in variants.
pub fn generate_atpg_script(
    config: &Config,
    collaborators: &Collaborators<'_>,
) -> Result<Script, DftgenError> {
    generate_script(
        Pipeline::Atpg,
        config,
        &VariantRegistry::builtin(),
        collaborators,
    )
}

/// Fault-simulation script with the built-in variants.
pub fn generate_fault_sim_script(
    config: &Config,
    collaborators: &Collaborators<'_>,
) -> Result<Script, DftgenError> {
    generate_script(
        Pipeline::FaultSim,
        config,
        &VariantRegistry::builtin(),
        collaborators,
    )
}

/// Scan-insertion script; there are no variants and no collaborators.
pub fn generate_scan_insert_script(config: &Config) -> Result<Script, DftgenError> {
    let registry = VariantRegistry::empty();
    let variant = registry.lookup(Pipeline::ScanInsert, &config.fault_model);
    let resolved = ResolvedConfig::derive(config, Pipeline::ScanInsert, variant)?;
    Ok(ScriptAssembler::new(Pipeline::ScanInsert, variant, resolved).assemble())
}

/// Generates and persists a script. No file is created unless generation
/// succeeds.
pub fn write_script(
    pipeline: Pipeline,
    config: &Config,
    registry: &VariantRegistry,
    collaborators: &Collaborators<'_>,
    output: &Path,
) -> Result<Script, DftgenError> {
    let script = match pipeline {
        Pipeline::ScanInsert => generate_scan_insert_script(config)?,
        _ => generate_script(pipeline, config, registry, collaborators)?,
    };
    script.write_to_path(output)?;
    Ok(script)
}
