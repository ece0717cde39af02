// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use dftgen::{Collaborators, NetlistSiteGenerator, Pipeline};

use crate::common;

/// Fault simulation reads the collaborator files of the ATPG run, so no
/// collaborator is ever invoked here.
pub fn handle_fault_sim(matches: &ArgMatches) -> anyhow::Result<()> {
    log::info!("handle_fault_sim");
    let config = common::load_config(matches)?;
    let output = common::output_path(matches)?;
    let sites = NetlistSiteGenerator::default();
    let collaborators = Collaborators::new(common::work_dir(matches, &output), &sites);
    common::write_pipeline_script(Pipeline::FaultSim, &config, &collaborators, &output)
}
