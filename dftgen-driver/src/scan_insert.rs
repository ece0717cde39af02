// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use dftgen::{Collaborators, NetlistSiteGenerator, Pipeline};

use crate::common;

pub fn handle_scan_insert(matches: &ArgMatches) -> anyhow::Result<()> {
    log::info!("handle_scan_insert");
    let config = common::load_config(matches)?;
    let output = common::output_path(matches)?;
    let sites = NetlistSiteGenerator::default();
    let collaborators = Collaborators::new(".", &sites);
    common::write_pipeline_script(Pipeline::ScanInsert, &config, &collaborators, &output)
}
