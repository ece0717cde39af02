// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use dftgen::{config_defaults, Collaborators, NetlistSiteGenerator, Pipeline};

use crate::common;
use crate::flag_defaults;
use crate::toolchain_config::{get_tool_path, ToolchainConfig};
use crate::tools::PtShellDelayPathExtractor;

pub fn handle_atpg(
    matches: &ArgMatches,
    toolchain: &Option<ToolchainConfig>,
) -> anyhow::Result<()> {
    log::info!("handle_atpg");
    let config = common::load_config(matches)?;
    let output = common::output_path(matches)?;
    let work_dir = common::work_dir(matches, &output);
    let sites = NetlistSiteGenerator {
        num_pairs: common::parse_flag(
            matches,
            "bridging_pairs",
            config_defaults::BRIDGING_PAIRS,
        )?,
        seed: common::parse_flag(matches, "seed", flag_defaults::BRIDGING_SEED)?,
    };
    let extractor = PtShellDelayPathExtractor::new(get_tool_path(matches, toolchain));
    let collaborators =
        Collaborators::new(work_dir, &sites).with_delay_path_extractor(&extractor);
    common::write_pipeline_script(Pipeline::Atpg, &config, &collaborators, &output)
}
