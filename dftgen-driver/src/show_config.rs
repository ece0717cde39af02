// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use clap::ArgMatches;

use crate::common;
use crate::flag_defaults;

pub fn handle_show_config(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = common::load_config(matches)?;
    let pretty = matches
        .get_one::<String>("pretty")
        .map(|s| s == "true")
        .unwrap_or(flag_defaults::SHOW_CONFIG_PRETTY);
    let json = if pretty {
        serde_json::to_string_pretty(&config)
    } else {
        serde_json::to_string(&config)
    }
    .context("serializing configuration")?;
    println!("{}", json);
    Ok(())
}
