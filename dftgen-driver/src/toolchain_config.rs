// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use serde::Deserialize;

/// The `[toolchain]` table of a `dftgen-toolchain.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct ToolchainConfig {
    /// Directory holding the external tools, e.g. `pt_shell`. When absent the
    /// tools are looked up on `PATH`.
    pub tool_path: Option<String>,
}

/// Helper for extracting the tool directory from the command line flag, if
/// specified, or the toolchain config if it's present and the cmdline flag
/// isn't specified.
pub fn get_tool_path(matches: &ArgMatches, config: &Option<ToolchainConfig>) -> Option<String> {
    if let Some(tool_path) = matches.get_one::<String>("tool_path") {
        Some(tool_path.to_string())
    } else if let Some(config) = config {
        config.tool_path.clone()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        toolchain: ToolchainConfig,
    }

    fn command() -> clap::Command {
        clap::Command::new("t").arg(clap::Arg::new("tool_path").long("tool_path"))
    }

    #[test]
    fn flag_overrides_toolchain_file() {
        let parsed: Wrapper = toml::from_str("[toolchain]\ntool_path = \"/opt/pt/bin\"\n").unwrap();
        let config = Some(parsed.toolchain);

        let matches = command().get_matches_from(["t"]);
        assert_eq!(get_tool_path(&matches, &config).as_deref(), Some("/opt/pt/bin"));

        let matches = command().get_matches_from(["t", "--tool_path", "/usr/synopsys"]);
        assert_eq!(get_tool_path(&matches, &config).as_deref(), Some("/usr/synopsys"));

        let matches = command().get_matches_from(["t"]);
        assert_eq!(get_tool_path(&matches, &None), None);
    }
}
