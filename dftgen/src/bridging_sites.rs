// SPDX-License-Identifier: Apache-2.0

//! Bridging fault sites: random pairs of cell instances taken from the
//! gate-level netlist.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use regex::Regex;

use crate::config_defaults;
use crate::dftgen_error::DftgenError;

/// Node-pair file consumed by `add_faults -node_file`.
pub const NODES_FILE: &str = "nodes.txt";

/// Matches a cell instantiation such as `INVXL U58 ( .A(X_6), .Y(n60) );`.
static CELL_INSTANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+)\s+(U\d+)\s*\(").expect("cell instance pattern"));

/// Produces the node-pair file for the bridging fault model.
pub trait SiteGenerator {
    /// Writes pairs derived from `netlist` to `output`; returns the number of
    /// pairs written.
    fn generate(&self, netlist: &Path, output: &Path) -> Result<usize, DftgenError>;
}

#[derive(Debug, Clone)]
pub struct NetlistSiteGenerator {
    pub num_pairs: usize,
    pub seed: u64,
}

impl Default for NetlistSiteGenerator {
    fn default() -> Self {
        NetlistSiteGenerator {
            num_pairs: config_defaults::BRIDGING_PAIRS,
            seed: 0,
        }
    }
}

/// Distinct instance names (`U<digits>`) in `netlist_text`, sorted.
pub fn extract_sites(netlist_text: &str) -> Vec<String> {
    let sites: BTreeSet<&str> = netlist_text
        .lines()
        .filter_map(|line| CELL_INSTANCE.captures(line))
        .filter_map(|caps| caps.get(2))
        .map(|m| m.as_str())
        .collect();
    sites.into_iter().map(str::to_string).collect()
}

/// Samples up to `num_pairs` distinct ordered pairs `(a, b)` with `a != b`.
pub fn sample_pairs(
    sites: &[String],
    num_pairs: usize,
    seed: u64,
) -> Result<Vec<(String, String)>, DftgenError> {
    let n = sites.len();
    if n < 2 {
        return Err(DftgenError::collaborator(
            "site generator",
            format!("need at least 2 cell instances to form pairs, found {}", n),
        ));
    }
    let total = n * (n - 1);
    let amount = if num_pairs > total {
        log::warn!(
            "requested {} bridging pairs but only {} exist; using all of them",
            num_pairs,
            total
        );
        total
    } else {
        num_pairs
    };
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let pairs = rand::seq::index::sample(&mut rng, total, amount)
        .into_iter()
        .map(|index| {
            // Row `a` holds the n-1 partners of site `a`, skipping itself.
            let a = index / (n - 1);
            let column = index % (n - 1);
            let b = if column >= a { column + 1 } else { column };
            (sites[a].clone(), sites[b].clone())
        })
        .collect();
    Ok(pairs)
}

impl SiteGenerator for NetlistSiteGenerator {
    fn generate(&self, netlist: &Path, output: &Path) -> Result<usize, DftgenError> {
        log::info!(
            "NetlistSiteGenerator::generate; netlist: {}; output: {}",
            netlist.display(),
            output.display()
        );
        let text = std::fs::read_to_string(netlist).map_err(|e| DftgenError::io(netlist, e))?;
        let sites = extract_sites(&text);
        log::info!("found {} cell instances", sites.len());
        let pairs = sample_pairs(&sites, self.num_pairs, self.seed)?;

        let mut contents = String::new();
        for (a, b) in &pairs {
            contents.push_str(a);
            contents.push(' ');
            contents.push_str(b);
            contents.push('\n');
        }
        let mut file = std::fs::File::create(output).map_err(|e| DftgenError::io(output, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| DftgenError::io(output, e))?;
        Ok(pairs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const NETLIST: &str = "\
module s1423 ( CK, G0, G1 );
  INVXL U58 ( .A(X_6), .Y(n60) );
  NAND2X1 U7 ( .A(n1), .B(n2), .Y(n3) );
  DFFRX1 \\DFF_0/Q_reg ( .D(n5), .CK(CK), .Q(X_1) );
  AOI21X1 U12( .A0(n1), .A1(n4), .B0(n5), .Y(n6) );
  INVXL U58 ( .A(X_7), .Y(n61) );
endmodule
";

    fn names(sites: &[&str]) -> Vec<String> {
        sites.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extracts_sorted_unique_instances() {
        assert_eq!(extract_sites(NETLIST), names(&["U12", "U58", "U7"]));
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        let sites = names(&["U1", "U2", "U3", "U4", "U5"]);
        let first = sample_pairs(&sites, 7, 42).unwrap();
        let second = sample_pairs(&sites, 7, 42).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn pairs_are_distinct_and_never_self() {
        let sites = names(&["U1", "U2", "U3"]);
        let pairs = sample_pairs(&sites, 100, 7).unwrap();
        assert_eq!(pairs.len(), 6);
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), 6);
        assert!(pairs.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn single_site_is_an_error() {
        let err = sample_pairs(&names(&["U1"]), 1, 0).unwrap_err();
        assert!(matches!(err, DftgenError::Collaborator { .. }));
    }

    #[test]
    fn generate_writes_one_pair_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let netlist = dir.path().join("s1423_dft.v");
        std::fs::write(&netlist, NETLIST).unwrap();
        let output = dir.path().join(NODES_FILE);
        let generator = NetlistSiteGenerator {
            num_pairs: 4,
            seed: 1,
        };
        assert_eq!(generator.generate(&netlist, &output).unwrap(), 4);
        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            let parts: Vec<&str> = line.split(' ').collect();
            assert_eq!(parts.len(), 2);
            assert_ne!(parts[0], parts[1]);
        }
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn missing_netlist_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let generator = NetlistSiteGenerator::default();
        let err = generator
            .generate(&dir.path().join("absent.v"), &dir.path().join(NODES_FILE))
            .unwrap_err();
        assert!(matches!(err, DftgenError::Io { .. }));
    }
}
