// SPDX-License-Identifier: Apache-2.0

//! Generates the control scripts of a design-for-test flow: scan insertion,
//! ATPG and fault simulation.
//!
//! ```no_run
//! use dftgen::{generate_atpg_script, Collaborators, Config, NetlistSiteGenerator};
//!
//! let config = Config::from_path(std::path::Path::new("dftgen.toml"))?;
//! let sites = NetlistSiteGenerator::default();
//! let collaborators = Collaborators::new(".", &sites);
//! let script = generate_atpg_script(&config, &collaborators)?;
//! script.write_to_path(std::path::Path::new("atpg.tcl"))?;
//! # Ok::<(), dftgen::DftgenError>(())
//! ```

pub mod atpg;
pub mod bridging_sites;
pub mod clauses;
pub mod collaborators;
pub mod config;
pub mod config_defaults;
pub mod delay_path_script;
pub mod dftgen_error;
pub mod directive_writer;
pub mod engine;
pub mod fault_sim;
pub mod generate;
pub mod phase;
pub mod registry;
pub mod resolved_config;
pub mod scan_insert;

pub use bridging_sites::{NetlistSiteGenerator, SiteGenerator, NODES_FILE};
pub use collaborators::Collaborators;
pub use config::{Config, PatternSpecification, ScanStyle};
pub use delay_path_script::{
    delay_path_script, delay_report_file, write_delay_path_script, DelayPathExtractor,
    DELAY_PATH_SCRIPT,
};
pub use dftgen_error::{ConfigError, DftgenError};
pub use directive_writer::{DirectiveWriter, Script};
pub use engine::{HookFn, HookSlot, Hooks, PhaseStep, Pipeline, ScriptAssembler};
pub use generate::{
    generate_atpg_script, generate_fault_sim_script, generate_scan_insert_script, generate_script,
    write_script,
};
pub use phase::Phase;
pub use registry::{tags, Prerequisite, Variant, VariantRegistry};
pub use resolved_config::ResolvedConfig;
