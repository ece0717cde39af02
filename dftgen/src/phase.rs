// SPDX-License-Identifier: Apache-2.0

/// A named step of a pipeline's assembly sequence.
///
/// Not every pipeline uses every phase; the per-pipeline order lives in the
/// phase tables of [`crate::engine::Pipeline::phases`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    // ATPG and fault simulation.
    Setup,
    AtpgMode,
    ClockConstraints,
    DesignRuleCheck,
    FaultModel,
    FaultReporting,
    ReadFaults,
    ReadPatterns,
    DelayOptions,
    AtpgOptions,
    FaultSource,
    Run,
    SimulationMeasure,
    FaultSimRun,
    Output,

    // Scan insertion.
    WorkDir,
    Libraries,
    ReadDesign,
    TestDefaults,
    TestProtocol,
    ScanConfiguration,
    InsertDft,
    WriteOutputs,
    Reports,
    Terminate,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::AtpgMode => "atpg_mode",
            Phase::ClockConstraints => "clock_constraints",
            Phase::DesignRuleCheck => "design_rule_check",
            Phase::FaultModel => "fault_model",
            Phase::FaultReporting => "fault_reporting",
            Phase::ReadFaults => "read_faults",
            Phase::ReadPatterns => "read_patterns",
            Phase::DelayOptions => "delay_options",
            Phase::AtpgOptions => "atpg_options",
            Phase::FaultSource => "fault_source",
            Phase::Run => "run",
            Phase::SimulationMeasure => "simulation_measure",
            Phase::FaultSimRun => "fault_sim_run",
            Phase::Output => "output",
            Phase::WorkDir => "work_dir",
            Phase::Libraries => "libraries",
            Phase::ReadDesign => "read_design",
            Phase::TestDefaults => "test_defaults",
            Phase::TestProtocol => "test_protocol",
            Phase::ScanConfiguration => "scan_configuration",
            Phase::InsertDft => "insert_dft",
            Phase::WriteOutputs => "write_outputs",
            Phase::Reports => "reports",
            Phase::Terminate => "terminate",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
