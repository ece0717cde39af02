// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

/// Configuration for the ISCAS'89 `s1423` benchmark used across the tests.
pub const S1423_TOML: &str = r#"[default]
top_module = "s1423"
netlist_file = "./Netlist/s1423_dft.v"
tech_library = "/cad/lib/tsmc13_neg.v"
db_library = "/cad/lib/db"
synthesized_files = "./Netlist/s1423_syn.v"
spf_file = "./Netlist/s1423_dft.spf"
spef_file = "./Netlist/s1423_dft.spef"
faults_file = "./Netlist/s1423.fault"
summary_file = "./Netlist/s1423_report.rpt"
patterns_file = "./Netlist/s1423.stil"

[fault_types]
fault_model = "stuck"

[stuck_fault_options]
n_detect = 2
"#;

/// A small scan-inserted netlist with five `U<n>` cell instances.
pub const SAMPLE_NETLIST: &str = "\
module s1423 ( CK, test_se, test_si, G0, G1, G701 );
  input CK, test_se, test_si, G0, G1;
  output G701;
  SDFFRX1 \\DFF_0/Q_reg ( .D(n10), .SI(test_si), .SE(test_se), .CK(CK), .Q(X_1) );
  INVXL U58 ( .A(X_6), .Y(n60) );
  NAND2X1 U7 ( .A(G0), .B(n60), .Y(n10) );
  NOR2X1 U21 ( .A(G1), .B(X_1), .Y(n11) );
  AOI21X1 U3 ( .A0(n10), .A1(n11), .B0(G0), .Y(n12) );
  OAI21XL U44 ( .A0(n12), .A1(n11), .B0(n60), .Y(G701) );
endmodule
";

/// Returns the `s1423` configuration with `extra` TOML appended, so later
/// sections can add keys the base text leaves at their defaults.
pub fn s1423_toml_with(extra: &str) -> String {
    format!("{}\n{}", S1423_TOML, extra)
}

/// Replaces the fault model of the `s1423` configuration.
pub fn s1423_toml_for_fault_model(fault_model: &str) -> String {
    S1423_TOML.replace(
        "fault_model = \"stuck\"",
        &format!("fault_model = \"{}\"", fault_model),
    )
}

/// Writes `text` as `dftgen.toml` inside `dir` and returns its path.
pub fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("dftgen.toml");
    std::fs::write(&path, text).expect("write config");
    path
}

/// Compare arbitrary text against a golden file on disk, with an opt-in
/// update mechanism controlled by the DFTGEN_UPDATE_GOLDEN environment
/// variable. Uses full-string equality (no trimming) for exactness.
pub fn compare_golden_text(got: &str, relpath: &str) {
    let golden_path = Path::new(relpath);
    if std::env::var("DFTGEN_UPDATE_GOLDEN").is_ok()
        || !golden_path.exists()
        || golden_path.metadata().map(|m| m.len()).unwrap_or(0) == 0
    {
        log::info!(
            "compare_golden_text; writing golden file to {}",
            golden_path.display()
        );
        std::fs::write(golden_path, got).expect("write golden");
    } else {
        log::info!(
            "compare_golden_text; reading golden file from {}",
            golden_path.display()
        );
        let want = std::fs::read_to_string(golden_path).expect("read golden");
        assert_eq!(
            got, want,
            "Golden mismatch; run with DFTGEN_UPDATE_GOLDEN=1 to update."
        );
    }
}

/// Creates a unique temporary directory for tests under the system temp dir,
/// using the provided base prefix combined with the process id and a nanosecond
/// timestamp.
///
/// The directory is cleaned up automatically when the returned `TempDir` is
/// dropped.
pub fn make_test_tmpdir(base_prefix: &str) -> tempfile::TempDir {
    let _ = env_logger::builder().is_test(true).try_init();
    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let prefix = format!("{}_{}_{}", base_prefix, pid, nanos);
    tempfile::Builder::new()
        .prefix(&prefix)
        .tempdir_in(std::env::temp_dir())
        .expect("tempdir create")
}
