use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("networks").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("strongway-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args(args)
        .output()
        .expect("run strongway-cli");
    assert!(
        output.status.success(),
        "strongway-cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_orients_square_smoke() {
    let path = fixture("square.json");
    let v = run_json(&["orient", path.to_string_lossy().as_ref()]);

    assert_eq!(v["status"], "oriented");
    assert_eq!(v["report"]["finalNodes"], 4);
    assert_eq!(v["report"]["resolvedForward"], 4);

    let nodes = v["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0]["id"], "1");
    assert_eq!(nodes[0]["index"], 0);
    assert_eq!(nodes[0]["label"], "Main St / 1st Ave");
    assert_eq!(nodes[2]["x"], 100.0);
    assert!(nodes[1].get("label").is_none());

    let arcs: Vec<(String, String, String)> = v["arcs"]
        .as_array()
        .expect("arcs")
        .iter()
        .map(|a| {
            (
                a["from"].as_str().unwrap_or_default().to_string(),
                a["to"].as_str().unwrap_or_default().to_string(),
                a["kind"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String, String)> =
        [("1", "2"), ("2", "3"), ("3", "4"), ("4", "1")]
            .iter()
            .map(|(f, t)| (f.to_string(), t.to_string(), "resolved".to_string()))
            .collect();
    assert_eq!(arcs, expected);
}

#[test]
fn cli_reports_removed_bridge() {
    let path = fixture("bridged.json");
    let v = run_json(&["--report-only", path.to_string_lossy().as_ref()]);

    assert_eq!(v["bridgesRemoved"], serde_json::json!([["d", "x"]]));
    assert_eq!(v["bridgeComponentNodes"], 4);
    assert_eq!(v["finalNodes"], 4);
    assert_eq!(v["status"], "oriented");
}

#[test]
fn cli_check_describes_raw_input() {
    let path = fixture("bridged.json");
    let v = run_json(&["check", path.to_string_lossy().as_ref()]);

    assert_eq!(v["nodes"], 7);
    assert_eq!(v["arcs"], 19);
    assert_eq!(v["fixedArcs"], 1);
    assert_eq!(v["flexibleArcs"], 18);
    assert_eq!(v["stronglyConnected"], false);
    assert_eq!(v["bridges"], serde_json::json!([["d", "x"]]));
}

#[test]
fn cli_cut_node_mode_flag_overrides_config() {
    let path = fixture("dead_end.json");
    let path = path.to_string_lossy();
    let config = repo_root()
        .join("fixtures")
        .join("options")
        .join("fixpoint.json");
    let config = config.to_string_lossy();

    let single = run_json(&["--report-only", path.as_ref()]);
    assert_eq!(single["cutNodeRounds"], 1);

    let fix = run_json(&["--report-only", "--config", config.as_ref(), path.as_ref()]);
    assert_eq!(fix["cutNodeRounds"], 2);
    assert_eq!(fix["cutNodesRemoved"][1]["node"], "y");
    assert_eq!(fix["cutNodesRemoved"][1]["direction"], "all-in");

    let overridden = run_json(&[
        "--report-only",
        "--config",
        config.as_ref(),
        "--cut-nodes",
        "single-pass",
        path.as_ref(),
    ]);
    assert_eq!(overridden["cutNodeRounds"], 1);
}

#[test]
fn cli_reads_stdin_and_writes_out_file() {
    let text = fs::read_to_string(fixture("square.json")).expect("read fixture");
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("oriented.json");

    let exe = assert_cmd::cargo_bin!("strongway-cli");
    assert_cmd::Command::new(exe)
        .args(["--pretty", "--out", out.to_string_lossy().as_ref(), "-"])
        .write_stdin(text)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&out).expect("read output");
    assert!(written.contains('\n'), "expected pretty output");
    let v: Value = serde_json::from_str(&written).expect("output is JSON");
    assert_eq!(v["arcs"].as_array().map(Vec::len), Some(4));
}

#[test]
fn cli_fails_on_unknown_node() {
    let path = fixture("unknown_node.json");
    let exe = assert_cmd::cargo_bin!("strongway-cli");
    let output = Command::new(exe)
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("run strongway-cli");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_bad_flags_with_usage() {
    for args in [
        vec!["--edge-order", "random"],
        vec!["--frobnicate"],
        vec!["--out"],
    ] {
        let output = Command::new(assert_cmd::cargo_bin!("strongway-cli"))
            .args(&args)
            .output()
            .expect("run strongway-cli");
        assert_eq!(output.status.code(), Some(2), "args: {args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("USAGE"));
    }
}
