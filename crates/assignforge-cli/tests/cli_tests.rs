use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

fn assignforge_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_assignforge"))
}

fn instance_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write instance");
    file
}

const BRANCHES: &str = r#"
[[resources]]
name = "North"
capacity = 2

[[resources]]
name = "South"
capacity = 1

[[agents]]
name = "Ann"
costs = { North = 10.0, South = 30.0 }

[[agents]]
name = "Bob"
costs = { North = 20.0, South = 15.0 }

[[agents]]
name = "Cid"
costs = { North = 12.0, South = 40.0 }
"#;

#[test]
fn solve_prints_assignment_and_total() {
    let instance = instance_file(".toml", BRANCHES);
    let output = assignforge_cmd()
        .args(["solve", "--unit", "min"])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bob"));
    assert!(stdout.contains("37 min"));
}

#[test]
fn solve_json_output() {
    let instance = instance_file(".toml", BRANCHES);
    let output = assignforge_cmd()
        .args(["solve", "--format", "json"])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["total_cost"], 37.0);
    assert_eq!(value["assignments"].as_array().map(Vec::len), Some(3));
}

#[test]
fn capacity_flag_overrides_declared() {
    let instance = instance_file(".toml", BRANCHES);
    let output = assignforge_cmd()
        .args(["solve", "--format", "json", "--capacity", "3"])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    // Everyone takes their cheapest resource: 10 + 15 + 12.
    assert_eq!(value["total_cost"], 37.0);
    assert_eq!(value["resources"][0]["capacity"], 3);
}

#[test]
fn infeasible_instance_exits_1() {
    let instance = instance_file(
        ".yaml",
        "resources:\n  - name: North\nagents:\n  - name: Ann\n    costs: { North: 1.0 }\n  - name: Bob\n    costs: { North: 2.0 }\n",
    );
    let output = assignforge_cmd()
        .arg("solve")
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 agents but only 1 slots"), "stderr: {}", stderr);
}

#[test]
fn missing_cost_exits_2() {
    let instance = instance_file(
        ".json",
        r#"{"resources":[{"name":"A"},{"name":"B"}],"agents":[{"name":"x","costs":{"A":1}}]}"#,
    );
    let output = assignforge_cmd()
        .arg("check")
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn check_reports_counts() {
    let instance = instance_file(".toml", BRANCHES);
    let output = assignforge_cmd()
        .arg("check")
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 agents, 2 resources"));
}

#[test]
fn config_file_is_applied() {
    let instance = instance_file(".toml", BRANCHES);
    let config = instance_file(".toml", "[expansion]\nlayout = \"compact\"\nmaterialize = true\n");
    let output = assignforge_cmd()
        .args(["solve", "--format", "json", "--config"])
        .arg(config.path())
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["layout"], "compact");
    assert_eq!(value["slot_count"], 3);
}

#[test]
fn invalid_config_in_working_directory_exits_2() {
    let instance = instance_file(".toml", BRANCHES);
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join("assign.toml"),
        "[expansion]\nlayout = \"compakt\"\n",
    )
    .expect("write config");

    let output = assignforge_cmd()
        .current_dir(dir.path())
        .args(["solve", "--format", "json"])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
}

#[test]
fn config_in_working_directory_is_applied() {
    let instance = instance_file(".toml", BRANCHES);
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("assign.toml"), "[expansion]\nlayout = \"compact\"\n")
        .expect("write config");

    let output = assignforge_cmd()
        .current_dir(dir.path())
        .args(["solve", "--format", "json"])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["layout"], "compact");
}

const COMMUTE_CSV: &str = "\
Employee Name,Address,North,South
Ann,1 Elm St,10,30
Bob,2 Oak Ave,20,15
Cid,3 Pine Rd,12,40
";

#[test]
fn solve_csv_instance() {
    let instance = instance_file(".csv", COMMUTE_CSV);
    let output = assignforge_cmd()
        .args([
            "solve",
            "--format",
            "json",
            "--agent-column",
            "Employee Name",
            "--resources",
            "North,South",
            "--resource-capacity",
            "North=2",
        ])
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["total_cost"], 37.0);
    assert_eq!(value["resources"][0]["capacity"], 2);
}

#[test]
fn csv_address_column_is_rejected_without_schema() {
    let instance = instance_file(".csv", COMMUTE_CSV);
    let output = assignforge_cmd()
        .arg("check")
        .arg(instance.path())
        .output()
        .expect("failed to run assignforge");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-numeric cost"), "stderr: {}", stderr);
}
