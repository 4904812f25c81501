use std::process::Command;

#[test]
fn xtask_help_runs() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("help")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn explain_coverage_passes() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("explain-coverage")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 check IDs have explanations"));
}

#[test]
fn print_schema_ids_lists_report_and_config() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("print-schema-ids")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("iacguard.report.v1"));
    assert!(stdout.contains("iacguard.config.v1"));
}

fn run_xtask(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .args(args)
        .output()
        .expect("run xtask")
}

#[test]
fn validate_schemas_without_schema_dir_succeeds() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("schemas");
    let output = run_xtask(&["validate-schemas", dir.to_str().expect("utf8 path")]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing to validate"));
}

#[test]
fn emitted_schemas_validate_and_drift_is_caught() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dir = temp.path().join("schemas");
    let dir_arg = dir.to_str().expect("utf8 path");

    assert!(run_xtask(&["emit-schemas", dir_arg]).status.success());
    assert!(dir.join("iacguard.report.v1.json").is_file());
    assert!(dir.join("iacguard.config.v1.json").is_file());

    let output = run_xtask(&["validate-schemas", dir_arg]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("up to date"));

    std::fs::write(dir.join("iacguard.config.v1.json"), "{}\n").expect("write");
    std::fs::remove_file(dir.join("iacguard.report.v1.json")).expect("remove");
    let output = run_xtask(&["validate-schemas", dir_arg]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing schemas"));
    assert!(stderr.contains("Schemas out of date"));
}

#[test]
fn unknown_command_fails() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("frobnicate")
        .output()
        .expect("run xtask");
    assert!(!output.status.success());
}
