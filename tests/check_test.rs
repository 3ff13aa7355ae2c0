//! Integration tests for `pfftx check`

mod common;

use common::{run_pfftx, run_pfftx_with_env, TestProject, SAMPLE_MANIFEST};

fn setup_valid_project(project: &TestProject) {
    project.create_file("pfftx.toml", SAMPLE_MANIFEST);
    project.create_file("pfft/core.c", "int core;\n");
    project.create_file("depends/install_pfft.sh", "#!/bin/sh\n");
}

#[test]
fn test_check_passes_for_valid_project() {
    let project = TestProject::new();
    setup_valid_project(&project);

    // `sh` stands in for the compiler so the toolchain warning does not
    // depend on the host having MPI installed.
    let output = run_pfftx_with_env(&project, &["check"], &[("MPICC", "sh")]);

    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Project is valid"));
}

#[test]
fn test_check_fails_for_missing_source() {
    let project = TestProject::new();
    setup_valid_project(&project);
    std::fs::remove_file(project.path().join("pfft/core.c")).unwrap();

    let output = run_pfftx_with_env(&project, &["check"], &[("MPICC", "sh")]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pfft/core.c"));
}

#[test]
fn test_check_fails_for_missing_script() {
    let project = TestProject::new();
    setup_valid_project(&project);
    std::fs::remove_file(project.path().join("depends/install_pfft.sh")).unwrap();

    let output = run_pfftx_with_env(&project, &["check"], &[("MPICC", "sh")]);

    assert!(!output.status.success());
}

#[test]
fn test_check_json_output() {
    let project = TestProject::new();
    setup_valid_project(&project);

    let output = run_pfftx_with_env(&project, &["--json", "check"], &[("MPICC", "sh")]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("check --json must emit valid JSON");
    assert_eq!(parsed["valid"], serde_json::Value::Bool(true));
    assert_eq!(parsed["extensions"][0], "core");
}

#[test]
fn test_check_without_manifest_fails() {
    let project = TestProject::new();

    let output = run_pfftx(&project, &["check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pfftx.toml"));
}
