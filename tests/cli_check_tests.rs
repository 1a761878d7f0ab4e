//! End-to-end tests for `keebuilder check` command.

use std::fs;
use std::process::{Command, Output};

use keebuilder::constants::CONFIG_DIR_ENV;
use keebuilder::services::BuildService;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the keebuilder binary
fn keebuilder_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keebuilder")
}

/// Runs keebuilder with an isolated config directory.
fn run(config_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(keebuilder_bin())
        .env(CONFIG_DIR_ENV, config_dir.path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

#[test]
fn test_check_compatible_build() {
    let config_dir = isolated_config_dir();
    // DZ60 + Tofu60 + DZ60 plate + Gateron Yellow + GMK Olivia
    let output = run(
        &config_dir,
        &[
            "check", "--pcb", "1", "--case", "1", "--plate", "1", "--switch", "1", "--keycap", "1",
        ],
    );

    assert_eq!(
        output.status.code(),
        Some(0),
        "Compatible build should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Selected parts:"));
    assert!(stdout.contains("DZ60"));
    assert!(stdout.contains("✓ Parts are compatible"));
}

#[test]
fn test_check_group_mismatch_exits_1() {
    let config_dir = isolated_config_dir();
    // DZ60 (DZ60 Family) + KBD67 Lite (KBD67 Lite Family)
    let output = run(&config_dir, &["check", "--pcb", "1", "--case", "2"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Parts are not compatible (1 errors)"));
    assert!(stdout.contains("Compatible group mismatch: PCB (DZ60 Family) vs Case (KBD67 Lite Family)"));
}

#[test]
fn test_check_json_output() {
    let config_dir = isolated_config_dir();
    // Gateron Yellow (MX) + MBK Legend (Choc stem)
    let output = run(&config_dir, &["check", "--switch", "1", "--keycap", "3", "--json"]);

    assert_eq!(output.status.code(), Some(1));

    let result = stdout_json(&output);
    assert_eq!(result["compatible"], false);
    assert_eq!(result["ready"], true);
    assert_eq!(result["selected"].as_array().unwrap().len(), 2);
    assert_eq!(result["selected"][0]["category"], "Switch");
    assert_eq!(result["issues"][0]["severity"], "error");
    assert_eq!(
        result["issues"][0]["message"],
        "Stem type mismatch: Switch (MX) vs Keycap (Choc)"
    );
    assert!(result.get("build").is_none());
}

#[test]
fn test_check_warning_passes_unless_strict() {
    let config_dir = isolated_config_dir();
    // GH60 has no compatible group
    let args = ["check", "--pcb", "4", "--case", "1"];

    let output = run(&config_dir, &args);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("⚠"));

    let mut strict = args.to_vec();
    strict.push("--strict");
    let output = run(&config_dir, &strict);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("strict mode"));
}

#[test]
fn test_check_single_part_not_ready() {
    let config_dir = isolated_config_dir();
    let output = run(&config_dir, &["check", "--switch", "2"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Select at least 2 parts to check compatibility."));
}

#[test]
fn test_check_unknown_part_exits_2() {
    let config_dir = isolated_config_dir();
    let output = run(&config_dir, &["check", "--pcb", "1", "--keycap", "99"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Keycap with id 99 not found in catalog"));
}

#[test]
fn test_check_build_file_with_override() {
    let config_dir = isolated_config_dir();
    let work_dir = TempDir::new().unwrap();
    // Matias Click (Alps) on a DZ60 (MX) is a mismatch
    let build = test_build("Alps attempt", [Some(1), None, None, None, Some(3), None]);
    let path = write_build_file(work_dir.path(), "build.toml", &build);
    let path = path.to_str().unwrap();

    let output = run(&config_dir, &["check", "--build", path, "--json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["build"], "Alps attempt");

    // Flag replaces the switch from the file
    let output = run(&config_dir, &["check", "--build", path, "--switch", "2"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Build: Alps attempt"));
}

#[test]
fn test_check_missing_build_file_exits_2() {
    let config_dir = isolated_config_dir();
    let output = run(&config_dir, &["check", "--build", "/nonexistent/build.toml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read build file"));
}

#[test]
fn test_check_save_writes_build() {
    let config_dir = isolated_config_dir();
    let work_dir = TempDir::new().unwrap();
    let save_path = work_dir.path().join("saved.json");

    let output = run(
        &config_dir,
        &[
            "check",
            "--pcb",
            "2",
            "--case",
            "2",
            "--save",
            save_path.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(0));

    let saved = BuildService::load(&save_path).expect("Saved build should load");
    assert_eq!(saved.pcb_id, Some(2));
    assert_eq!(saved.case_id, Some(2));
    assert_eq!(saved.keycap_id, None);
}

#[test]
fn test_check_with_custom_catalog() {
    let config_dir = isolated_config_dir();
    let (catalog_path, _catalog_dir) = create_temp_catalog_file();

    // Alpha PCB + Beta Case
    let output = run(
        &config_dir,
        &[
            "check",
            "--catalog",
            catalog_path.to_str().unwrap(),
            "--pcb",
            "1",
            "--case",
            "2",
            "--json",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let result = stdout_json(&output);
    assert_eq!(
        result["issues"][0]["message"],
        "Compatible group mismatch: PCB (Alpha Family) vs Case (Beta Family)"
    );
}

#[test]
fn test_check_invalid_catalog_exits_2() {
    let config_dir = isolated_config_dir();
    let work_dir = TempDir::new().unwrap();
    let catalog_path = work_dir.path().join("broken.json");
    fs::write(&catalog_path, "{ not json").unwrap();

    let output = run(
        &config_dir,
        &["check", "--catalog", catalog_path.to_str().unwrap(), "--pcb", "1"],
    );

    assert_eq!(output.status.code(), Some(2));
}
