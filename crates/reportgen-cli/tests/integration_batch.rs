use regex::Regex;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn run_reportgen(temp_path: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_reportgen"))
        .args(args)
        .current_dir(temp_path)
        .env_remove("REPORTGEN_SEED")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("execute reportgen")
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_generates_named_files() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = run_reportgen(
        temp_dir.path(),
        &["out", "--count", "3", "--groups", "2", "--seed", "7"],
    );

    assert!(
        output.status.success(),
        "reportgen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        sorted_names(&temp_dir.path().join("out")),
        vec!["test_001.xml", "test_002.xml", "test_003.xml"]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("[1/3] Generated: test_001.xml (2 groups)"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Generated 3 file(s)"), "stdout: {stdout}");
}

#[test]
fn test_seeded_runs_are_byte_identical() {
    let temp_dir = TempDir::new().expect("temp dir");
    let args = ["--count", "2", "--groups", "3", "--nested", "--seed", "1000"];

    let mut first = vec!["a"];
    first.extend_from_slice(&args);
    let mut second = vec!["b"];
    second.extend_from_slice(&args);
    assert!(run_reportgen(temp_dir.path(), &first).status.success());
    assert!(run_reportgen(temp_dir.path(), &second).status.success());

    for name in ["test_001.xml", "test_002.xml"] {
        let a = std::fs::read(temp_dir.path().join("a").join(name)).unwrap();
        let b = std::fs::read(temp_dir.path().join("b").join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn test_prefix_and_document_header() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = run_reportgen(
        temp_dir.path(),
        &["out", "-c", "1", "-g", "1", "-p", "nightly_", "-s", "1", "-q"],
    );
    assert!(output.status.success());

    let xml = std::fs::read_to_string(temp_dir.path().join("out/nightly_001.xml")).unwrap();
    assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<testmodule "));
    let id = Regex::new(r#"measurementid="\d{8}-ffff-4444-82aa-af7cs55583""#).unwrap();
    assert!(id.is_match(&xml));
    // File 1 starts one minute after the base time.
    assert!(xml.contains(r#"starttime="2026-02-10 10:01:00""#));
}

#[test]
fn test_quiet_prints_only_summary() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = run_reportgen(temp_dir.path(), &["out", "-c", "2", "-g", "1", "-q"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Generated: "), "stdout: {stdout}");
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout}");
}

#[test]
fn test_json_summary() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = run_reportgen(
        temp_dir.path(),
        &["out", "-c", "2", "-g", "4", "-s", "5", "--json"],
    );
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json summary");
    let files = summary["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["groups"], 4);
    assert_eq!(files[0]["seed"], 6);
    assert_eq!(files[1]["seed"], 7);
    assert_eq!(files[0]["stats"]["groups"], 4);
    assert!(summary["total_bytes"].as_u64().unwrap() > 0);
    assert!(summary["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_rejects_zero_count() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = run_reportgen(temp_dir.path(), &["out", "--count", "0"]);

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(
        temp_dir.path().join("batch.yml"),
        "output_dir: from_config\ncount: 2\ngroups: 1\nprefix: cfg_\n",
    )
    .unwrap();

    let output = run_reportgen(temp_dir.path(), &["--config", "batch.yml", "-q"]);
    assert!(
        output.status.success(),
        "reportgen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        sorted_names(&temp_dir.path().join("from_config")),
        vec!["cfg_001.xml", "cfg_002.xml"]
    );
}

#[test]
fn test_unwritable_output_folder_fails() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("blocked"), "not a folder").unwrap();

    let output = run_reportgen(temp_dir.path(), &["blocked", "-c", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to create output folder"),
        "stderr: {stderr}"
    );
}
