use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("interface_dita_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("interface.xml")
        .to_string_lossy()
        .into_owned()
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_interface-dita"))
        .args(args)
        .output()
        .expect("failed to run interface-dita")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_writes_language_tree_and_report() {
    let out = TempDir::new("build_tree");
    let report = out.join("summary.json");
    let input = fixture();

    let output = run(&[
        "build",
        "--input",
        &input,
        "--output",
        out.path().to_str().unwrap(),
        "--jobs",
        "2",
        "--report",
        report.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "build should succeed: {}", stderr(&output));
    assert!(stdout(&output).contains("class topic(s)"));
    assert!(stderr(&output).contains("setupghost"), "dangling donor should be reported");

    let lang = out.join("en");
    assert!(lang.join("commands/p/r_command_placefigure.dita").is_file());
    assert!(lang.join("commands/s/r_command_stopsection.dita").is_file());
    assert!(lang.join("inheritance.ditamap").is_file());
    assert!(lang.join("relations.ditamap").is_file());
    assert!(lang.join("user_commands.xml").is_file());

    let topic = fs::read_to_string(lang.join("commands/p/r_command_placefigure.dita")).unwrap();
    assert!(topic.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(topic.contains("<!DOCTYPE reference"));
    assert!(topic.contains("command_location/options1_start"));

    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(summary["failures"][0]["command"], "setupghost");
    assert_eq!(summary["maps"].as_array().unwrap().len(), 10);
}

#[test]
fn build_honors_language_and_manual_topics() {
    let out = TempDir::new("build_lang");
    let manual = TempDir::new("build_lang_manual");
    fs::create_dir_all(manual.join("de/common")).unwrap();
    fs::write(manual.join("de/common/glossary.dita"), "<concept/>").unwrap();
    let input = fixture();

    let output = run(&[
        "build",
        "--input",
        &input,
        "--lang",
        "de",
        "--output",
        out.path().to_str().unwrap(),
        "--manual-topics",
        manual.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "build should succeed: {}", stderr(&output));
    assert!(stdout(&output).contains("Imported 1 manual topic(s)"));
    assert!(out.join("de/common/glossary.dita").is_file());

    let topic = fs::read_to_string(out.join("de/commands/t/r_command_thinspace.dita")).unwrap();
    assert!(topic.contains("xml:lang=\"de\""));
}

#[test]
fn build_rejects_invalid_language() {
    let out = TempDir::new("build_bad_lang");
    let input = fixture();

    let output = run(&[
        "build",
        "--input",
        &input,
        "--lang",
        "../en",
        "--output",
        out.path().to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid language tag"));
    assert!(!out.join("en").exists());
}

#[test]
fn build_fails_on_missing_input() {
    let out = TempDir::new("build_missing");
    let missing = out.join("absent.xml");

    let output = run(&["build", "--input", missing.to_str().unwrap(), "--output", out.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("error: "));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_prints_stanza_model_and_topic() {
    let input = fixture();
    let output = run(&["show", "--input", &input, "--name", "setupalign"]);

    assert!(output.status.success(), "show should succeed: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("## Stanza"));
    assert!(text.contains("spac-ali.mkiv"));
    assert!(text.contains("\"name\": \"setupalign\""));
    assert!(text.contains("id=\"r_command_setupalign\""));
}

#[test]
fn show_reports_unknown_command() {
    let input = fixture();
    let output = run(&["show", "--input", &input, "--name", "nosuchcommand"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Command 'nosuchcommand' not found"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_writes_yaml_report() {
    let dir = TempDir::new("check_report");
    let report = dir.join("reports/check.yaml");
    let input = fixture();

    let output = run(&[
        "check",
        "--input",
        &input,
        "--report",
        report.to_str().unwrap(),
        "--format",
        "yaml",
    ]);

    assert!(output.status.success(), "check should succeed: {}", stderr(&output));
    assert!(stdout(&output).contains("clobbered duplicate(s)"));

    let raw = fs::read_to_string(&report).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&raw).unwrap();
    assert!(parsed["report"]["commands"].as_u64().unwrap() > 0);
    assert!(!parsed["validation"].as_sequence().unwrap().is_empty());
}

#[test]
fn check_strict_fails_on_findings() {
    let input = fixture();
    let output = run(&["check", "--input", &input, "--strict"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("validation error(s)"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_round_trips_through_build() {
    let dir = TempDir::new("config_roundtrip");
    let config_path = dir.join("interface-dita.yaml");

    let output = run(&["config", "--output", config_path.to_str().unwrap()]);
    assert!(output.status.success(), "config should succeed: {}", stderr(&output));

    let raw = fs::read_to_string(&config_path).unwrap();
    assert!(raw.contains("product_name: ConTeXt"));
    fs::write(&config_path, raw.replace("product_version: iv", "product_version: lmtx")).unwrap();

    let out = TempDir::new("config_roundtrip_out");
    let input = fixture();
    let output = run(&[
        "build",
        "--input",
        &input,
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        out.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "build should succeed: {}", stderr(&output));

    let topic = fs::read_to_string(out.join("en/commands/s/r_command_setupalign.dita")).unwrap();
    assert!(topic.contains("version=\"lmtx\""));
}

#[test]
fn config_prints_defaults_to_stdout() {
    let output = run(&["config"]);

    assert!(output.status.success());
    let parsed: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["version"], "1.0");
    assert_eq!(parsed["topics"]["review_window_days"][0], 120);
}
