//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

/// Build command for the netmatch-cli binary (finds it in target/debug when run via cargo test).
fn netmatch_cli() -> Command {
    cargo_bin_cmd!("netmatch-cli")
}

/// Path to netmatch library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("netmatch")
        .join("tests")
        .join("fixtures")
}

fn small_netlist() -> PathBuf {
    fixtures_dir().join("small_netlist.json")
}

#[test]
fn test_cli_help() {
    let mut cmd = netmatch_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("netlist"));
}

#[test]
fn test_cli_version() {
    let mut cmd = netmatch_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_find_bus_plain() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist")
        .arg(small_netlist())
        .arg("find")
        .arg("c[1:2]")
        .arg("--format")
        .arg("plain");

    cmd.assert()
        .success()
        .stdout("top:c[1]\ntop:c[2]\n");
}

#[test]
fn test_cli_find_json() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist")
        .arg(small_netlist())
        .arg("find")
        .arg("a")
        .arg("--template")
        .arg("s.*")
        .arg("--template-regex")
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("find --format json should print JSON");
    assert_eq!(json["net_matches"], serde_json::json!(["sub:a"]));
    assert_eq!(json["template_matches"], serde_json::json!(["sub"]));
}

#[test]
fn test_cli_find_invalid_regex_is_not_an_error() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist")
        .arg(small_netlist())
        .arg("find")
        .arg("(")
        .arg("--net-regex");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No matching templates"));
}

#[test]
fn test_cli_fail_on_empty() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist")
        .arg(small_netlist())
        .arg("find")
        .arg("missing")
        .arg("--fail-on-empty");

    cmd.assert().code(2);
}

#[test]
fn test_cli_templates() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist").arg(small_netlist()).arg("templates");

    cmd.assert()
        .success()
        .stdout("top (top)\nsub\n");
}

#[test]
fn test_cli_nets() {
    let mut cmd = netmatch_cli();

    cmd.arg("--netlist").arg(small_netlist()).arg("nets").arg("sub");

    cmd.assert().success().stdout("a\nd\n");
}

#[test]
fn test_cli_expand_without_netlist() {
    let mut cmd = netmatch_cli();

    cmd.arg("expand").arg("net[3:1]");

    cmd.assert()
        .success()
        .stdout("net[1]\nnet[2]\nnet[3]\n");
}

#[test]
fn test_cli_expand_over_limit_prints_pattern() {
    let mut cmd = netmatch_cli();

    cmd.arg("--max-expansion").arg("2").arg("expand").arg("n[0:9]");

    cmd.assert().success().stdout("n[0:9]\n");
}

#[test]
fn test_cli_missing_netlist_flag() {
    let mut cmd = netmatch_cli();

    cmd.arg("templates");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--netlist"));
}

#[test]
fn test_cli_invalid_snapshot() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "{{\"top_cell\": \"top\", \"templates\": [\"other\"]}}").expect("write");

    let mut cmd = netmatch_cli();
    cmd.arg("--netlist").arg(file.path()).arg("templates");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid netlist"));
}
