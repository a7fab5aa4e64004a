//! CLI integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn orlab() -> Command {
    cargo_bin_cmd!("orlab")
}

#[test]
fn help_lists_the_subcommands() {
    orlab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_prints_the_name() {
    orlab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orlab"));
}

#[test]
fn list_shows_the_catalog() {
    orlab()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("product-mix"))
        .stdout(predicate::str::contains("crew-scheduling"))
        .stdout(predicate::str::contains("fixed-charge-transport"));
}

#[test]
fn solve_product_mix_reports_the_optimum() {
    orlab()
        .args(["solve", "product-mix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("product-mix"))
        .stdout(predicate::str::contains("36"));
}

#[test]
fn solve_sheet_scenario_reads_the_shipped_data() {
    orlab()
        .args(["solve", "crew-scheduling"])
        .assert()
        .success()
        .stdout(predicate::str::contains("18"));
}

#[test]
fn solve_unknown_scenario_fails_with_a_hint() {
    orlab()
        .args(["solve", "no-such-model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"))
        .stderr(predicate::str::contains("orlab list"));
}

#[test]
fn solve_requires_a_scenario_or_all() {
    orlab().arg("solve").assert().failure();
}

#[test]
fn check_solver_passes() {
    orlab()
        .args(["check", "solver"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expected optimum"));
}

#[test]
fn check_data_echoes_a_sheet() {
    orlab()
        .args(["check", "data", "capital-budgeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1"));
}

#[test]
fn check_data_on_a_baked_scenario_warns() {
    orlab()
        .args(["check", "data", "transportation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠"))
        .stdout(predicate::str::contains("baked-in"));
}

#[test]
fn invalid_config_is_a_startup_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

    orlab()
        .arg("--config")
        .arg(&path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.format"));
}
