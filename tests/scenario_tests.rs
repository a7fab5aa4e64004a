//! End-to-end scenario tests against the shipped coefficient sheets.

use std::path::PathBuf;

use orlab::config::ReportConfig;
use orlab::model::{self, RunContext, Section};
use orlab::solver::HighsSolver;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn run(name: &str) -> orlab::model::Report {
    let solver = HighsSolver::new();
    let data_dir = data_dir();
    let report = ReportConfig::default();
    let ctx = RunContext {
        solver: &solver,
        data_dir: &data_dir,
        report: &report,
    };
    model::find(name)
        .unwrap_or_else(|| panic!("scenario {name} not registered"))
        .run(&ctx)
        .unwrap_or_else(|e| panic!("scenario {name} failed: {e}"))
}

fn objective(report: &orlab::model::Report) -> f64 {
    report.objective.expect("report has an objective").1
}

#[test]
fn product_mix_profit_is_36() {
    assert!((objective(&run("product-mix")) - 36.0).abs() < 1e-6);
}

#[test]
fn facility_planning_npv_is_14() {
    assert!((objective(&run("facility-planning")) - 14.0).abs() < 1e-6);
}

#[test]
fn assignment_sheet_cost_is_9() {
    assert!((objective(&run("assignment")) - 9.0).abs() < 1e-6);
}

#[test]
fn crew_scheduling_sheet_cost_is_18() {
    assert!((objective(&run("crew-scheduling")) - 18.0).abs() < 1e-6);
}

#[test]
fn capital_budgeting_sheet_npv_is_28() {
    assert!((objective(&run("capital-budgeting")) - 28.0).abs() < 1e-6);
}

#[test]
fn capital_budgeting_bonus_sheet_npv_is_31() {
    assert!((objective(&run("capital-budgeting-bonus")) - 31.0).abs() < 1e-6);
}

#[test]
fn fixed_charge_sheet_cost_is_150585() {
    assert!((objective(&run("fixed-charge-transport")) - 150_585.0).abs() < 1e-3);
}

#[test]
fn transportation_cost_is_20200() {
    assert!((objective(&run("transportation")) - 20_200.0).abs() < 1e-6);
}

#[test]
fn matching_pairs_two() {
    assert!((objective(&run("matching")) - 2.0).abs() < 1e-6);
}

#[test]
fn pollution_sheet_solves_under_full_cost() {
    // Full use of everything plus both fixed charges would cost 51.
    assert!(objective(&run("pollution-abatement")) < 51.0);
}

#[test]
fn every_scenario_runs_against_the_shipped_data() {
    let solver = HighsSolver::new();
    let data_dir = data_dir();
    let report = ReportConfig::default();
    let ctx = RunContext {
        solver: &solver,
        data_dir: &data_dir,
        report: &report,
    };

    for scenario in model::catalog() {
        let report = scenario
            .run(&ctx)
            .unwrap_or_else(|e| panic!("{} failed: {e}", scenario.name()));
        assert_eq!(report.scenario, scenario.name());
        assert!(report.objective.is_some());
    }
}

#[test]
fn sheet_scenarios_echo_their_data() {
    let data_dir = data_dir();

    for scenario in model::catalog() {
        let echo = scenario
            .data_report(&data_dir)
            .unwrap_or_else(|e| panic!("{} data echo failed: {e}", scenario.name()));
        match scenario.source() {
            orlab::model::DataSource::Sheet(_) => {
                let report = echo.expect("sheet scenario echoes its data");
                assert!(report.objective.is_none());
                assert!(report
                    .sections
                    .iter()
                    .any(|s| matches!(s, Section::Table { .. })));
            }
            orlab::model::DataSource::Baked => assert!(echo.is_none()),
        }
    }
}
