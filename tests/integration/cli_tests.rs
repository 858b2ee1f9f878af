//! CLI dispatch tests.
//!
//! Parse real argument vectors and run them against the mock catalog.

use super::expected::{BROKER, CLASS_DETAILS, CLASS_PLANS, PARENT_CLASS, PLAN_DETAILS, PLAN_INSTANCES};
use crate::mocks::MockCatalog;
use clap::Parser;
use svcat::cli::args::{Cli, Command};
use svcat::cli::run_describe;
use svcat::SvcatError;

fn run(argv: &[&str], catalog: &MockCatalog) -> (Result<(), SvcatError>, String) {
    let cli = Cli::try_parse_from(std::iter::once("svcat").chain(argv.iter().copied())).unwrap();
    let Command::Describe(describe) = cli.command else {
        panic!("expected a describe command");
    };
    let mut out = Vec::new();
    let result = run_describe(&describe, catalog, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_class_alias_with_traverse() {
    let catalog = MockCatalog::azure();
    let (result, out) = run(&["describe", "cl", "azure-mysqldb", "-t"], &catalog);

    result.unwrap();
    assert_eq!(out, format!("{}{}{}{}", CLASS_DETAILS, CLASS_PLANS, BROKER, CLASS_PLANS));
}

#[test]
fn test_plan_by_uuid() {
    let catalog = MockCatalog::azure();
    let (result, out) = run(
        &["describe", "plans", "--uuid", "08e4b43a-36bc-447e-a81f-8202b13e339c", "--traverse"],
        &catalog,
    );

    result.unwrap();
    assert_eq!(out, format!("{}{}{}{}", PLAN_DETAILS, PLAN_INSTANCES, PARENT_CLASS, BROKER));
    assert_eq!(catalog.calls()[0], "retrieve_plan_by_id");
}

#[test]
fn test_missing_name() {
    let catalog = MockCatalog::azure();
    let (result, out) = run(&["describe", "plan", "--traverse"], &catalog);

    assert!(matches!(result, Err(SvcatError::MissingArgument)));
    assert!(out.is_empty());
}
