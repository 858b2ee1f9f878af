//! `describe plan` tests.

use super::expected::{BROKER, PARENT_CLASS, PLAN_DETAILS, PLAN_INSTANCES};
use crate::mocks::{MockCatalog, STANDARD_PLAN_UUID};
use svcat::commands::describe_plan::DescribePlanCmd;
use svcat::SvcatError;

fn describe(cmd: DescribePlanCmd, catalog: &MockCatalog, arg: Option<&str>) -> (Result<(), SvcatError>, String) {
    let mut out = Vec::new();
    let result = cmd.run(catalog, &mut out, arg);
    (result, String::from_utf8(out).unwrap())
}

fn traverse() -> DescribePlanCmd {
    DescribePlanCmd {
        traverse: true,
        lookup_by_uuid: false,
    }
}

#[test]
fn test_describe_by_name() {
    let catalog = MockCatalog::azure();
    let (result, out) = describe(DescribePlanCmd::default(), &catalog, Some("standard800"));

    result.unwrap();
    assert_eq!(out, format!("{}{}", PLAN_DETAILS, PLAN_INSTANCES));
    assert_eq!(
        catalog.calls(),
        vec!["retrieve_plan_by_name", "retrieve_class_by_plan", "retrieve_instances_by_plan"]
    );
}

#[test]
fn test_describe_by_uuid() {
    let catalog = MockCatalog::azure();
    let cmd = DescribePlanCmd {
        traverse: false,
        lookup_by_uuid: true,
    };
    let (result, out) = describe(cmd, &catalog, Some(STANDARD_PLAN_UUID));

    result.unwrap();
    assert_eq!(out, format!("{}{}", PLAN_DETAILS, PLAN_INSTANCES));
    assert_eq!(catalog.calls()[0], "retrieve_plan_by_id");
}

#[test]
fn test_describe_traverse() {
    let catalog = MockCatalog::azure();
    let (result, out) = describe(traverse(), &catalog, Some("standard800"));

    result.unwrap();
    assert_eq!(out, format!("{}{}{}{}", PLAN_DETAILS, PLAN_INSTANCES, PARENT_CLASS, BROKER));
    assert_eq!(
        catalog.calls(),
        vec![
            "retrieve_plan_by_name",
            "retrieve_class_by_plan",
            "retrieve_instances_by_plan",
            "retrieve_broker_by_class",
        ]
    );
}

#[test]
fn test_missing_argument() {
    let catalog = MockCatalog::azure();
    let (result, out) = describe(traverse(), &catalog, None);

    assert!(matches!(result, Err(SvcatError::MissingArgument)));
    assert!(out.is_empty());
    assert!(catalog.calls().is_empty());
}

#[test]
fn test_plan_without_instances() {
    let mut catalog = MockCatalog::azure();
    catalog.instances.clear();
    let (result, out) = describe(DescribePlanCmd::default(), &catalog, Some("basic50"));

    result.unwrap();
    assert!(out.contains("  Name:         basic50\n"));
    assert!(out.ends_with("\nInstances:\n  No instances defined\n"));
}

#[test]
fn test_class_lookup_error_writes_nothing() {
    let catalog = MockCatalog::azure().failing("retrieve_class_by_plan");
    let (result, out) = describe(traverse(), &catalog, Some("standard800"));

    assert!(matches!(result, Err(SvcatError::Api { status: 500, .. })));
    assert!(out.is_empty());
    assert_eq!(catalog.calls(), vec!["retrieve_plan_by_name", "retrieve_class_by_plan"]);
}

#[test]
fn test_broker_error_skips_parent_sections() {
    let catalog = MockCatalog::azure().failing("retrieve_broker_by_class");
    let (result, out) = describe(traverse(), &catalog, Some("standard800"));

    assert_eq!(
        result.unwrap_err().to_string(),
        "API request failed with HTTP 500: retrieve_broker_by_class exploded"
    );
    assert_eq!(out, format!("{}{}", PLAN_DETAILS, PLAN_INSTANCES));
}

#[test]
fn test_unknown_plan() {
    let catalog = MockCatalog::azure();
    let (result, _) = describe(DescribePlanCmd::default(), &catalog, Some("premium"));

    assert_eq!(result.unwrap_err().to_string(), "plan 'premium' not found");
    assert_eq!(catalog.calls(), vec!["retrieve_plan_by_name"]);
}
