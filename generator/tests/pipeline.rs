//! End-to-end runs over the demo documents: load, evaluate, generate.

use std::path::PathBuf;

use forge_constraint::evaluate;
use forge_core::{fields, Value};
use forge_document::{DomainSpecification, RuleDocument};
use forge_generator::{generate, Architecture, GenerateError, Generator, FORGE_KEY};
use pretty_assertions::assert_eq;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../demos")
        .join(name)
}

#[test]
fn kernel_accepts_skyrim_specification() {
    // GIVEN the shipped kernel and the skyrim specification
    let rules = RuleDocument::load(demo("kernel.yml")).unwrap();
    let spec = DomainSpecification::load(demo("domain_specification.json")).unwrap();

    // WHEN every constraint is evaluated
    let evaluation = evaluate(&rules, &spec);

    // THEN all pass and a planned artifact is produced
    assert_eq!(evaluation.len(), rules.len());
    assert!(evaluation.all_passed(), "{:?}", evaluation);

    let artifact = generate(&spec, evaluation.as_slice()).unwrap();
    assert!(artifact.is_validated());

    let plan = artifact.plan().unwrap();
    assert_eq!(plan.domain, "skyrim_modding_ecosystem");
    assert_eq!(plan.architecture, Architecture::TwoNode);
    assert_eq!(plan.memory_limit, Some("6G"));
    assert_eq!(plan.files.len(), 5);
    assert_eq!(plan.success_metrics.len(), 2);

    let forge = artifact.get(FORGE_KEY).unwrap();
    assert_eq!(
        forge.get("constitutional_compliance"),
        Some(&Value::from("verified"))
    );
}

#[test]
fn kernel_rejects_underspecified_specification() {
    // GIVEN a specification without context or hardware
    let rules = RuleDocument::load(demo("kernel.yml")).unwrap();
    let spec = DomainSpecification::load(demo("underspecified.json")).unwrap();

    // WHEN generation runs
    let err = Generator::default().run(&rules, &spec).unwrap_err();

    // THEN every failing constraint is listed, in kernel order
    let GenerateError::ConstraintViolation(report) = err;
    assert_eq!(
        report.ids(),
        vec!["has-context", "hardware-aware", "domain-named", "known-capacity"]
    );
    assert_eq!(
        report.failures[0].reason,
        "predicate not satisfied: exists(context)"
    );
}

#[test]
fn min_hardware_example() {
    let rules = RuleDocument::load(demo("min_hardware.yml")).unwrap();

    // 4 GB: one failing result, then a violation naming min-hardware
    let small = DomainSpecification::from_map("small", fields! { "ram_gb" => 4 });
    let evaluation = evaluate(&rules, &small);
    assert_eq!(evaluation.len(), 1);
    assert_eq!(evaluation.as_slice()[0].id(), "min-hardware");
    assert!(!evaluation.as_slice()[0].passed());
    let err = generate(&small, evaluation.as_slice()).unwrap_err();
    assert_eq!(err.report().unwrap().ids(), vec!["min-hardware"]);

    // 16 GB: one passing result, then a validated artifact
    let large = DomainSpecification::from_map("large", fields! { "ram_gb" => 16 });
    let evaluation = evaluate(&rules, &large);
    assert!(evaluation.as_slice()[0].passed());
    let artifact = generate(&large, evaluation.as_slice()).unwrap();
    assert_eq!(
        artifact.fields(),
        &fields! { "ram_gb" => 16, "validated" => true }
    );
}

#[test]
fn evaluation_is_repeatable() {
    let rules = RuleDocument::load(demo("kernel.yml")).unwrap();
    let spec = DomainSpecification::load(demo("underspecified.json")).unwrap();

    assert_eq!(evaluate(&rules, &spec), evaluate(&rules, &spec));
}
