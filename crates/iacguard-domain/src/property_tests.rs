//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - attribute normalization (absence, first-element rule, idempotence)
//! - fail-closed behavior of every built-in check
//! - report ordering determinism

use crate::attribute::{Normalized, normalize};
use crate::checks::builtin_registry;
use crate::engine::{EvalOptions, Evaluator};
use crate::model::{Attributes, Configuration, ResourceInstance};
use crate::report::aggregate;
use crate::test_support::config_all_enabled;
use iacguard_types::{Verdict, ids};
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        prop::string::string_regex("[a-zA-Z -]{0,16}")
            .unwrap()
            .prop_map(Value::String),
        Just(Value::String("Managed by Terraform".to_string())),
        Just(Value::String("subnet-private-abc".to_string())),
    ]
}

/// Raw attribute shapes as upstream parsers produce them: bare, wrapped, nested.
fn arb_raw() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_scalar(),
        prop::collection::vec(arb_scalar(), 0..4).prop_map(Value::Array),
        prop::collection::vec(
            prop::collection::vec(arb_scalar(), 0..3).prop_map(Value::Array),
            0..3
        )
        .prop_map(Value::Array),
    ]
}

fn arb_attr_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z][a-z_]{0,15}").unwrap(),
        Just("subnet_id".to_string()),
        Just("iam_instance_profile".to_string()),
        Just("description".to_string()),
    ]
}

fn arb_attributes() -> impl Strategy<Value = Attributes> {
    prop::collection::btree_map(arb_attr_name(), arb_raw(), 0..6)
}

fn arb_resource() -> impl Strategy<Value = ResourceInstance> {
    (
        prop_oneof![
            Just(ids::RESOURCE_AWS_INSTANCE),
            Just(ids::RESOURCE_AWS_SECURITY_GROUP),
            Just("aws_s3_bucket"),
        ],
        prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap(),
        arb_attributes(),
    )
        .prop_map(|(ty, name, attrs)| ResourceInstance::new(ty, name, attrs))
}

fn arb_configuration() -> impl Strategy<Value = Configuration> {
    prop::collection::vec(arb_resource(), 0..24)
        .prop_map(|resources| resources.into_iter().collect())
}

/// The attribute each built-in check inspects.
fn inspected_attribute(check_id: &str) -> &'static str {
    match check_id {
        ids::CHECK_AWS_EC2_INSTANCE_PROFILE => "iam_instance_profile",
        ids::CHECK_AWS_EC2_PRIVATE_SUBNET => "subnet_id",
        ids::CHECK_AWS_SG_DESCRIPTION => "description",
        other => panic!("no attribute mapping for {other}"),
    }
}

// ============================================================================
// Property tests: normalization
// ============================================================================

proptest! {
    #[test]
    fn empty_sequences_normalize_to_absent(depth in 0usize..4) {
        let mut raw = Value::Array(Vec::new());
        for _ in 0..depth {
            raw = Value::Array(vec![raw]);
        }
        prop_assert_eq!(normalize(Some(&raw)), Normalized::Absent);
        prop_assert_eq!(normalize(None), Normalized::Absent);
    }

    #[test]
    fn first_element_wins(first in arb_scalar(), rest in prop::collection::vec(arb_raw(), 0..4)) {
        let mut items = vec![first.clone()];
        items.extend(rest);
        let raw = Value::Array(items);
        prop_assert_eq!(normalize(Some(&raw)), Normalized::Scalar(&first));
    }

    #[test]
    fn normalization_is_idempotent(raw in arb_raw()) {
        let once = normalize(Some(&raw));
        prop_assert_eq!(once.normalize(), once);
        if let Normalized::Scalar(v) = once {
            prop_assert!(!v.is_array());
            prop_assert_eq!(normalize(Some(v)), once);
        }
    }
}

// ============================================================================
// Property tests: fail-closed checks
// ============================================================================

proptest! {
    #[test]
    fn missing_attribute_never_passes(attrs in arb_attributes()) {
        let registry = builtin_registry(&config_all_enabled()).unwrap();
        for check in registry.iter() {
            let mut attrs = attrs.clone();
            attrs.remove(inspected_attribute(check.id()));
            let ty = check.meta().supported_resources[0].clone();
            let resource = ResourceInstance::new(ty, "r", attrs);
            let verdict = check.evaluate(&resource);
            prop_assert_eq!(verdict, Ok(Verdict::Failed), "check {}", check.id());
        }
    }

    #[test]
    fn absent_equivalent_shapes_never_pass(empty in prop_oneof![
        Just(Value::Null),
        Just(Value::Array(Vec::new())),
        Just(Value::String(String::new())),
        Just(Value::Array(vec![Value::String(String::new())])),
    ]) {
        let registry = builtin_registry(&config_all_enabled()).unwrap();
        for check in registry.iter() {
            let mut attrs = Attributes::new();
            attrs.insert(inspected_attribute(check.id()).to_string(), empty.clone());
            let ty = check.meta().supported_resources[0].clone();
            let resource = ResourceInstance::new(ty, "r", attrs);
            prop_assert_ne!(check.evaluate(&resource), Ok(Verdict::Passed));
        }
    }
}

// ============================================================================
// Property tests: determinism
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn repeated_runs_produce_identical_reports(cfg in arb_configuration()) {
        let registry = builtin_registry(&config_all_enabled()).unwrap();

        let first = aggregate(&Evaluator::default().run(&cfg, &registry));
        let second = aggregate(&Evaluator::default().run(&cfg, &registry));
        let parallel = aggregate(
            &Evaluator::new(EvalOptions { parallel: true, cancel: None }).run(&cfg, &registry),
        );

        let a = serde_json::to_string(&first.records).unwrap();
        let b = serde_json::to_string(&second.records).unwrap();
        let c = serde_json::to_string(&parallel.records).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
        prop_assert_eq!(first.counts, parallel.counts);
    }

    #[test]
    fn aggregate_ignores_input_order(cfg in arb_configuration()) {
        let registry = builtin_registry(&config_all_enabled()).unwrap();
        let records = Evaluator::default().run(&cfg, &registry);
        let mut reversed = records.clone();
        reversed.reverse();

        let report = aggregate(&records);
        prop_assert_eq!(&report, &aggregate(&reversed));
        for pair in report.records.windows(2) {
            let a = (&pair[0].resource_type, &pair[0].resource_identifier, &pair[0].check_id);
            let b = (&pair[1].resource_type, &pair[1].resource_identifier, &pair[1].check_id);
            prop_assert!(a <= b);
        }
    }

    #[test]
    fn every_applicable_pair_gets_one_record(cfg in arb_configuration()) {
        let registry = builtin_registry(&config_all_enabled()).unwrap();
        let records = Evaluator::default().run(&cfg, &registry);
        let expected: usize = cfg
            .resources()
            .map(|r| registry.checks_for(r.resource_type()).len())
            .sum();
        prop_assert_eq!(records.len(), expected);
        let report = aggregate(&records);
        prop_assert_eq!(report.passed(), report.counts.failed == 0);
    }
}
