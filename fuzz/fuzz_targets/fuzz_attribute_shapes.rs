//! Fuzz target for attribute normalization and the built-in predicates.
//!
//! Goal: no attribute shape makes a built-in check panic, normalization is idempotent, and
//! a resource that lacks the inspected attribute never passes.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_attribute_shapes
//! ```

#![no_main]

use arbitrary::Arbitrary;
use iacguard_domain::checks::builtin;
use iacguard_domain::{Attributes, Check, ResourceInstance, normalize};
use iacguard_types::Verdict;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Structured attribute value; mirrors the shapes upstream parsers hand over.
#[derive(Arbitrary, Debug)]
enum Shape {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Shape>),
}

impl Shape {
    fn into_value(self, depth: usize) -> Value {
        match self {
            Shape::Null => Value::Null,
            Shape::Bool(b) => Value::Bool(b),
            Shape::Int(i) => Value::from(i),
            Shape::Str(s) => Value::String(s),
            Shape::List(items) if depth < 8 => Value::Array(
                items
                    .into_iter()
                    .take(16)
                    .map(|s| s.into_value(depth + 1))
                    .collect(),
            ),
            Shape::List(_) => Value::Array(Vec::new()),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct AttributeInput {
    value: Shape,
    /// Attribute key the value is stored under.
    key: u8,
}

const KEYS: [&str; 4] = ["iam_instance_profile", "subnet_id", "description", "tags"];

fuzz_target!(|input: AttributeInput| {
    let value = input.value.into_value(0);

    let once = normalize(Some(&value));
    assert_eq!(once.normalize(), once);

    let key = KEYS[usize::from(input.key) % KEYS.len()];
    let mut attributes = Attributes::new();
    attributes.insert(key.to_string(), value);

    for check in builtin() {
        for resource_type in &check.meta().supported_resources {
            let resource = ResourceInstance::new(resource_type, "fuzz", attributes.clone());
            let _ = check.evaluate(&resource);

            let empty = ResourceInstance::new(resource_type, "empty", Attributes::new());
            assert_ne!(check.evaluate(&empty), Ok(Verdict::Passed));
        }
    }
});
