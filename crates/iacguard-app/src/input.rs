//! Input boundary: an already parsed configuration handed over as JSON.
//!
//! Accepted shape is `{ "<type>": { "<name>": { "<attr>": <value> } } }`. The Terraform JSON
//! syntax wrappers are tolerated as well: a top-level `"resource"` key, and block bodies given
//! as single-element lists.
//!
//! Objects are read with repeated keys kept. A resource declared twice, or an attribute
//! given twice, makes that resource malformed instead of letting the last body win.

use anyhow::Context;
use iacguard_domain::{Attributes, Configuration, ResourceInstance};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

pub const DUPLICATE_RESOURCE_NAME: &str = "duplicate resource name";

pub fn parse_configuration_json(text: &str) -> anyhow::Result<Configuration> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let document = Node::deserialize(&mut deserializer).context("parse configuration json")?;
    deserializer.end().context("parse configuration json")?;

    let Node::Object(mut root) = document else {
        anyhow::bail!("configuration must be a JSON object keyed by resource type");
    };

    if root.len() == 1 && root[0].0 == "resource" {
        debug!("unwrapping top-level `resource` block");
        let (_, inner) = root.remove(0);
        return parse_types(entries(inner, "resource")?);
    }

    parse_types(root)
}

/// A resource body, or `None` once its name was seen a second time.
type Declared = (String, String, Option<Node>);

fn parse_types(types: Vec<(String, Node)>) -> anyhow::Result<Configuration> {
    let mut declared: Vec<Declared> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (resource_type, instances) in types {
        for (name, body) in entries(instances, &resource_type)? {
            match index.entry((resource_type.clone(), name.clone())) {
                Entry::Occupied(slot) => {
                    warn!(resource = %format!("{resource_type}.{name}"), "resource declared more than once");
                    declared[*slot.get()].2 = None;
                }
                Entry::Vacant(slot) => {
                    slot.insert(declared.len());
                    declared.push((resource_type.clone(), name, Some(body)));
                }
            }
        }
    }

    Ok(declared
        .into_iter()
        .map(|(resource_type, name, body)| match body {
            Some(body) => resource_instance(&resource_type, name, body),
            None => ResourceInstance::malformed(resource_type, name, DUPLICATE_RESOURCE_NAME),
        })
        .collect())
}

/// A block maps names to bodies, either directly or as a list of such maps.
fn entries(node: Node, block: &str) -> anyhow::Result<Vec<(String, Node)>> {
    match node {
        Node::Object(entries) => Ok(entries),
        Node::List(items) => {
            let mut merged = Vec::new();
            for item in items {
                match item {
                    Node::Object(entries) => merged.extend(entries),
                    other => anyhow::bail!(
                        "resource type `{block}` must map names to resources, found a list of {}",
                        other.kind()
                    ),
                }
            }
            Ok(merged)
        }
        other => anyhow::bail!(
            "resource type `{block}` must map names to resources, found {}",
            other.kind()
        ),
    }
}

fn resource_instance(resource_type: &str, name: String, body: Node) -> ResourceInstance {
    let body = match body {
        Node::List(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    };
    let fields = match body {
        Node::Object(fields) => fields,
        other => {
            let reason = format!("attributes must be an object, found {}", other.kind());
            debug!(resource_type, %name, %reason, "malformed resource body");
            return ResourceInstance::malformed(resource_type, name, reason);
        }
    };

    let mut attributes = Attributes::new();
    for (key, value) in fields {
        if attributes.contains_key(&key) {
            let reason = format!("duplicate attribute `{key}`");
            debug!(resource_type, %name, %reason, "malformed resource body");
            return ResourceInstance::malformed(resource_type, name, reason);
        }
        attributes.insert(key, value.into_value());
    }
    ResourceInstance::new(resource_type, name, attributes)
}

/// JSON tree that keeps object entries in document order, repeated keys included.
#[derive(Clone, Debug, PartialEq)]
enum Node {
    Object(Vec<(String, Node)>),
    List(Vec<Node>),
    Scalar(Value),
}

impl Node {
    /// Attribute values are handed to checks as plain JSON; a repeated key nested inside
    /// one keeps its last value.
    fn into_value(self) -> Value {
        match self {
            Node::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.into_value()))
                    .collect::<Map<String, Value>>(),
            ),
            Node::List(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
            Node::Scalar(value) => value,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Object(_) => "an object",
            Node::List(_) => "a list",
            Node::Scalar(Value::Null) => "null",
            Node::Scalar(Value::Bool(_)) => "a boolean",
            Node::Scalar(Value::Number(_)) => "a number",
            Node::Scalar(Value::String(_)) => "a string",
            Node::Scalar(_) => "a value",
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::Bool(v)))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::Number(v.into())))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::Number(v.into())))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Number::from_f64(v)
                    .map(|n| Node::Scalar(Value::Number(n)))
                    .ok_or_else(|| de::Error::custom("invalid float value"))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::String(v.to_owned())))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::String(v)))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::Null))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Value::Null))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<Node>()? {
                    items.push(item);
                }
                Ok(Node::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    entries.push((key, value));
                }
                Ok(Node::Object(entries))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}
