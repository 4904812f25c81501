use std::collections::BTreeMap;

/// Untyped attribute value as handed over by the configuration parser.
///
/// Optional and repeated fields frequently arrive wrapped in a sequence even when they
/// hold a single value; see [`crate::attribute`] for how checks read them.
pub type AttributeValue = serde_json::Value;

pub type Attributes = BTreeMap<String, AttributeValue>;

/// One declared infrastructure object, e.g. `aws_instance.web`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceInstance {
    resource_type: String,
    name: String,
    attributes: Attributes,
    shape_error: Option<String>,
}

impl ResourceInstance {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes,
            shape_error: None,
        }
    }

    /// A resource whose attribute mapping could not be read. Every applicable check
    /// records FAILED for it.
    pub fn malformed(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes: Attributes::new(),
            shape_error: Some(reason.into()),
        }
    }

    pub fn shape_error(&self) -> Option<&str> {
        self.shape_error.as_deref()
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Identifier within the resource type (`web` for `aws_instance.web`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Resource instances grouped by type.
///
/// Types iterate in first-insertion order and instances keep the order they were pushed,
/// which is the order the upstream parser produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Configuration {
    groups: Vec<(String, Vec<ResourceInstance>)>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instance: ResourceInstance) {
        match self
            .groups
            .iter_mut()
            .find(|(ty, _)| ty == instance.resource_type())
        {
            Some((_, instances)) => instances.push(instance),
            None => self
                .groups
                .push((instance.resource_type().to_string(), vec![instance])),
        }
    }

    pub fn with_resource(mut self, instance: ResourceInstance) -> Self {
        self.push(instance);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResourceInstance])> {
        self.groups
            .iter()
            .map(|(ty, instances)| (ty.as_str(), instances.as_slice()))
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(ty, _)| ty.as_str())
    }

    pub fn instances_of(&self, resource_type: &str) -> &[ResourceInstance] {
        self.groups
            .iter()
            .find(|(ty, _)| ty == resource_type)
            .map(|(_, instances)| instances.as_slice())
            .unwrap_or(&[])
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceInstance> {
        self.groups.iter().flat_map(|(_, instances)| instances.iter())
    }

    pub fn type_count(&self) -> usize {
        self.groups.len()
    }

    pub fn resource_count(&self) -> usize {
        self.groups.iter().map(|(_, instances)| instances.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }
}

impl FromIterator<ResourceInstance> for Configuration {
    fn from_iter<I: IntoIterator<Item = ResourceInstance>>(iter: I) -> Self {
        let mut cfg = Configuration::new();
        for instance in iter {
            cfg.push(instance);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_by_type_in_first_seen_order() {
        let cfg: Configuration = [
            ResourceInstance::new("aws_security_group", "b", Attributes::new()),
            ResourceInstance::new("aws_instance", "web", Attributes::new()),
            ResourceInstance::new("aws_security_group", "a", Attributes::new()),
        ]
        .into_iter()
        .collect();

        let types: Vec<&str> = cfg.resource_types().collect();
        assert_eq!(types, vec!["aws_security_group", "aws_instance"]);

        let names: Vec<&str> = cfg
            .instances_of("aws_security_group")
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(cfg.resource_count(), 3);
        assert_eq!(cfg.type_count(), 2);
        assert!(cfg.instances_of("aws_s3_bucket").is_empty());
    }

    #[test]
    fn address_joins_type_and_name() {
        let mut attrs = Attributes::new();
        attrs.insert("subnet_id".to_string(), json!(["subnet-private-abc"]));
        let r = ResourceInstance::new("aws_instance", "web", attrs);
        assert_eq!(r.address(), "aws_instance.web");
        assert_eq!(r.attribute("subnet_id"), Some(&json!(["subnet-private-abc"])));
        assert!(r.attribute("ami").is_none());
    }

    #[test]
    fn empty_configuration_is_empty() {
        let cfg = Configuration::new();
        assert!(cfg.is_empty());
        assert_eq!(cfg.iter().count(), 0);
    }
}
