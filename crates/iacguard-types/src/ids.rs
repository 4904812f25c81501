//! Stable identifiers for the built-in checks.
//!
//! Ids keep the `CUSTOM_<PROVIDER>_<N>` form the rule pack was published with, so
//! existing suppression lists and dashboards keep matching.

// Checks
pub const CHECK_AWS_EC2_INSTANCE_PROFILE: &str = "CUSTOM_AWS_1";
pub const CHECK_AWS_EC2_PRIVATE_SUBNET: &str = "CUSTOM_AWS_2";
pub const CHECK_AWS_SG_DESCRIPTION: &str = "CUSTOM_AWS_3";

// Resource types
pub const RESOURCE_AWS_INSTANCE: &str = "aws_instance";
pub const RESOURCE_AWS_SECURITY_GROUP: &str = "aws_security_group";
