//! Explain registry for checks.
//!
//! Maps check IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Declaration that would fail the check.
    pub before: &'static str,
    /// Declaration that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_AWS_EC2_INSTANCE_PROFILE => Some(explain_ec2_instance_profile()),
        ids::CHECK_AWS_EC2_PRIVATE_SUBNET => Some(explain_ec2_private_subnet()),
        ids::CHECK_AWS_SG_DESCRIPTION => Some(explain_sg_description()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_AWS_EC2_INSTANCE_PROFILE,
        ids::CHECK_AWS_EC2_PRIVATE_SUBNET,
        ids::CHECK_AWS_SG_DESCRIPTION,
    ]
}

fn explain_ec2_instance_profile() -> Explanation {
    Explanation {
        title: "EC2 Instance Profile Attached",
        description: "\
Requires every `aws_instance` to declare a non-empty `iam_instance_profile`.

Instances without a profile either run with no AWS identity at all or fall back to
long-lived credentials baked into the image or user data. Both are hard to rotate
and hard to audit.

The check tests presence only. `null`, `false`, `0`, `\"\"`, `{}` and lists holding
only such values (`[]`, `[\"\"]`, `[null]`) count as missing.",
        remediation: "\
Create an `aws_iam_instance_profile` wrapping a least-privilege role and reference it
from the instance.",
        examples: ExamplePair {
            before: r#"resource "aws_instance" "web" {
  ami           = "ami-123456"
  instance_type = "t3.micro"
}"#,
            after: r#"resource "aws_instance" "web" {
  ami                  = "ami-123456"
  instance_type        = "t3.micro"
  iam_instance_profile = aws_iam_instance_profile.web.name
}"#,
        },
    }
}

fn explain_ec2_private_subnet() -> Explanation {
    Explanation {
        title: "EC2 Instance In Private Subnet",
        description: "\
Requires every `aws_instance` to be placed in a subnet whose identifier marks it as
private (contains `private`, case-sensitive).

Instances in public subnets are one security group mistake away from being reachable
from the internet. A missing `subnet_id` fails the check: the default VPC placement
is public. So does a structured value such as an object, which names no subnet.",
        remediation: "\
Set `subnet_id` to a private subnet and reach the instance through a load balancer,
bastion or SSM session instead.",
        examples: ExamplePair {
            before: r#"resource "aws_instance" "web" {
  subnet_id = "subnet-public-a"
}"#,
            after: r#"resource "aws_instance" "web" {
  subnet_id = aws_subnet.private_a.id  # subnet-private-a
}"#,
        },
    }
}

fn explain_sg_description() -> Explanation {
    Explanation {
        title: "Security Group Description",
        description: "\
Requires every `aws_security_group` to carry a meaningful `description`.

The provider injects `Managed by Terraform` when no description is written. That
value is treated the same as a missing description: it says nothing about what
traffic the group is meant to allow.",
        remediation: "\
Describe the purpose of the group. Note that changing a security group description
forces replacement of the group.",
        examples: ExamplePair {
            before: r#"resource "aws_security_group" "sg1" {
  name = "internal"
}"#,
            after: r#"resource "aws_security_group" "sg1" {
  name        = "internal"
  description = "allow internal traffic"
}"#,
        },
    }
}
