//! Built-in checks.
//!
//! Each check is compiled in behind its own cargo feature and registered by
//! [`builtin_registry`] when the resolved config enables it.

use crate::check::Check;
use crate::policy::EffectiveConfig;
use crate::registry::{CheckRegistry, RegistryError};
use tracing::debug;

#[cfg(feature = "check-ec2-instance-profile")]
mod ec2_instance_profile;
#[cfg(feature = "check-ec2-private-subnet")]
mod ec2_private_subnet;
#[cfg(feature = "check-sg-description")]
mod sg_description;

#[cfg(all(
    test,
    feature = "check-ec2-instance-profile",
    feature = "check-ec2-private-subnet",
    feature = "check-sg-description"
))]

#[cfg(feature = "check-ec2-instance-profile")]
pub use ec2_instance_profile::Ec2InstanceProfile;
#[cfg(feature = "check-ec2-private-subnet")]
pub use ec2_private_subnet::{Ec2PrivateSubnet, PRIVATE_SUBNET_MARKER};
#[cfg(feature = "check-sg-description")]
pub use sg_description::{PLACEHOLDER_DESCRIPTIONS, SecurityGroupDescription};

/// Every built-in check compiled into this build, in id order.
pub fn builtin() -> Vec<Box<dyn Check>> {
    #[allow(unused_mut)]
    let mut checks: Vec<Box<dyn Check>> = Vec::new();
    #[cfg(feature = "check-ec2-instance-profile")]
    checks.push(Box::new(Ec2InstanceProfile::new()));
    #[cfg(feature = "check-ec2-private-subnet")]
    checks.push(Box::new(Ec2PrivateSubnet::new()));
    #[cfg(feature = "check-sg-description")]
    checks.push(Box::new(SecurityGroupDescription::new()));
    checks
}

/// Ids of the built-ins compiled into this build, in id order.
///
/// A subset of `iacguard_types::explain::all_check_ids`, which lists every check the
/// tool knows about whatever the enabled features.
pub fn compiled_check_ids() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut check_ids = Vec::new();
    #[cfg(feature = "check-ec2-instance-profile")]
    check_ids.push(iacguard_types::ids::CHECK_AWS_EC2_INSTANCE_PROFILE);
    #[cfg(feature = "check-ec2-private-subnet")]
    check_ids.push(iacguard_types::ids::CHECK_AWS_EC2_PRIVATE_SUBNET);
    #[cfg(feature = "check-sg-description")]
    check_ids.push(iacguard_types::ids::CHECK_AWS_SG_DESCRIPTION);
    check_ids
}

/// Register the built-ins enabled by `cfg` and freeze the registry.
pub fn builtin_registry(cfg: &EffectiveConfig) -> Result<CheckRegistry, RegistryError> {
    let mut registry = CheckRegistry::new();
    for check in builtin() {
        if !cfg.is_enabled(check.id()) {
            debug!(check_id = check.id(), "check disabled by config");
            continue;
        }
        registry.register_boxed(check)?;
    }
    registry.freeze();
    Ok(registry)
}
