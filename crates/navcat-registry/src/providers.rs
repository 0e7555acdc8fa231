//! Collaborators the registry consults about the host platform.
//!
//! The capability probe answers "can this platform run the gated category
//! at all"; the policy provider answers "is the current user allowed to".
//! Both are traits so hosts and tests can plug in their own sources.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PolicyError;

/// Reports whether the platform supports the gated category.
///
/// Expected to be cheap and side-effect free; the registry may call it
/// more than once.
pub trait CapabilityProbe: Send + Sync {
    fn is_feature_available(&self) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_feature_available(&self) -> bool {
        self()
    }
}

/// Capability answer fixed at construction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticCapability {
    pub available: bool,
}

impl StaticCapability {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

impl CapabilityProbe for StaticCapability {
    fn is_feature_available(&self) -> bool {
        self.available
    }
}

/// Local account identifier handed to the policy provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of administrative policy values.
///
/// Calls may block (directory lookups, management APIs). The feature gate
/// runs them off the caller's thread with a timeout.
pub trait PolicyProvider: Send + Sync {
    /// Local user accounts, in the order the platform reports them.
    fn local_users(&self) -> Result<Vec<UserId>, PolicyError>;

    /// Boolean policy value for `user` at `namespace/key`.
    fn policy_value(&self, user: &UserId, namespace: &str, key: &str)
    -> Result<bool, PolicyError>;
}

/// Policy values held in memory, typically loaded from config.
///
/// Keys are `"{namespace}/{key}"`. Missing values read as `false`.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicyProvider {
    users: Vec<UserId>,
    values: BTreeMap<String, bool>,
}

impl StaticPolicyProvider {
    pub fn new(users: Vec<UserId>, values: BTreeMap<String, bool>) -> Self {
        Self { users, values }
    }

    /// Single-user provider with one policy value set.
    pub fn single(user: &str, namespace: &str, key: &str, allowed: bool) -> Self {
        let mut values = BTreeMap::new();
        values.insert(policy_path(namespace, key), allowed);
        Self::new(vec![UserId::new(user)], values)
    }
}

impl PolicyProvider for StaticPolicyProvider {
    fn local_users(&self) -> Result<Vec<UserId>, PolicyError> {
        Ok(self.users.clone())
    }

    fn policy_value(
        &self,
        user: &UserId,
        namespace: &str,
        key: &str,
    ) -> Result<bool, PolicyError> {
        if !self.users.contains(user) {
            return Err(PolicyError::Unavailable {
                message: format!("unknown user {user}"),
            });
        }
        Ok(self
            .values
            .get(&policy_path(namespace, key))
            .copied()
            .unwrap_or(false))
    }
}

pub(crate) fn policy_path(namespace: &str, key: &str) -> String {
    format!("{namespace}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_capability_probes() {
        let probe = || true;
        assert!(probe.is_feature_available());
        assert!(!StaticCapability::default().is_feature_available());
    }

    #[test]
    fn static_policy_reads_values() {
        let provider = StaticPolicyProvider::single("alice", "Education", "AllowGraphing", true);
        let users = provider.local_users().unwrap();
        assert_eq!(users, vec![UserId::new("alice")]);
        assert_eq!(
            provider.policy_value(&users[0], "Education", "AllowGraphing"),
            Ok(true)
        );
        assert_eq!(
            provider.policy_value(&users[0], "Education", "Other"),
            Ok(false)
        );
    }

    #[test]
    fn static_policy_rejects_unknown_user() {
        let provider = StaticPolicyProvider::single("alice", "Education", "AllowGraphing", true);
        assert!(
            provider
                .policy_value(&UserId::new("bob"), "Education", "AllowGraphing")
                .is_err()
        );
    }
}
