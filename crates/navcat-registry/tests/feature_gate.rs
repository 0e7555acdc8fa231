//! Feature gate behaviour observed through the registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use navcat_registry::{
    FeatureGate, GateState, NavCategoryRegistry, PolicyError, PolicyProvider, StaticCapability,
    UserId, ViewMode,
};

#[derive(Default)]
struct CountingPolicy {
    calls: AtomicUsize,
    allowed: bool,
}

impl PolicyProvider for CountingPolicy {
    fn local_users(&self) -> Result<Vec<UserId>, PolicyError> {
        Ok(vec![UserId::new("alice")])
    }

    fn policy_value(
        &self,
        user: &UserId,
        namespace: &str,
        key: &str,
    ) -> Result<bool, PolicyError> {
        assert_eq!(user.as_str(), "alice");
        assert_eq!(namespace, "Education");
        assert_eq!(key, "AllowGraphingCalculator");
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.allowed)
    }
}

struct NoUsers;

impl PolicyProvider for NoUsers {
    fn local_users(&self) -> Result<Vec<UserId>, PolicyError> {
        Ok(Vec::new())
    }

    fn policy_value(&self, _: &UserId, _: &str, _: &str) -> Result<bool, PolicyError> {
        Ok(true)
    }
}

#[test]
fn registry_queries_issue_one_policy_round_trip() {
    let policy = Arc::new(CountingPolicy {
        allowed: true,
        ..CountingPolicy::default()
    });
    let gate = FeatureGate::new(Arc::new(StaticCapability::new(true)), policy.clone());
    let registry = NavCategoryRegistry::new(Arc::new(gate));

    assert!(registry.is_view_mode_enabled(ViewMode::Graphing));
    assert_eq!(registry.deserialize(17), ViewMode::Graphing);
    assert_eq!(registry.deserialize(17), ViewMode::Graphing);
    assert!(registry.feature_gate().is_feature_enabled());
    assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn capability_probe_closure_controls_presence() {
    let policy = Arc::new(CountingPolicy::default());
    let gate = FeatureGate::new(Arc::new(|| false), policy.clone());
    let registry = NavCategoryRegistry::new(Arc::new(gate));

    assert!(!registry.is_valid_view_mode(ViewMode::Graphing));
    assert_eq!(registry.feature_gate().state(), GateState::Unchecked);
    assert_eq!(policy.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_local_user_keeps_graphing_present_but_disabled() {
    let gate = FeatureGate::new(Arc::new(StaticCapability::new(true)), Arc::new(NoUsers));
    let registry = NavCategoryRegistry::new(Arc::new(gate));

    assert!(registry.is_valid_view_mode(ViewMode::Graphing));
    assert!(!registry.is_view_mode_enabled(ViewMode::Graphing));
    assert_eq!(registry.deserialize(17), ViewMode::None);
    assert_eq!(registry.feature_gate().state(), GateState::Checked(false));
}

#[test]
fn reset_allows_deserialize_to_see_new_policy() {
    let gate = Arc::new(FeatureGate::new(
        Arc::new(StaticCapability::new(true)),
        Arc::new(NoUsers),
    ));
    let registry = NavCategoryRegistry::new(Arc::clone(&gate));
    assert_eq!(registry.deserialize(17), ViewMode::None);

    gate.reset();
    assert_eq!(gate.state(), GateState::Unchecked);
    // Still no user, so the retry lands on disabled again.
    assert_eq!(registry.deserialize(17), ViewMode::None);
    assert_eq!(gate.state(), GateState::Checked(false));
}

#[test]
fn concurrent_readers_see_one_manifest() {
    let policy = Arc::new(CountingPolicy {
        allowed: true,
        ..CountingPolicy::default()
    });
    let gate = FeatureGate::new(Arc::new(StaticCapability::new(true)), policy.clone());
    let registry = Arc::new(NavCategoryRegistry::new(Arc::new(gate)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.manifest().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("reader thread"), 18);
    }
    assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
}
