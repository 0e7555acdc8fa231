//! Cached capability + policy check for the gated category.
//!
//! The gate is a three-state machine: [`GateState::Unchecked`] until the
//! first check, then [`GateState::Checked`] with the result. The check holds
//! the state mutex across the policy round-trip, so concurrent first
//! callers wait for one round-trip instead of issuing their own.
//!
//! The round-trip runs on a helper thread and is abandoned after the
//! configured timeout. Any failure (no local user, provider error, timeout)
//! is cached as disabled; [`FeatureGate::reset`] re-arms the check.
//!
//! At most one helper thread exists per gate. A check that follows a
//! timeout waits on the round-trip still in flight instead of spawning
//! another one.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::PolicyError;
use crate::providers::{CapabilityProbe, PolicyProvider, UserId};

/// Default bound on the policy round-trip.
pub const DEFAULT_POLICY_TIMEOUT: Duration = Duration::from_secs(5);

/// Policy namespace consulted for the graphing category.
pub const GRAPHING_POLICY_NAMESPACE: &str = "Education";

/// Policy key consulted for the graphing category.
pub const GRAPHING_POLICY_KEY: &str = "AllowGraphingCalculator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unchecked,
    Checked(bool),
}

/// Location of a boolean policy value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyKey {
    pub namespace: String,
    pub key: String,
}

impl PolicyKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    pub fn graphing() -> Self {
        Self::new(GRAPHING_POLICY_NAMESPACE, GRAPHING_POLICY_KEY)
    }
}

pub struct FeatureGate {
    capability: Arc<dyn CapabilityProbe>,
    policy: Arc<dyn PolicyProvider>,
    policy_key: PolicyKey,
    timeout: Duration,
    state: Mutex<GateState>,
    /// Round-trip abandoned by an earlier timed-out check.
    pending: Mutex<Option<Receiver<Result<bool, PolicyError>>>>,
}

impl FeatureGate {
    /// Gate for the graphing category with the default timeout.
    pub fn new(capability: Arc<dyn CapabilityProbe>, policy: Arc<dyn PolicyProvider>) -> Self {
        Self {
            capability,
            policy,
            policy_key: PolicyKey::graphing(),
            timeout: DEFAULT_POLICY_TIMEOUT,
            state: Mutex::new(GateState::Unchecked),
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_policy_key(mut self, policy_key: PolicyKey) -> Self {
        self.policy_key = policy_key;
        self
    }

    pub fn policy_key(&self) -> &PolicyKey {
        &self.policy_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the platform supports the gated category at all.
    pub fn is_feature_available(&self) -> bool {
        self.capability.is_feature_available()
    }

    /// Whether the gated category may be used.
    ///
    /// Returns `false` without touching the cache when the platform lacks
    /// the capability. Otherwise performs the policy round-trip on the first
    /// call and serves the cached answer afterwards.
    pub fn is_feature_enabled(&self) -> bool {
        if !self.is_feature_available() {
            return false;
        }

        let mut state = self.lock_state();
        if let GateState::Checked(enabled) = *state {
            return enabled;
        }

        let enabled = match self.query_policy() {
            Ok(allowed) => {
                info!(
                    namespace = %self.policy_key.namespace,
                    key = %self.policy_key.key,
                    allowed,
                    "policy check completed"
                );
                allowed
            }
            Err(error) => {
                warn!(
                    namespace = %self.policy_key.namespace,
                    key = %self.policy_key.key,
                    %error,
                    "policy check failed, treating feature as disabled"
                );
                false
            }
        };
        *state = GateState::Checked(enabled);
        enabled
    }

    /// Current cache state. Does not trigger a check.
    pub fn state(&self) -> GateState {
        *self.lock_state()
    }

    /// Forget the cached answer so the next call re-queries the policy.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        if *state != GateState::Unchecked {
            warn!("feature gate reset, next check re-queries policy");
        }
        *state = GateState::Unchecked;
    }

    fn lock_state(&self) -> MutexGuard<'_, GateState> {
        // The state is a plain Copy value, a panicking holder cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn query_policy(&self) -> Result<bool, PolicyError> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let receiver = match pending.take() {
            Some(receiver) => {
                debug!(timeout = ?self.timeout, "waiting on in-flight policy round-trip");
                receiver
            }
            None => self.spawn_round_trip()?,
        };

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                *pending = Some(receiver);
                Err(PolicyError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(PolicyError::Unavailable {
                message: "policy provider panicked".to_string(),
            }),
        }
    }

    fn spawn_round_trip(&self) -> Result<Receiver<Result<bool, PolicyError>>, PolicyError> {
        let provider = Arc::clone(&self.policy);
        let policy_key = self.policy_key.clone();
        let (sender, receiver) = mpsc::channel();

        debug!(timeout = ?self.timeout, "starting policy round-trip");
        thread::Builder::new()
            .name("navcat-policy".to_string())
            .spawn(move || {
                // The receiver is gone once the gate itself was dropped.
                let _ = sender.send(fetch_policy(provider.as_ref(), &policy_key));
            })
            .map_err(|error| PolicyError::Unavailable {
                message: format!("failed to spawn policy thread: {error}"),
            })?;
        Ok(receiver)
    }
}

impl std::fmt::Debug for FeatureGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("FeatureGate");
        debug
            .field("policy_key", &self.policy_key)
            .field("timeout", &self.timeout);
        // Never wait on a check that is in progress.
        match self.state.try_lock() {
            Ok(state) => debug.field("state", &*state),
            Err(TryLockError::Poisoned(poisoned)) => debug.field("state", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => debug.field("state", &format_args!("<checking>")),
        };
        debug.finish_non_exhaustive()
    }
}

fn fetch_policy(
    provider: &dyn PolicyProvider,
    policy_key: &PolicyKey,
) -> Result<bool, PolicyError> {
    let users = provider.local_users()?;
    let user: &UserId = users.first().ok_or(PolicyError::NoLocalUser)?;
    debug!(%user, "resolved local user for policy check");
    provider.policy_value(user, &policy_key.namespace, &policy_key.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{StaticCapability, StaticPolicyProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPolicy {
        calls: AtomicUsize,
        answer: Result<bool, PolicyError>,
        users: Vec<UserId>,
        delay: Duration,
    }

    impl CountingPolicy {
        fn answering(answer: Result<bool, PolicyError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
                users: vec![UserId::new("alice")],
                delay: Duration::ZERO,
            }
        }
    }

    impl PolicyProvider for CountingPolicy {
        fn local_users(&self) -> Result<Vec<UserId>, PolicyError> {
            Ok(self.users.clone())
        }

        fn policy_value(
            &self,
            _user: &UserId,
            _namespace: &str,
            _key: &str,
        ) -> Result<bool, PolicyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            self.answer.clone()
        }
    }

    fn gate(available: bool, policy: Arc<CountingPolicy>) -> FeatureGate {
        FeatureGate::new(Arc::new(StaticCapability::new(available)), policy)
    }

    #[test]
    fn unavailable_capability_skips_cache() {
        let policy = Arc::new(CountingPolicy::answering(Ok(true)));
        let gate = gate(false, Arc::clone(&policy));
        assert!(!gate.is_feature_enabled());
        assert_eq!(gate.state(), GateState::Unchecked);
        assert_eq!(policy.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn second_call_is_served_from_cache() {
        let policy = Arc::new(CountingPolicy::answering(Ok(true)));
        let gate = gate(true, Arc::clone(&policy));
        assert!(gate.is_feature_enabled());
        assert!(gate.is_feature_enabled());
        assert_eq!(gate.state(), GateState::Checked(true));
        assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_failure_caches_disabled() {
        let policy = Arc::new(CountingPolicy::answering(Err(PolicyError::Unavailable {
            message: "offline".to_string(),
        })));
        let gate = gate(true, Arc::clone(&policy));
        assert!(!gate.is_feature_enabled());
        assert!(!gate.is_feature_enabled());
        assert_eq!(gate.state(), GateState::Checked(false));
        assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_user_caches_disabled() {
        let mut policy = CountingPolicy::answering(Ok(true));
        policy.users.clear();
        let policy = Arc::new(policy);
        let gate = gate(true, Arc::clone(&policy));
        assert!(!gate.is_feature_enabled());
        assert_eq!(gate.state(), GateState::Checked(false));
        assert_eq!(policy.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reset_rearms_the_check() {
        let policy = Arc::new(CountingPolicy::answering(Ok(false)));
        let gate = gate(true, Arc::clone(&policy));
        assert!(!gate.is_feature_enabled());
        gate.reset();
        assert_eq!(gate.state(), GateState::Unchecked);
        assert!(!gate.is_feature_enabled());
        assert_eq!(policy.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn slow_provider_times_out_as_disabled() {
        let mut policy = CountingPolicy::answering(Ok(true));
        policy.delay = Duration::from_millis(500);
        let gate = gate(true, Arc::new(policy)).with_timeout(Duration::from_millis(20));
        assert!(!gate.is_feature_enabled());
        assert_eq!(gate.state(), GateState::Checked(false));
    }

    #[test]
    fn check_after_timeout_reuses_in_flight_round_trip() {
        let mut policy = CountingPolicy::answering(Ok(true));
        policy.delay = Duration::from_millis(300);
        let policy = Arc::new(policy);
        let gate = gate(true, Arc::clone(&policy)).with_timeout(Duration::from_millis(20));

        assert!(!gate.is_feature_enabled());
        gate.reset();
        assert!(!gate.is_feature_enabled());
        assert_eq!(policy.calls.load(Ordering::SeqCst), 1);

        thread::sleep(Duration::from_millis(500));
        gate.reset();
        assert!(gate.is_feature_enabled());
        assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_does_not_wait_on_a_running_check() {
        let policy = Arc::new(CountingPolicy::answering(Ok(true)));
        let gate = gate(true, policy);
        assert!(format!("{gate:?}").contains("Unchecked"));

        let _held = gate.state.lock().expect("state lock");
        assert!(format!("{gate:?}").contains("<checking>"));
    }

    #[test]
    fn custom_policy_key_and_timeout() {
        let policy = StaticPolicyProvider::single("alice", "Lab", "AllowPlotting", true);
        let gate = FeatureGate::new(Arc::new(StaticCapability::new(true)), Arc::new(policy))
            .with_policy_key(PolicyKey::new("Lab", "AllowPlotting"))
            .with_timeout(Duration::from_millis(750));
        assert_eq!(gate.policy_key(), &PolicyKey::new("Lab", "AllowPlotting"));
        assert_eq!(gate.timeout(), Duration::from_millis(750));
        assert!(gate.is_feature_enabled());

        let default_key = FeatureGate::new(
            Arc::new(StaticCapability::new(true)),
            Arc::new(StaticPolicyProvider::single("alice", "Lab", "AllowPlotting", true)),
        );
        assert_eq!(default_key.policy_key(), &PolicyKey::graphing());
        assert_eq!(default_key.timeout(), DEFAULT_POLICY_TIMEOUT);
        assert!(!default_key.is_feature_enabled());
    }

    #[test]
    fn concurrent_first_callers_share_one_round_trip() {
        let mut policy = CountingPolicy::answering(Ok(true));
        policy.delay = Duration::from_millis(50);
        let policy = Arc::new(policy);
        let gate = Arc::new(gate(true, Arc::clone(&policy)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || gate.is_feature_enabled())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("gate thread"));
        }
        assert_eq!(policy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn static_provider_answers_graphing_policy() {
        let policy = StaticPolicyProvider::single(
            "alice",
            GRAPHING_POLICY_NAMESPACE,
            GRAPHING_POLICY_KEY,
            true,
        );
        let gate = FeatureGate::new(Arc::new(StaticCapability::new(true)), Arc::new(policy));
        assert!(gate.is_feature_enabled());
    }
}
