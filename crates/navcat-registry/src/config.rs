//! TOML configuration for hosts without a native platform integration.
//!
//! ```toml
//! [platform]
//! graphing_available = true
//!
//! [policy]
//! timeout_ms = 5000
//! users = ["alice"]
//!
//! [policy.values]
//! "Education/AllowGraphingCalculator" = true
//!
//! [strings]
//! StandardModeText = "Standard"
//! ```
//!
//! Every section is optional.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::NavCategoryError;
use crate::feature_gate::{DEFAULT_POLICY_TIMEOUT, FeatureGate};
use crate::providers::{StaticCapability, StaticPolicyProvider, UserId};
use crate::registry::NavCategoryRegistry;
use crate::resources::StringTable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavcatConfig {
    pub platform: PlatformConfig,
    pub policy: PolicyConfig,
    /// Resource string overrides layered over the built-in English table.
    pub strings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    pub graphing_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub timeout_ms: u64,
    pub users: Vec<String>,
    /// Policy values keyed by `"{namespace}/{key}"`.
    pub values: BTreeMap<String, bool>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            timeout_ms: u64::try_from(DEFAULT_POLICY_TIMEOUT.as_millis()).unwrap_or(5_000),
            users: Vec::new(),
            values: BTreeMap::new(),
        }
    }
}

impl NavcatConfig {
    pub fn load(path: &Path) -> Result<Self, NavCategoryError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| NavCategoryError::io(path, e))?;
        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            NavCategoryError::Toml { source, .. } => NavCategoryError::Toml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "loaded navcat config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, NavCategoryError> {
        let config: Self = toml::from_str(contents).map_err(|source| NavCategoryError::Toml {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), NavCategoryError> {
        if self.policy.timeout_ms == 0 {
            return Err(NavCategoryError::InvalidConfig {
                message: "policy.timeout_ms must be greater than zero".to_string(),
            });
        }
        if self.policy.users.iter().any(|user| user.trim().is_empty()) {
            return Err(NavCategoryError::InvalidConfig {
                message: "policy.users must not contain empty entries".to_string(),
            });
        }
        if let Some(path) = self.policy.values.keys().find(|path| !is_policy_path(path)) {
            return Err(NavCategoryError::InvalidConfig {
                message: format!("policy value '{path}' must look like 'Namespace/Key'"),
            });
        }
        Ok(())
    }

    pub fn policy_timeout(&self) -> Duration {
        Duration::from_millis(self.policy.timeout_ms)
    }

    pub fn capability(&self) -> StaticCapability {
        StaticCapability::new(self.platform.graphing_available)
    }

    pub fn policy_provider(&self) -> StaticPolicyProvider {
        StaticPolicyProvider::new(
            self.policy.users.iter().map(UserId::new).collect(),
            self.policy.values.clone(),
        )
    }

    /// Built-in English strings with `[strings]` applied on top.
    pub fn string_table(&self) -> StringTable {
        let mut table = StringTable::english();
        table.extend(self.strings.clone());
        table
    }

    pub fn feature_gate(&self) -> FeatureGate {
        FeatureGate::new(
            Arc::new(self.capability()),
            Arc::new(self.policy_provider()),
        )
        .with_timeout(self.policy_timeout())
    }

    pub fn registry(&self) -> NavCategoryRegistry {
        NavCategoryRegistry::new(Arc::new(self.feature_gate()))
    }
}

fn is_policy_path(path: &str) -> bool {
    path.split_once('/').is_some_and(|(namespace, key)| {
        !namespace.trim().is_empty() && !key.trim().is_empty() && !key.contains('/')
    })
}
