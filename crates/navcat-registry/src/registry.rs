//! Query surface over the category manifest.
//!
//! The manifest is built lazily on the first query and published through a
//! [`OnceLock`], so readers either block until construction completes or see
//! the finished sequence. Every query after that is a read-only scan.
//!
//! Lookups that find nothing return sentinels (`-1`, [`ViewMode::None`],
//! `"None"`) rather than errors.

use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tracing::debug;

use navcat_model::{
    CategoryDefinition, CategoryGroupType, NONE_FRIENDLY_NAME, ViewMode, VirtualKey,
    parse_stored_mode,
};

use crate::error::NavCategoryError;
use crate::feature_gate::FeatureGate;
use crate::manifest::{Manifest, build_manifest};
use crate::menu::{NavCategoryGroup, create_menu_options};
use crate::resources::ResourceProvider;

/// Integer sentinel for "no such category".
pub const NOT_FOUND: i32 = -1;

pub struct NavCategoryRegistry {
    gate: Arc<FeatureGate>,
    source: ManifestSource,
    manifest: OnceLock<Manifest>,
}

enum ManifestSource {
    BuiltIn,
    Custom(Manifest),
}

impl NavCategoryRegistry {
    /// Registry over the built-in manifest. The manifest is built on first
    /// use from the gate's capability and policy answers.
    pub fn new(gate: Arc<FeatureGate>) -> Self {
        Self {
            gate,
            source: ManifestSource::BuiltIn,
            manifest: OnceLock::new(),
        }
    }

    /// Registry over a caller-supplied manifest.
    pub fn with_manifest(gate: Arc<FeatureGate>, manifest: Manifest) -> Self {
        Self {
            gate,
            source: ManifestSource::Custom(manifest),
            manifest: OnceLock::new(),
        }
    }

    pub fn feature_gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub fn manifest(&self) -> &Manifest {
        self.manifest.get_or_init(|| match &self.source {
            ManifestSource::BuiltIn => {
                let available = self.gate.is_feature_available();
                let enabled = available && self.gate.is_feature_enabled();
                let manifest = build_manifest(available, enabled);
                debug!(
                    entries = manifest.len(),
                    graphing_present = available,
                    graphing_enabled = enabled,
                    "built category manifest"
                );
                manifest
            }
            ManifestSource::Custom(manifest) => manifest.clone(),
        })
    }

    pub fn definition(&self, mode: ViewMode) -> Option<&CategoryDefinition> {
        self.manifest().find(mode)
    }

    /// Serialization id to persist for `mode`, or `-1`.
    pub fn serialize(&self, mode: ViewMode) -> i32 {
        self.definition(mode)
            .map_or(NOT_FOUND, |entry| entry.serialization_id)
    }

    /// Mode restored from a persisted serialization id.
    ///
    /// Refuses to restore into the graphing mode while the feature gate is
    /// closed.
    pub fn deserialize(&self, serialization_id: i32) -> ViewMode {
        let Some(entry) = self
            .manifest()
            .iter()
            .find(|entry| entry.serialization_id == serialization_id)
        else {
            return ViewMode::None;
        };
        if is_graphing_mode(entry.mode) && !self.gate.is_feature_enabled() {
            debug!(serialization_id, "graphing mode is disabled, not restoring it");
            return ViewMode::None;
        }
        entry.mode
    }

    /// Mode restored from an untyped settings value. Anything that is not an
    /// `i32` integer resolves to `None`, like an unknown id.
    pub fn deserialize_value(&self, value: &Value) -> ViewMode {
        match parse_stored_mode(value) {
            Ok(serialization_id) => self.deserialize(serialization_id),
            Err(error) => {
                debug!(%error, "ignoring stored mode");
                ViewMode::None
            }
        }
    }

    pub fn is_valid_view_mode(&self, mode: ViewMode) -> bool {
        self.definition(mode).is_some()
    }

    pub fn is_view_mode_enabled(&self, mode: ViewMode) -> bool {
        self.definition(mode).is_some_and(|entry| entry.is_enabled)
    }

    pub fn is_mode_in_group(&self, mode: ViewMode, group: CategoryGroupType) -> bool {
        self.definition(mode)
            .is_some_and(|entry| entry.group_type == group)
    }

    /// Standard, Scientific and Programmer: calculator-group modes other
    /// than graphing and date.
    pub fn is_calculator_mode(&self, mode: ViewMode) -> bool {
        !is_date_mode(mode)
            && !is_graphing_mode(mode)
            && self.is_mode_in_group(mode, CategoryGroupType::Calculator)
    }

    pub fn is_converter_mode(&self, mode: ViewMode) -> bool {
        self.is_mode_in_group(mode, CategoryGroupType::Converter)
    }

    pub fn friendly_name(&self, mode: ViewMode) -> &str {
        self.definition(mode)
            .map_or(NONE_FRIENDLY_NAME, |entry| entry.friendly_name.as_str())
    }

    /// Exact, case-sensitive friendly-name lookup.
    pub fn view_mode_for_friendly_name(&self, name: &str) -> ViewMode {
        self.manifest()
            .iter()
            .find(|entry| entry.friendly_name == name)
            .map_or(ViewMode::None, |entry| entry.mode)
    }

    /// Resource key of the mode's display name.
    pub fn name_resource_key(&self, mode: ViewMode) -> Option<String> {
        self.definition(mode).map(CategoryDefinition::name_text_key)
    }

    pub fn group_type(&self, mode: ViewMode) -> CategoryGroupType {
        self.definition(mode)
            .map_or(CategoryGroupType::None, |entry| entry.group_type)
    }

    /// 1-based position in manifest order, or `-1`.
    pub fn position(&self, mode: ViewMode) -> i32 {
        self.manifest()
            .iter()
            .position(|entry| entry.mode == mode)
            .map_or(NOT_FOUND, |index| to_i32(index + 1))
    }

    /// 0-based position in manifest order, or `-1`.
    pub fn index(&self, mode: ViewMode) -> i32 {
        (self.position(mode) - 1).max(NOT_FOUND)
    }

    /// 0-based position counting only entries of `group`, or `-1` when the
    /// mode is not in that group.
    pub fn index_in_group(&self, mode: ViewMode, group: CategoryGroupType) -> i32 {
        self.manifest()
            .in_group(group)
            .position(|entry| entry.mode == mode)
            .map_or(NOT_FOUND, to_i32)
    }

    /// 0-based index in a listing that reserves one header slot before the
    /// first entry of every group run.
    pub fn flat_index(&self, mode: ViewMode) -> i32 {
        let mut index: i32 = -1;
        let mut current = CategoryGroupType::None;
        for entry in self.manifest() {
            index += 1;
            if entry.group_type != current {
                current = entry.group_type;
                index += 1;
            }
            if entry.mode == mode {
                return index;
            }
        }
        NOT_FOUND
    }

    pub fn view_mode_for_virtual_key(&self, key: VirtualKey) -> ViewMode {
        if key.is_none() {
            return ViewMode::None;
        }
        self.manifest()
            .iter()
            .find(|entry| entry.accelerator_key == key)
            .map_or(ViewMode::None, |entry| entry.mode)
    }

    /// Accelerator keys in manifest order. Recomputed on every call.
    pub fn category_accelerator_keys(&self) -> Vec<VirtualKey> {
        self.manifest()
            .iter()
            .filter(|entry| entry.has_accelerator())
            .map(|entry| entry.accelerator_key)
            .collect()
    }

    /// Localized menu groups, calculators first.
    pub fn create_menu_options(
        &self,
        resources: &dyn ResourceProvider,
    ) -> Result<Vec<NavCategoryGroup>, NavCategoryError> {
        create_menu_options(self.manifest(), resources)
    }
}

impl std::fmt::Debug for NavCategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavCategoryRegistry")
            .field("gate", &self.gate)
            .field("manifest", &self.manifest.get())
            .finish_non_exhaustive()
    }
}

pub fn is_graphing_mode(mode: ViewMode) -> bool {
    mode == ViewMode::Graphing
}

pub fn is_date_mode(mode: ViewMode) -> bool {
    mode == ViewMode::Date
}

// Manifests hold a few dozen entries at most.
fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

static GLOBAL_REGISTRY: OnceLock<NavCategoryRegistry> = OnceLock::new();

/// Install the process-wide registry. Fails if one is already installed.
pub fn install_global(
    registry: NavCategoryRegistry,
) -> Result<&'static NavCategoryRegistry, NavCategoryError> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| NavCategoryError::GlobalAlreadyInstalled)?;
    GLOBAL_REGISTRY
        .get()
        .ok_or(NavCategoryError::GlobalAlreadyInstalled)
}

/// The process-wide registry, if installed.
pub fn global() -> Option<&'static NavCategoryRegistry> {
    GLOBAL_REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_gate::{GRAPHING_POLICY_KEY, GRAPHING_POLICY_NAMESPACE};
    use crate::providers::{StaticCapability, StaticPolicyProvider};

    fn registry(available: bool, allowed: bool) -> NavCategoryRegistry {
        let policy = StaticPolicyProvider::single(
            "alice",
            GRAPHING_POLICY_NAMESPACE,
            GRAPHING_POLICY_KEY,
            allowed,
        );
        let gate = FeatureGate::new(
            Arc::new(StaticCapability::new(available)),
            Arc::new(policy),
        );
        NavCategoryRegistry::new(Arc::new(gate))
    }

    #[test]
    fn scenario_without_capability() {
        let registry = registry(false, true);
        assert_eq!(registry.serialize(ViewMode::Standard), 0);
        assert_eq!(registry.position(ViewMode::Standard), 1);
        assert_eq!(registry.index(ViewMode::Standard), 0);
        assert_eq!(registry.serialize(ViewMode::Currency), 16);
        assert_eq!(
            registry.index_in_group(ViewMode::Currency, CategoryGroupType::Converter),
            0
        );
        assert_eq!(registry.deserialize(99), ViewMode::None);
        assert_eq!(
            registry.view_mode_for_virtual_key(VirtualKey::Number1),
            ViewMode::Standard
        );
        assert!(!registry.is_valid_view_mode(ViewMode::Graphing));
        assert_eq!(registry.serialize(ViewMode::Graphing), NOT_FOUND);
        assert_eq!(registry.deserialize(17), ViewMode::None);
    }

    #[test]
    fn scenario_policy_denied() {
        let registry = registry(true, false);
        assert!(registry.is_valid_view_mode(ViewMode::Graphing));
        assert!(!registry.is_view_mode_enabled(ViewMode::Graphing));
        assert_eq!(registry.serialize(ViewMode::Graphing), 17);
        assert_eq!(registry.deserialize(17), ViewMode::None);
    }

    #[test]
    fn scenario_policy_allowed() {
        let registry = registry(true, true);
        assert!(registry.is_view_mode_enabled(ViewMode::Graphing));
        assert_eq!(registry.deserialize(17), ViewMode::Graphing);
        assert_eq!(registry.position(ViewMode::Graphing), 3);
        assert_eq!(
            registry.view_mode_for_virtual_key(VirtualKey::Number4),
            ViewMode::Programmer
        );
    }

    #[test]
    fn sentinel_answers_for_none() {
        let registry = registry(false, false);
        assert_eq!(registry.friendly_name(ViewMode::None), "None");
        assert_eq!(registry.group_type(ViewMode::None), CategoryGroupType::None);
        assert_eq!(registry.position(ViewMode::None), NOT_FOUND);
        assert_eq!(registry.index(ViewMode::None), NOT_FOUND);
        assert_eq!(registry.flat_index(ViewMode::None), NOT_FOUND);
        assert_eq!(registry.name_resource_key(ViewMode::None), None);
        assert_eq!(
            registry.view_mode_for_virtual_key(VirtualKey::None),
            ViewMode::None
        );
    }

    #[test]
    fn friendly_name_lookup_is_exact() {
        let registry = registry(false, false);
        assert_eq!(registry.friendly_name(ViewMode::Weight), "Weight and Mass");
        assert_eq!(
            registry.view_mode_for_friendly_name("Weight and Mass"),
            ViewMode::Weight
        );
        assert_eq!(
            registry.view_mode_for_friendly_name("weight and mass"),
            ViewMode::None
        );
        assert_eq!(registry.view_mode_for_friendly_name("Weight"), ViewMode::None);
    }

    #[test]
    fn flat_index_skips_group_headers() {
        let registry = registry(false, false);
        assert_eq!(registry.flat_index(ViewMode::Standard), 1);
        assert_eq!(registry.flat_index(ViewMode::Date), 4);
        assert_eq!(registry.flat_index(ViewMode::Currency), 6);
        assert_eq!(registry.flat_index(ViewMode::Volume), 7);
    }

    #[test]
    fn category_predicates() {
        let registry = registry(true, true);
        let calculators: Vec<ViewMode> = ViewMode::ALL
            .into_iter()
            .filter(|mode| registry.is_calculator_mode(*mode))
            .collect();
        assert_eq!(
            calculators,
            vec![ViewMode::Standard, ViewMode::Scientific, ViewMode::Programmer]
        );
        assert!(registry.is_converter_mode(ViewMode::Angle));
        assert!(!registry.is_converter_mode(ViewMode::Date));
        assert!(is_graphing_mode(ViewMode::Graphing));
        assert!(is_date_mode(ViewMode::Date));
        assert!(!is_date_mode(ViewMode::Standard));
    }

    #[test]
    fn name_resource_key_appends_text() {
        let registry = registry(false, false);
        assert_eq!(
            registry.name_resource_key(ViewMode::Date).as_deref(),
            Some("DateCalculationModeText")
        );
    }

    #[test]
    fn malformed_stored_values_resolve_to_none() {
        let registry = registry(false, false);
        assert_eq!(
            registry.deserialize_value(&serde_json::json!(5)),
            ViewMode::Length
        );
        assert_eq!(
            registry.deserialize_value(&serde_json::json!("5")),
            ViewMode::None
        );
        assert_eq!(
            registry.deserialize_value(&serde_json::json!(5.5)),
            ViewMode::None
        );
    }
}
