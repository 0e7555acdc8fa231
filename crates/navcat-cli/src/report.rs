//! Serializable views of registry answers for the `lookup` and `list`
//! commands.

use serde::Serialize;
use tracing::debug;

use navcat_model::{CategoryGroupType, ViewMode, VirtualKey, parse_stored_mode_str};
use navcat_registry::NavCategoryRegistry;

/// Every registry answer about a single mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub mode: ViewMode,
    pub valid: bool,
    pub enabled: bool,
    pub serialization_id: i32,
    pub friendly_name: String,
    pub name_resource_key: Option<String>,
    pub group: CategoryGroupType,
    pub position: i32,
    pub index: i32,
    pub index_in_group: i32,
    pub flat_index: i32,
    pub accelerator_key: VirtualKey,
    pub calculator_mode: bool,
    pub converter_mode: bool,
}

pub fn lookup_report(registry: &NavCategoryRegistry, mode: ViewMode) -> LookupReport {
    let group = registry.group_type(mode);
    LookupReport {
        mode,
        valid: registry.is_valid_view_mode(mode),
        enabled: registry.is_view_mode_enabled(mode),
        serialization_id: registry.serialize(mode),
        friendly_name: registry.friendly_name(mode).to_string(),
        name_resource_key: registry.name_resource_key(mode),
        group,
        position: registry.position(mode),
        index: registry.index(mode),
        index_in_group: registry.index_in_group(mode, group),
        flat_index: registry.flat_index(mode),
        accelerator_key: registry
            .definition(mode)
            .map_or(VirtualKey::None, |entry| entry.accelerator_key),
        calculator_mode: registry.is_calculator_mode(mode),
        converter_mode: registry.is_converter_mode(mode),
    }
}

/// One row of the manifest listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRow {
    pub position: i32,
    pub mode: ViewMode,
    pub friendly_name: String,
    pub serialization_id: i32,
    pub group: CategoryGroupType,
    pub index_in_group: i32,
    pub flat_index: i32,
    pub accelerator_key: VirtualKey,
    pub enabled: bool,
}

pub fn manifest_rows(registry: &NavCategoryRegistry) -> Vec<ManifestRow> {
    registry
        .manifest()
        .iter()
        .map(|entry| ManifestRow {
            position: registry.position(entry.mode),
            mode: entry.mode,
            friendly_name: entry.friendly_name.clone(),
            serialization_id: entry.serialization_id,
            group: entry.group_type,
            index_in_group: registry.index_in_group(entry.mode, entry.group_type),
            flat_index: registry.flat_index(entry.mode),
            accelerator_key: entry.accelerator_key,
            enabled: entry.is_enabled,
        })
        .collect()
}

/// Resolve a mode from its identifier ("Weight") or friendly name
/// ("Weight and Mass").
pub fn resolve_mode(registry: &NavCategoryRegistry, raw: &str) -> Option<ViewMode> {
    if let Ok(mode) = raw.parse::<ViewMode>() {
        return Some(mode);
    }
    let by_name = registry.view_mode_for_friendly_name(raw.trim());
    (!by_name.is_none()).then_some(by_name)
}

/// Mode restored from a raw settings string. Anything that is not a JSON
/// integer in `i32` range restores as `None`.
pub fn restore_mode(registry: &NavCategoryRegistry, raw: &str) -> ViewMode {
    match parse_stored_mode_str(raw) {
        Ok(serialization_id) => registry.deserialize(serialization_id),
        Err(error) => {
            debug!(%error, "ignoring stored mode");
            ViewMode::None
        }
    }
}
