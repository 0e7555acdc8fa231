use serde::{Deserialize, Serialize};

use crate::enums::{CategoryGroupType, ViewMode};
use crate::keys::VirtualKey;

/// Friendly name returned for modes that have no category.
pub const NONE_FRIENDLY_NAME: &str = "None";

/// Metadata for one navigation category.
///
/// Definitions are immutable once placed in a manifest. `serialization_id`
/// is the value persisted in settings and must never be reassigned to a
/// different mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub mode: ViewMode,
    pub serialization_id: i32,
    /// Stable, non-localized lookup key.
    pub friendly_name: String,
    /// Localization key prefix; display strings live under `{key}Text` and
    /// `{key}AccessKey`.
    pub name_resource_key: String,
    pub glyph: String,
    pub group_type: CategoryGroupType,
    pub accelerator_key: VirtualKey,
    /// Literal access key. `None` means it comes from the resource provider.
    pub access_key: Option<String>,
    pub supports_negative: bool,
    pub is_enabled: bool,
}

impl CategoryDefinition {
    /// Resource key of the display name.
    pub fn name_text_key(&self) -> String {
        format!("{}Text", self.name_resource_key)
    }

    /// Resource key of the access key, used when no literal is set.
    pub fn access_key_resource_key(&self) -> String {
        format!("{}AccessKey", self.name_resource_key)
    }

    pub fn has_accelerator(&self) -> bool {
        !self.accelerator_key.is_none()
    }
}
