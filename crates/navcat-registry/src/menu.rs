//! Presentable menu groups built from the manifest.
//!
//! Views are rebuilt on every request and own their localized strings.

use serde::Serialize;

use navcat_model::{CategoryDefinition, CategoryGroupType, ViewMode};

use crate::error::NavCategoryError;
use crate::manifest::Manifest;
use crate::resources::{ResourceProvider, format_localized};

const HEADER_AUTOMATION_FORMAT_KEY: &str = "NavCategoryHeader_AutomationNameFormat";
const ITEM_AUTOMATION_FORMAT_KEY: &str = "NavCategoryItem_AutomationNameFormat";

/// Resource keys describing one menu group.
struct GroupKeys {
    group_type: CategoryGroupType,
    header: &'static str,
    mode: &'static str,
    automation: &'static str,
}

const CALCULATOR_GROUP: GroupKeys = GroupKeys {
    group_type: CategoryGroupType::Calculator,
    header: "CalculatorModeTextCaps",
    mode: "CalculatorModeText",
    automation: "CalculatorModePluralText",
};

const CONVERTER_GROUP: GroupKeys = GroupKeys {
    group_type: CategoryGroupType::Converter,
    header: "ConverterModeTextCaps",
    mode: "ConverterModeText",
    automation: "ConverterModePluralText",
};

/// One selectable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavCategory {
    pub name: String,
    pub automation_name: String,
    pub glyph: String,
    pub access_key: String,
    /// Localized name of the owning group's mode ("Calculator", ...).
    pub mode_string: String,
    pub mode: ViewMode,
    pub supports_negative: bool,
    pub is_enabled: bool,
}

impl NavCategory {
    pub fn automation_id(&self) -> &'static str {
        self.mode.as_str()
    }
}

/// A menu section with its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavCategoryGroup {
    pub name: String,
    pub automation_name: String,
    pub group_type: CategoryGroupType,
    pub categories: Vec<NavCategory>,
}

/// Build both menu groups, calculators first.
///
/// Always returns two groups, even when one has no categories.
pub fn create_menu_options(
    manifest: &Manifest,
    resources: &dyn ResourceProvider,
) -> Result<Vec<NavCategoryGroup>, NavCategoryError> {
    Ok(vec![
        create_group(manifest, resources, &CALCULATOR_GROUP)?,
        create_group(manifest, resources, &CONVERTER_GROUP)?,
    ])
}

fn create_group(
    manifest: &Manifest,
    resources: &dyn ResourceProvider,
    keys: &GroupKeys,
) -> Result<NavCategoryGroup, NavCategoryError> {
    let name = resources.get_string(keys.header)?;
    let group_mode = resources.get_string(keys.mode)?;
    let plural = resources.get_string(keys.automation)?;
    let header_format = resources.get_string(HEADER_AUTOMATION_FORMAT_KEY)?;
    let item_format = resources.get_string(ITEM_AUTOMATION_FORMAT_KEY)?;

    let categories = manifest
        .in_group(keys.group_type)
        .map(|definition| create_category(definition, resources, &name, &group_mode, &item_format))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NavCategoryGroup {
        automation_name: format_localized(&header_format, &[plural.as_str()]),
        name,
        group_type: keys.group_type,
        categories,
    })
}

fn create_category(
    definition: &CategoryDefinition,
    resources: &dyn ResourceProvider,
    group_name: &str,
    group_mode: &str,
    item_format: &str,
) -> Result<NavCategory, NavCategoryError> {
    let name = resources.get_string(&definition.name_text_key())?;
    let access_key = match &definition.access_key {
        Some(literal) => literal.clone(),
        None => resources.get_string(&definition.access_key_resource_key())?,
    };
    Ok(NavCategory {
        automation_name: format_localized(item_format, &[name.as_str(), group_name]),
        name,
        glyph: definition.glyph.clone(),
        access_key,
        mode_string: group_mode.to_string(),
        mode: definition.mode,
        supports_negative: definition.supports_negative,
        is_enabled: definition.is_enabled,
    })
}
