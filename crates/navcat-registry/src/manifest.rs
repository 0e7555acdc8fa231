//! The ordered category manifest.
//!
//! Insertion order is menu order and is authoritative for every position
//! query. The built-in manifest comes from [`build_manifest`]; hosts with
//! their own categories assemble one through [`Manifest::new`], which
//! enforces the uniqueness invariants.

use std::collections::{BTreeMap, BTreeSet};

use navcat_model::{CategoryDefinition, CategoryGroupType, ViewMode, VirtualKey};

use crate::error::NavCategoryError;

// vvv THESE IDS ARE PERSISTED AND MUST NEVER CHANGE vvv
pub const STANDARD_ID: i32 = 0;
pub const SCIENTIFIC_ID: i32 = 1;
pub const PROGRAMMER_ID: i32 = 2;
pub const DATE_ID: i32 = 3;
pub const VOLUME_ID: i32 = 4;
pub const LENGTH_ID: i32 = 5;
pub const WEIGHT_ID: i32 = 6;
pub const TEMPERATURE_ID: i32 = 7;
pub const ENERGY_ID: i32 = 8;
pub const AREA_ID: i32 = 9;
pub const SPEED_ID: i32 = 10;
pub const TIME_ID: i32 = 11;
pub const POWER_ID: i32 = 12;
pub const DATA_ID: i32 = 13;
pub const PRESSURE_ID: i32 = 14;
pub const ANGLE_ID: i32 = 15;
pub const CURRENCY_ID: i32 = 16;
pub const GRAPHING_ID: i32 = 17;
// ^^^ THESE IDS ARE PERSISTED AND MUST NEVER CHANGE ^^^

const SUPPORTS_ALL: bool = true;
const SUPPORTS_NEGATIVE: bool = true;
const POSITIVE_ONLY: bool = false;

/// Literal row of the manifest table. Keys and access keys are filled in
/// by [`build_manifest`].
struct Row {
    mode: ViewMode,
    id: i32,
    friendly_name: &'static str,
    name_key: &'static str,
    glyph: &'static str,
    supports_negative: bool,
}

const fn row(
    mode: ViewMode,
    id: i32,
    friendly_name: &'static str,
    name_key: &'static str,
    glyph: &'static str,
    supports_negative: bool,
) -> Row {
    Row {
        mode,
        id,
        friendly_name,
        name_key,
        glyph,
        supports_negative,
    }
}

static LEADING_CALCULATORS: [Row; 2] = [
    row(
        ViewMode::Standard,
        STANDARD_ID,
        "Standard",
        "StandardMode",
        "\u{E8EF}",
        SUPPORTS_ALL,
    ),
    row(
        ViewMode::Scientific,
        SCIENTIFIC_ID,
        "Scientific",
        "ScientificMode",
        "\u{F196}",
        SUPPORTS_ALL,
    ),
];

static GRAPHING: Row = row(
    ViewMode::Graphing,
    GRAPHING_ID,
    "Graphing",
    "GraphingCalculatorMode",
    "\u{F770}",
    SUPPORTS_ALL,
);

static TRAILING_CALCULATORS: [Row; 2] = [
    row(
        ViewMode::Programmer,
        PROGRAMMER_ID,
        "Programmer",
        "ProgrammerMode",
        "\u{ECCE}",
        SUPPORTS_ALL,
    ),
    row(
        ViewMode::Date,
        DATE_ID,
        "Date",
        "DateCalculationMode",
        "\u{E787}",
        SUPPORTS_ALL,
    ),
];

#[rustfmt::skip]
static CONVERTERS: [Row; 13] = [
    row(ViewMode::Currency, CURRENCY_ID, "Currency", "CategoryName_Currency", "\u{EB0D}", POSITIVE_ONLY),
    row(ViewMode::Volume, VOLUME_ID, "Volume", "CategoryName_Volume", "\u{F1AA}", POSITIVE_ONLY),
    row(ViewMode::Length, LENGTH_ID, "Length", "CategoryName_Length", "\u{ECC6}", POSITIVE_ONLY),
    row(ViewMode::Weight, WEIGHT_ID, "Weight and Mass", "CategoryName_Weight", "\u{F4C1}", POSITIVE_ONLY),
    row(ViewMode::Temperature, TEMPERATURE_ID, "Temperature", "CategoryName_Temperature", "\u{E7A3}", SUPPORTS_NEGATIVE),
    row(ViewMode::Energy, ENERGY_ID, "Energy", "CategoryName_Energy", "\u{ECAD}", POSITIVE_ONLY),
    row(ViewMode::Area, AREA_ID, "Area", "CategoryName_Area", "\u{E809}", POSITIVE_ONLY),
    row(ViewMode::Speed, SPEED_ID, "Speed", "CategoryName_Speed", "\u{EADA}", POSITIVE_ONLY),
    row(ViewMode::Time, TIME_ID, "Time", "CategoryName_Time", "\u{E917}", POSITIVE_ONLY),
    row(ViewMode::Power, POWER_ID, "Power", "CategoryName_Power", "\u{E945}", SUPPORTS_NEGATIVE),
    row(ViewMode::Data, DATA_ID, "Data", "CategoryName_Data", "\u{F20F}", POSITIVE_ONLY),
    row(ViewMode::Pressure, PRESSURE_ID, "Pressure", "CategoryName_Pressure", "\u{EC4A}", POSITIVE_ONLY),
    row(ViewMode::Angle, ANGLE_ID, "Angle", "CategoryName_Angle", "\u{F515}", SUPPORTS_NEGATIVE),
];

/// Ordered, validated sequence of category definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<CategoryDefinition>,
}

impl Manifest {
    /// Validate and wrap a custom entry list.
    ///
    /// Rejects duplicate modes, serialization ids, friendly names, and
    /// accelerator keys, and entries that use the `None` sentinels.
    pub fn new(entries: Vec<CategoryDefinition>) -> Result<Self, NavCategoryError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CategoryDefinition] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, mode: ViewMode) -> Option<&CategoryDefinition> {
        self.entries.iter().find(|entry| entry.mode == mode)
    }

    /// Entries of one group, in manifest order.
    pub fn in_group(
        &self,
        group: CategoryGroupType,
    ) -> impl Iterator<Item = &CategoryDefinition> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.group_type == group)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a CategoryDefinition;
    type IntoIter = std::slice::Iter<'a, CategoryDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the built-in manifest.
///
/// `feature_available` decides whether the graphing category exists at
/// all; `feature_enabled` only sets its `is_enabled` flag. Calculator keys
/// and access keys follow the 1-based position inside the calculator
/// group, so the trailing calculators shift by one when graphing is
/// present.
pub fn build_manifest(feature_available: bool, feature_enabled: bool) -> Manifest {
    let mut calculators: Vec<(&Row, bool)> = LEADING_CALCULATORS
        .iter()
        .map(|row| (row, true))
        .collect();
    if feature_available {
        calculators.push((&GRAPHING, feature_enabled));
    }
    calculators.extend(TRAILING_CALCULATORS.iter().map(|row| (row, true)));

    let mut entries: Vec<CategoryDefinition> = calculators
        .into_iter()
        .enumerate()
        .map(|(index, (row, enabled))| calculator_entry(row, index + 1, enabled))
        .collect();
    entries.extend(CONVERTERS.iter().map(converter_entry));

    Manifest { entries }
}

fn calculator_entry(row: &Row, ordinal: usize, is_enabled: bool) -> CategoryDefinition {
    CategoryDefinition {
        accelerator_key: accelerator_for_ordinal(ordinal),
        access_key: Some(ordinal.to_string()),
        is_enabled,
        ..definition(row, CategoryGroupType::Calculator)
    }
}

fn converter_entry(row: &Row) -> CategoryDefinition {
    definition(row, CategoryGroupType::Converter)
}

fn definition(row: &Row, group_type: CategoryGroupType) -> CategoryDefinition {
    CategoryDefinition {
        mode: row.mode,
        serialization_id: row.id,
        friendly_name: row.friendly_name.to_string(),
        name_resource_key: row.name_key.to_string(),
        glyph: row.glyph.to_string(),
        group_type,
        accelerator_key: VirtualKey::None,
        access_key: None,
        supports_negative: row.supports_negative,
        is_enabled: true,
    }
}

/// Digit accelerator for a 1-based calculator ordinal; none past 9.
fn accelerator_for_ordinal(ordinal: usize) -> VirtualKey {
    VirtualKey::number(ordinal).unwrap_or(VirtualKey::None)
}

fn validate_entries(entries: &[CategoryDefinition]) -> Result<(), NavCategoryError> {
    let mut modes: BTreeSet<ViewMode> = BTreeSet::new();
    let mut ids: BTreeMap<i32, ViewMode> = BTreeMap::new();
    let mut names: BTreeSet<&str> = BTreeSet::new();
    let mut keys: BTreeMap<u16, ViewMode> = BTreeMap::new();

    for entry in entries {
        if entry.mode.is_none() {
            return Err(NavCategoryError::SentinelEntry {
                message: format!("entry '{}' has mode None", entry.friendly_name),
            });
        }
        if entry.group_type == CategoryGroupType::None {
            return Err(NavCategoryError::SentinelEntry {
                message: format!("{} has group None", entry.mode),
            });
        }
        if !modes.insert(entry.mode) {
            return Err(NavCategoryError::DuplicateViewMode { mode: entry.mode });
        }
        if let Some(first) = ids.insert(entry.serialization_id, entry.mode) {
            return Err(NavCategoryError::DuplicateSerializationId {
                id: entry.serialization_id,
                first,
                second: entry.mode,
            });
        }
        if !names.insert(entry.friendly_name.as_str()) {
            return Err(NavCategoryError::DuplicateFriendlyName {
                name: entry.friendly_name.clone(),
            });
        }
        if entry.has_accelerator() {
            if let Some(first) = keys.insert(entry.accelerator_key.code(), entry.mode) {
                return Err(NavCategoryError::DuplicateAcceleratorKey {
                    key: entry.accelerator_key,
                    first,
                    second: entry.mode,
                });
            }
        }
    }
    Ok(())
}
