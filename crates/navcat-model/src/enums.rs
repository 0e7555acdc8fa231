//! Type-safe enumerations for navigation categories.
//!
//! `ViewMode` identifies a single navigable category of the app. Its
//! ordering is free to change between releases: the value written to
//! application settings is the category's serialization id, never the
//! enum's position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A navigable mode of the app.
///
/// `None` is the sentinel returned by lookups that find no matching
/// category.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ViewMode {
    #[default]
    None,
    Standard,
    Scientific,
    Programmer,
    Date,
    Volume,
    Length,
    Weight,
    Temperature,
    Energy,
    Area,
    Speed,
    Time,
    Power,
    Data,
    Pressure,
    Angle,
    Currency,
    Graphing,
}

impl ViewMode {
    /// Every mode except the `None` sentinel, in declaration order.
    pub const ALL: [ViewMode; 18] = [
        ViewMode::Standard,
        ViewMode::Scientific,
        ViewMode::Programmer,
        ViewMode::Date,
        ViewMode::Volume,
        ViewMode::Length,
        ViewMode::Weight,
        ViewMode::Temperature,
        ViewMode::Energy,
        ViewMode::Area,
        ViewMode::Speed,
        ViewMode::Time,
        ViewMode::Power,
        ViewMode::Data,
        ViewMode::Pressure,
        ViewMode::Angle,
        ViewMode::Currency,
        ViewMode::Graphing,
    ];

    /// Identifier string, also used as the automation id of menu items.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::None => "None",
            ViewMode::Standard => "Standard",
            ViewMode::Scientific => "Scientific",
            ViewMode::Programmer => "Programmer",
            ViewMode::Date => "Date",
            ViewMode::Volume => "Volume",
            ViewMode::Length => "Length",
            ViewMode::Weight => "Weight",
            ViewMode::Temperature => "Temperature",
            ViewMode::Energy => "Energy",
            ViewMode::Area => "Area",
            ViewMode::Speed => "Speed",
            ViewMode::Time => "Time",
            ViewMode::Power => "Power",
            ViewMode::Data => "Data",
            ViewMode::Pressure => "Pressure",
            ViewMode::Angle => "Angle",
            ViewMode::Currency => "Currency",
            ViewMode::Graphing => "Graphing",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ViewMode::None)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ModelError;

    /// Parse an identifier string (case-insensitive). Friendly names such as
    /// "Weight and Mass" are resolved by the registry, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Ok(ViewMode::None);
        }
        ViewMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownViewMode(s.to_string()))
    }
}

/// Section of the navigation menu a category belongs to.
///
/// Menu order is `Calculator` then `Converter`. `None` is the "not found"
/// sentinel and never appears in menu output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryGroupType {
    #[default]
    None,
    Calculator,
    Converter,
}

impl CategoryGroupType {
    /// Groups in menu order.
    pub const MENU_ORDER: [CategoryGroupType; 2] =
        [CategoryGroupType::Calculator, CategoryGroupType::Converter];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryGroupType::None => "None",
            CategoryGroupType::Calculator => "Calculator",
            CategoryGroupType::Converter => "Converter",
        }
    }
}

impl fmt::Display for CategoryGroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryGroupType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CategoryGroupType::None),
            "calculator" | "primary" => Ok(CategoryGroupType::Calculator),
            "converter" => Ok(CategoryGroupType::Converter),
            _ => Err(ModelError::UnknownGroupType(s.to_string())),
        }
    }
}
