//! Localized string lookup used when building menu groups.

use std::collections::BTreeMap;

use crate::error::NavCategoryError;

/// Resolves a resource key to a localized string.
///
/// Unknown keys are an error; menu construction propagates it.
pub trait ResourceProvider {
    fn get_string(&self, key: &str) -> Result<String, NavCategoryError>;
}

/// In-memory string table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    strings: BTreeMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in en-US strings covering every key the menu needs.
    pub fn english() -> Self {
        let mut table = Self::new();
        for (key, value) in ENGLISH {
            table.insert(*key, *value);
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of this table; its values win.
    pub fn extend<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl ResourceProvider for StringTable {
    fn get_string(&self, key: &str) -> Result<String, NavCategoryError> {
        self.strings
            .get(key)
            .cloned()
            .ok_or_else(|| NavCategoryError::MissingResource {
                key: key.to_string(),
            })
    }
}

/// Substitute `%1`, `%2`, ... in a localized format string.
///
/// Placeholders without a matching argument are left as written and `%%`
/// yields a literal percent sign.
pub fn format_localized(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(digit @ '1'..='9') => {
                chars.next();
                let index = digit as usize - '1' as usize;
                match args.get(index) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(digit);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

const ENGLISH: &[(&str, &str)] = &[
    ("CalculatorModeTextCaps", "Calculator"),
    ("CalculatorModeText", "Calculator"),
    ("CalculatorModePluralText", "Calculators"),
    ("ConverterModeTextCaps", "Converter"),
    ("ConverterModeText", "Converter"),
    ("ConverterModePluralText", "Converters"),
    ("NavCategoryHeader_AutomationNameFormat", "%1 list"),
    ("NavCategoryItem_AutomationNameFormat", "%1 %2"),
    ("StandardModeText", "Standard"),
    ("ScientificModeText", "Scientific"),
    ("GraphingCalculatorModeText", "Graphing"),
    ("ProgrammerModeText", "Programmer"),
    ("DateCalculationModeText", "Date Calculation"),
    ("CategoryName_CurrencyText", "Currency"),
    ("CategoryName_CurrencyAccessKey", "C"),
    ("CategoryName_VolumeText", "Volume"),
    ("CategoryName_VolumeAccessKey", "V"),
    ("CategoryName_LengthText", "Length"),
    ("CategoryName_LengthAccessKey", "L"),
    ("CategoryName_WeightText", "Weight and Mass"),
    ("CategoryName_WeightAccessKey", "W"),
    ("CategoryName_TemperatureText", "Temperature"),
    ("CategoryName_TemperatureAccessKey", "T"),
    ("CategoryName_EnergyText", "Energy"),
    ("CategoryName_EnergyAccessKey", "E"),
    ("CategoryName_AreaText", "Area"),
    ("CategoryName_AreaAccessKey", "A"),
    ("CategoryName_SpeedText", "Speed"),
    ("CategoryName_SpeedAccessKey", "S"),
    ("CategoryName_TimeText", "Time"),
    ("CategoryName_TimeAccessKey", "I"),
    ("CategoryName_PowerText", "Power"),
    ("CategoryName_PowerAccessKey", "O"),
    ("CategoryName_DataText", "Data"),
    ("CategoryName_DataAccessKey", "D"),
    ("CategoryName_PressureText", "Pressure"),
    ("CategoryName_PressureAccessKey", "P"),
    ("CategoryName_AngleText", "Angle"),
    ("CategoryName_AngleAccessKey", "G"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_replaces_numbered_placeholders() {
        assert_eq!(
            format_localized("%1 %2", &["Standard", "Calculator"]),
            "Standard Calculator"
        );
        assert_eq!(format_localized("%2 then %1", &["a", "b"]), "b then a");
    }

    #[test]
    fn format_keeps_unmatched_placeholders() {
        assert_eq!(format_localized("%1 %3", &["x"]), "x %3");
        assert_eq!(format_localized("100%% %", &[]), "100% %");
    }

    #[test]
    fn missing_key_is_an_error() {
        let table = StringTable::new();
        assert!(matches!(
            table.get_string("Nope"),
            Err(NavCategoryError::MissingResource { key }) if key == "Nope"
        ));
    }

    #[test]
    fn overlay_replaces_defaults() {
        let mut table = StringTable::english();
        table.extend([("StandardModeText", "Basic")]);
        assert_eq!(table.get_string("StandardModeText").unwrap(), "Basic");
        assert_eq!(table.get_string("ScientificModeText").unwrap(), "Scientific");
    }
}
