//! Parsing of the persisted "last used mode" value.
//!
//! Settings stores hand back untyped values. Only an integer that fits in
//! `i32` is a serialization id; anything else (strings, floats, booleans,
//! out-of-range numbers) is rejected here so the registry only ever sees a
//! typed id.

use serde_json::Value;

use crate::error::{ModelError, Result};

/// Extract a serialization id from a stored settings value.
pub fn parse_stored_mode(value: &Value) -> Result<i32> {
    value
        .as_i64()
        .and_then(|raw| i32::try_from(raw).ok())
        .ok_or_else(|| ModelError::InvalidStoredMode {
            found: value.to_string(),
        })
}

/// Parse a raw settings string as JSON and extract the serialization id.
pub fn parse_stored_mode_str(raw: &str) -> Result<i32> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|_| ModelError::InvalidStoredMode {
            found: raw.to_string(),
        })?;
    parse_stored_mode(&value)
}

/// Value written to settings for a serialization id.
pub fn stored_mode_value(serialization_id: i32) -> Value {
    Value::from(serialization_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_integers() {
        assert_eq!(parse_stored_mode(&json!(16)), Ok(16));
        assert_eq!(parse_stored_mode(&json!(-1)), Ok(-1));
    }

    #[test]
    fn rejects_non_integers() {
        for value in [json!("16"), json!(1.5), json!(true), json!(null), json!([0])] {
            assert!(parse_stored_mode(&value).is_err(), "{value} accepted");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_stored_mode(&json!(i64::from(i32::MAX) + 1)).is_err());
        assert!(parse_stored_mode(&json!(u64::MAX)).is_err());
    }

    #[test]
    fn parses_raw_strings() {
        assert_eq!(parse_stored_mode_str(" 3 "), Ok(3));
        assert!(parse_stored_mode_str("three").is_err());
        assert!(parse_stored_mode_str("\"3\"").is_err());
    }
}
