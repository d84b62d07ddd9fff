//! Column encoding helpers for SQLite storage
//!
//! Settings values are stored as JSON text; witness timestamps are stored as
//! RFC3339 strings and exposed as Unix milliseconds.

use serde_json::Value;

use crate::error::{Result, SqliteError};

/// Encode a settings value to its JSON column representation
pub fn encode_setting(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a settings value from its JSON column representation
pub fn decode_setting(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Convert Unix timestamp milliseconds to an RFC3339 column value
///
/// Witness timestamps are immutable anchors, so a value chrono cannot
/// represent is an error — never silently replaced.
pub fn timestamp_to_sql(timestamp_ms: i64) -> Result<String> {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.to_rfc3339())
        .ok_or_else(|| SqliteError::Encoding(format!("timestamp out of range: {}", timestamp_ms)))
}

/// Convert an RFC3339 column value back to Unix timestamp milliseconds
pub fn sql_to_timestamp(datetime_str: &str) -> Result<i64> {
    use chrono::DateTime;

    let dt = DateTime::parse_from_rfc3339(datetime_str)
        .map_err(|e| SqliteError::Encoding(format!("invalid datetime: {}", e)))?;

    Ok(dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn setting_round_trip() {
        let value = serde_json::json!({"nested": [1, 2, 3]});
        let encoded = encode_setting(&value).unwrap();
        assert_eq!(decode_setting(&encoded).unwrap(), value);
    }

    #[test]
    fn string_setting_keeps_quotes_in_column() {
        let encoded = encode_setting(&Value::from("sepolia")).unwrap();
        assert_eq!(encoded, r#""sepolia""#);
    }

    #[test]
    fn timestamp_round_trip() {
        let original = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC
        let sql_str = timestamp_to_sql(original).unwrap();
        let restored = sql_to_timestamp(&sql_str).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn pre_epoch_timestamp_round_trip() {
        let original = -1; // 1969-12-31 23:59:59.999 UTC
        let sql_str = timestamp_to_sql(original).unwrap();
        let restored = sql_to_timestamp(&sql_str).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn unrepresentable_timestamp_is_an_error() {
        assert!(matches!(
            timestamp_to_sql(i64::MAX),
            Err(SqliteError::Encoding(_))
        ));
        assert!(matches!(
            timestamp_to_sql(i64::MIN),
            Err(SqliteError::Encoding(_))
        ));
    }

    #[test]
    fn invalid_datetime_is_an_error() {
        assert!(sql_to_timestamp("not a datetime").is_err());
    }
}
