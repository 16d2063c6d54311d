//! Prefixed dump line parsing
//!
//! Dump lines carry non-payload metadata (record type, key, revision,
//! timestamp) ahead of the JSON object. The payload starts at the first `{`.

use serde::de::DeserializeOwned;

use crate::error::RecordError;

/// Parse the JSON payload embedded in `line` into `T`.
///
/// Everything before the first `{` is skipped. Use
/// `serde_json::Map<String, serde_json::Value>` for the untyped object.
pub fn parse_line<T: DeserializeOwned>(line: &str) -> Result<T, RecordError> {
    let start = line
        .find('{')
        .ok_or_else(|| RecordError::malformed("no JSON object on line"))?;
    let payload = line[start..].trim_end();
    sonic_rs::from_str(payload).map_err(|e| RecordError::malformed(e.to_string()))
}

/// Field decoders that never reject a line for a badly-typed scalar.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Render a JSON value as text: strings as-is, null as empty,
    /// everything else as its JSON encoding.
    pub fn as_text(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Deserialize any JSON value into a string, defaulting to `""`.
    ///
    /// Pair with `#[serde(default)]` so a missing field also yields `""`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<Value> = Option::deserialize(deserializer)?;
        Ok(value.as_ref().map(as_text).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{Map, Value};

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient::opt_string")]
        name: String,
    }

    #[test]
    fn skips_prefix_before_payload() {
        let line = "#@123 {\"key\":\"/authors/OL1A\",\"name\":\"Jane Doe\"}";
        let obj: Map<String, Value> = parse_line(line).unwrap();
        assert_eq!(obj["key"], "/authors/OL1A");
        assert_eq!(obj["name"], "Jane Doe");
    }

    #[test]
    fn tab_separated_open_library_line() {
        let line = "/type/author\t/authors/OL1A\t3\t2008-04-01T03:28:50.625462\t{\"name\": \"X\"}\n";
        let row: Row = parse_line(line).unwrap();
        assert_eq!(row.name, "X");
    }

    #[test]
    fn no_brace_is_malformed() {
        let err = parse_line::<Map<String, Value>>("/type/author no payload").unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn empty_line_is_malformed() {
        let err = parse_line::<Map<String, Value>>("").unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let err = parse_line::<Map<String, Value>>("x {\"name\": \"Ja").unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn lenient_string_defaults() {
        let row: Row = parse_line("{}").unwrap();
        assert_eq!(row.name, "");
        let row: Row = parse_line("{\"name\": null}").unwrap();
        assert_eq!(row.name, "");
        let row: Row = parse_line("{\"name\": 42}").unwrap();
        assert_eq!(row.name, "42");
    }

    #[test]
    fn as_text_renders_scalars() {
        assert_eq!(lenient::as_text(&Value::from(111)), "111");
        assert_eq!(lenient::as_text(&Value::from("abc")), "abc");
        assert_eq!(lenient::as_text(&Value::Null), "");
    }
}
