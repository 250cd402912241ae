//! Documents decoded from JSON and encoded as YAML.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::trace;

/// An error related to converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input was not a well-formed JSON document.
    #[error("failed to convert JSON to YAML")]
    Decode(#[source] serde_json::Error),

    /// The document could not be encoded as YAML.
    #[error("failed to encode document as YAML")]
    Encode(#[source] serde_yaml_ng::Error),
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A dynamically typed document value.
///
/// Mappings keep the order in which their keys appeared in the input. When a
/// key appears more than once in a JSON object, the last value wins but the
/// key keeps the position of its first occurrence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Decodes a single JSON document.
    ///
    /// Anything other than whitespace after the document is an error, as is
    /// an empty input or a string that is not valid UTF-8.
    ///
    /// Nesting depth is not limited; the stack grows on the heap as needed.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        deserializer.disable_recursion_limit();

        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(Error::Decode)?;
        deserializer.end().map_err(Error::Decode)?;

        trace!("decoded JSON document: {value}");
        Ok(Self(value))
    }

    /// Gets the underlying value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Encodes the document as YAML text.
    pub fn to_yaml_string(&self) -> Result<String> {
        let yaml = serde_yaml_ng::to_string(self).map_err(Error::Encode)?;
        debug!("encoded document as {len} byte(s) of YAML", len = yaml.len());
        Ok(yaml)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Converts a JSON document to YAML text.
pub fn convert(json: &[u8]) -> Result<String> {
    Document::from_json_slice(json)?.to_yaml_string()
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// Asserts that converting `json` and reading the YAML back produces the
    /// same value as decoding `json` directly.
    fn assert_round_trip(json: &str) {
        let expected: Value = serde_json::from_str(json).unwrap();
        let yaml = convert(json.as_bytes()).unwrap();
        let actual: Value = serde_yaml_ng::from_str(&yaml)
            .unwrap_or_else(|e| panic!("failed to read back YAML `{yaml}`: {e}"));
        assert_eq!(actual, expected, "round trip through `{yaml}`");
    }

    #[test]
    fn single_key() {
        assert_eq!(convert(br#"{"key": "value"}"#).unwrap(), "key: value\n");
    }

    #[test]
    fn scalars() {
        assert_eq!(convert(b"null").unwrap(), "null\n");
        assert_eq!(convert(b"true").unwrap(), "true\n");
        assert_eq!(convert(b"42").unwrap(), "42\n");
        assert_eq!(convert(b"-7").unwrap(), "-7\n");
        assert_eq!(convert(b"1.5").unwrap(), "1.5\n");
        assert_eq!(convert(br#""hello""#).unwrap(), "hello\n");
    }

    #[test]
    fn nested_block_style() {
        assert_eq!(convert(br#"{"a": {"b": 1}}"#).unwrap(), "a:\n  b: 1\n");
        assert_eq!(convert(b"[1, 2]").unwrap(), "- 1\n- 2\n");
        assert_eq!(convert(b"{}").unwrap(), "{}\n");
        assert_eq!(convert(b"[]").unwrap(), "[]\n");
    }

    #[test]
    fn keys_keep_input_order() {
        let yaml = convert(br#"{"zebra": 1, "apple": 2, "mango": 3}"#).unwrap();
        assert_eq!(yaml, "zebra: 1\napple: 2\nmango: 3\n");
    }

    #[test]
    fn duplicate_keys_last_value_wins() {
        let document = Document::from_json_slice(br#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(document.value(), &json!({"a": 3, "b": 2}));
        assert_eq!(document.to_yaml_string().unwrap(), "a: 3\nb: 2\n");
    }

    #[test]
    fn ambiguous_strings_round_trip() {
        for s in [
            "true", "false", "null", "~", "123", "1.5", "", " padded ", "yes", "no",
            "key: value", "- item", "#comment", "[1]", "{a}", "multi\nline\n", "'quoted'",
            "\"double\"", "héllo wörld", "tab\there",
        ] {
            assert_round_trip(&json!({ "key": s }).to_string());
            assert_round_trip(&json!([s]).to_string());
        }
    }

    #[test]
    fn ambiguous_keys_round_trip() {
        assert_round_trip(r#"{"true": 1, "null": 2, "123": 3, "a: b": 4, "": 5}"#);
    }

    #[test]
    fn nested_document_round_trips() {
        assert_round_trip(
            r#"{
                "name": "json2yaml",
                "version": 1,
                "ratio": 0.25,
                "negative": -3,
                "enabled": false,
                "nothing": null,
                "tags": ["a", "b", {"c": [1, [2, 3], {}]}],
                "empty": {"list": [], "map": {}},
                "deep": {"a": {"b": {"c": {"d": "e"}}}}
            }"#,
        );
    }

    #[test]
    fn top_level_sequences_round_trip() {
        assert_round_trip(r#"[null, true, 0, "x", [], {}, [[1]], {"k": [{"k": "v"}]}]"#);
    }

    #[test]
    fn from_value() {
        let document = Document::from(json!({"key": ["value", 1]}));
        assert_eq!(document.to_yaml_string().unwrap(), "key:\n- value\n- 1\n");
    }

    #[test]
    fn deep_nesting_is_accepted() {
        for depth in [129, 200] {
            let json = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
            let yaml = convert(json.as_bytes())
                .unwrap_or_else(|e| panic!("depth {depth} should convert: {e:?}"));
            assert!(yaml.starts_with("- - "), "unexpected YAML `{yaml}`");
            assert!(yaml.ends_with("[]\n"), "unexpected YAML `{yaml}`");
        }

        let json = format!("{}1{}", r#"{"a":"#.repeat(150), "}".repeat(150));
        let document = Document::from_json_slice(json.as_bytes()).unwrap();
        let mut value = document.value();
        for _ in 0..150 {
            value = &value["a"];
        }
        assert_eq!(value, &json!(1));
    }

    #[test]
    fn trailing_content_is_rejected_after_deep_document() {
        let json = format!("{}{} x", "[".repeat(150), "]".repeat(150));
        assert!(matches!(convert(json.as_bytes()), Err(Error::Decode(_))));
    }

    #[test]
    fn invalid_utf8_in_string_is_decode_error() {
        let err = convert(b"{\"key\": \"caf\xe9\"}").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        let err = convert(b"[\"\xff\xfe\"]").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn empty_input_is_decode_error() {
        let inputs: [&[u8]; 3] = [b"", b"   ", b"\n"];
        for input in inputs {
            let err = convert(input).unwrap_err();
            assert!(matches!(err, Error::Decode(_)));
            assert_eq!(err.to_string(), "failed to convert JSON to YAML");
            assert!(err.source().is_some());
        }
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let inputs: [&[u8]; 5] = [
            b"{invalid}",
            b"{\"key\": }",
            b"[1, 2",
            b"{\"a\": 1,}",
            b"'single'",
        ];
        for input in inputs {
            assert!(
                matches!(convert(input), Err(Error::Decode(_))),
                "`{}` should not decode",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn multiple_documents_are_rejected() {
        assert!(matches!(convert(b"{} {}"), Err(Error::Decode(_))));
        assert!(matches!(convert(b"1\n2"), Err(Error::Decode(_))));
    }

    #[test]
    fn trailing_whitespace_is_accepted() {
        assert_eq!(convert(b"{\"key\": \"value\"}\n\n").unwrap(), "key: value\n");
    }
}
