//! High-performance JSON operations using sonic-rs.

use crate::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Deserialize JSON string.
///
/// # Errors
/// Returns error if JSON is invalid.
pub fn from_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    sonic_rs::from_str(s).map_err(Error::from)
}

/// Deserialize JSON bytes.
///
/// # Errors
/// Returns error if JSON is invalid.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    sonic_rs::from_slice(bytes).map_err(Error::from)
}

/// Serialize to compact JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    sonic_rs::to_string(value).map_err(Error::from)
}

/// Serialize to pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    sonic_rs::to_string_pretty(value).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct Test {
        name: String,
        value: i32,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct RegistryRecord {
        name: String,
        #[serde(default)]
        source_uri: Option<String>,
        #[serde(default)]
        requirements: HashMap<String, String>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct NestedStruct {
        id: u64,
        data: InnerData,
        tags: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct InnerData {
        key: String,
        values: Vec<i32>,
    }

    #[test]
    fn roundtrip() {
        let orig = Test {
            name: "test".into(),
            value: 42,
        };
        let json = to_json(&orig).expect("serialization should succeed");
        let parsed: Test = from_json(&json).expect("deserialization should succeed");
        assert_eq!(orig, parsed);
    }

    #[test]
    fn pretty() {
        let val = Test {
            name: "x".into(),
            value: 1,
        };
        let pretty = to_json_pretty(&val).expect("pretty printing should succeed");
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_from_json_slice() {
        let json = r#"{"name":"test","value":42}"#;
        let parsed: Test = from_json_slice(json.as_bytes()).expect("should parse from bytes");
        assert_eq!(parsed.name, "test");
        assert_eq!(parsed.value, 42);
    }

    #[test]
    fn test_registry_record_parsing() {
        let json = r#"{
            "name": "left-pad",
            "source_uri": "https://example.com/left-pad.git",
            "requirements": {
                "setuptools": ""
            }
        }"#;

        let parsed: RegistryRecord = from_json(json).expect("should parse registry record");
        assert_eq!(parsed.name, "left-pad");
        assert_eq!(parsed.requirements.get("setuptools"), Some(&String::new()));
    }

    #[test]
    fn test_nested_struct() {
        let data = NestedStruct {
            id: 123,
            data: InnerData {
                key: "test".to_string(),
                values: vec![1, 2, 3],
            },
            tags: vec!["a".to_string(), "b".to_string()],
        };

        let json = to_json(&data).expect("should serialize");
        let parsed: NestedStruct = from_json(&json).expect("should deserialize");
        assert_eq!(data, parsed);
    }

    #[test]
    fn test_invalid_json_error() {
        let result: Result<Test> = from_json("{invalid json}");
        assert!(result.is_err());
    }

    #[test]
    fn test_type_mismatch_error() {
        let result: Result<Test> = from_json(r#"{"name": 123, "value": "not a number"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field_error() {
        let result: Result<Test> = from_json(r#"{"name": "test"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unicode_handling() {
        let data = Test {
            name: "测试 🎉 émojis".to_string(),
            value: 42,
        };
        let json = to_json(&data).expect("should serialize unicode");
        let parsed: Test = from_json(&json).expect("should deserialize unicode");
        assert_eq!(data, parsed);
    }

    #[test]
    fn test_empty_collections() {
        let data = RegistryRecord {
            name: "empty-pkg".to_string(),
            source_uri: None,
            requirements: HashMap::new(),
        };
        let json = to_json(&data).expect("should serialize empty collections");
        let parsed: RegistryRecord = from_json(&json).expect("should deserialize");
        assert!(parsed.requirements.is_empty());
    }

    proptest! {
        /// Serialization followed by deserialization returns original value
        #[test]
        fn prop_roundtrip_string(s in "\\PC*") {
            let data = Test { name: s.clone(), value: 0 };
            let json = to_json(&data).expect("should serialize");
            let parsed: Test = from_json(&json).expect("should deserialize");
            prop_assert_eq!(data.name, parsed.name);
        }

        /// Serialization roundtrip preserves integer values
        #[test]
        fn prop_roundtrip_integer(v in i32::MIN..i32::MAX) {
            let data = Test { name: "test".to_string(), value: v };
            let json = to_json(&data).expect("should serialize");
            let parsed: Test = from_json(&json).expect("should deserialize");
            prop_assert_eq!(v, parsed.value);
        }

        /// HashMap roundtrip preserves all keys and values
        #[test]
        fn prop_hashmap_roundtrip(
            entries in prop::collection::hash_map("[a-z]{1,10}", "[a-z0-9]{1,20}", 0..10)
        ) {
            let data = RegistryRecord {
                name: "test-pkg".to_string(),
                source_uri: None,
                requirements: entries.clone(),
            };
            let json = to_json(&data).expect("should serialize");
            let parsed: RegistryRecord = from_json(&json).expect("should deserialize");
            prop_assert_eq!(entries.len(), parsed.requirements.len());
            for (k, v) in entries {
                prop_assert_eq!(Some(&v), parsed.requirements.get(&k));
            }
        }

        /// Vec roundtrip preserves order and values
        #[test]
        fn prop_vec_roundtrip(values in prop::collection::vec(any::<i32>(), 0..100)) {
            let data = InnerData {
                key: "test".to_string(),
                values: values.clone(),
            };
            let json = to_json(&data).expect("should serialize");
            let parsed: InnerData = from_json(&json).expect("should deserialize");
            prop_assert_eq!(values, parsed.values);
        }

        /// Serializing twice produces identical output (deterministic)
        #[test]
        fn prop_serialization_deterministic(name in "[a-z]{1,20}", value in any::<i32>()) {
            let data = Test { name, value };
            let json1 = to_json(&data).expect("should serialize");
            let json2 = to_json(&data).expect("should serialize again");
            prop_assert_eq!(json1, json2);
        }

        /// Pretty and compact parse to the same value
        #[test]
        fn prop_pretty_compact_equivalent(name in "[a-z]{1,20}", value in any::<i32>()) {
            let data = Test { name, value };
            let compact = to_json(&data).expect("should serialize compact");
            let pretty = to_json_pretty(&data).expect("should serialize pretty");

            let from_compact: Test = from_json(&compact).expect("should parse compact");
            let from_pretty: Test = from_json(&pretty).expect("should parse pretty");

            prop_assert_eq!(from_compact, from_pretty);
        }
    }

    #[test]
    fn test_large_array() {
        let arr: Vec<i32> = (0..10000).collect();
        let json = to_json(&arr).expect("should serialize large array");
        let parsed: Vec<i32> = from_json(&json).expect("should deserialize large array");
        assert_eq!(arr, parsed);
    }

    #[test]
    fn test_empty_object() {
        let json = "{}";
        let parsed: HashMap<String, String> = from_json(json).expect("should parse empty object");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_null_handling() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct WithOption {
            value: Option<String>,
        }

        let json_null = r#"{"value":null}"#;
        let json_missing = r"{}";

        let from_null: WithOption = from_json(json_null).expect("should parse null");
        let from_missing: WithOption = from_json(json_missing).expect("should parse missing");

        assert_eq!(from_null.value, None);
        assert_eq!(from_missing.value, None);
    }
}
