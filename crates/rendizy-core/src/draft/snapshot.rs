//! Draft snapshots used for dirty checking.
//!
//! A snapshot is the compact `serde_json` serialization of a draft. Two
//! drafts are "the same" when their snapshots are byte-equal. Struct fields
//! serialize in declaration order and `serde_json::Value` maps are sorted,
//! so equal values produce equal snapshots; key order is not normalized
//! beyond that.

use rendizy_types::error::SaveError;
use serde::Serialize;

/// Serialize a draft into its snapshot string.
pub fn snapshot<D: Serialize>(draft: &D) -> Result<String, SaveError> {
    serde_json::to_string(draft).map_err(|e| SaveError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Form {
        name: String,
        rooms: u32,
    }

    #[test]
    fn test_struct_snapshot_follows_field_order() {
        let form = Form {
            name: "Casa".to_string(),
            rooms: 2,
        };
        assert_eq!(snapshot(&form).unwrap(), r#"{"name":"Casa","rooms":2}"#);
    }

    #[test]
    fn test_value_snapshot_is_key_sorted() {
        let a = serde_json::json!({"b": 1, "a": 2});
        let b = serde_json::json!({"a": 2, "b": 1});
        assert_eq!(snapshot(&a).unwrap(), snapshot(&b).unwrap());
    }

    #[test]
    fn test_non_string_map_keys_fail() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "x");
        assert!(matches!(snapshot(&map), Err(SaveError::Serialization(_))));
    }
}
