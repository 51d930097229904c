use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{SyncError, SyncResult};

/// Decode the array under `key`; a missing or non-array key is an empty list.
pub fn extract_list<T: DeserializeOwned>(data: Value, key: &str) -> SyncResult<Vec<T>> {
    match take_array(data, key) {
        Some(items) => serde_json::from_value(Value::Array(items))
            .map_err(|e| SyncError::decode(format!("`{}` records", key), e)),
        None => Ok(Vec::new()),
    }
}

fn take_array(data: Value, key: &str) -> Option<Vec<Value>> {
    match data {
        Value::Object(mut map) => match map.remove(key)? {
            Value::Array(items) => Some(items),
            _ => None,
        },
        _ => None,
    }
}
