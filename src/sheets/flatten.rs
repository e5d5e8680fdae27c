// src/sheets/flatten.rs

use super::record::{FlatRecord, Record, Value};

/// Flatten a nested record into dotted-path keys.
///
/// Lists are walked like maps keyed by their index, so `{"a": [{"b": 1}]}`
/// yields `a.0.b`. Empty lists and maps contribute no keys. When two paths
/// collide the later value wins and the key keeps its first position.
pub fn flatten(record: &Record) -> FlatRecord {
    let mut flat = FlatRecord::new();
    for (key, value) in record {
        flatten_value(&mut flat, key.clone(), value);
    }
    flat
}

fn flatten_value(flat: &mut FlatRecord, path: String, value: &Value) {
    match value {
        Value::Map(map) => {
            for (key, child) in map {
                flatten_value(flat, join_path(&path, key), child);
            }
        }
        Value::List(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_value(flat, join_path(&path, &index.to_string()), child);
            }
        }
        scalar => {
            if let Some(leaf) = scalar.as_flat() {
                flat.insert(path, leaf);
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + 1 + key.len());
    path.push_str(prefix);
    path.push('.');
    path.push_str(key);
    path
}
