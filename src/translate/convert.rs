// ABOUTME: Small conversions from config collections to daemon-model options.
// ABOUTME: The daemon treats an absent list and an empty one alike; we send absent.

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

pub(crate) fn non_empty_set(items: &BTreeSet<String>) -> Option<Vec<String>> {
    non_empty(items.iter().cloned().collect())
}

pub(crate) fn non_empty_map(map: &BTreeMap<String, String>) -> Option<HashMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

/// Megabytes to bytes, `None` on overflow.
pub(crate) fn megabytes(value: i64) -> Option<i64> {
    value.checked_mul(1024 * 1024)
}
