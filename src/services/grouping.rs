use std::collections::BTreeMap;

use crate::model::document::ArbDocument;
use crate::model::key_status::{group_name_of, KeyGroup, KeyStatus};

/// Groups the key union by prefix and reports how many documents hold each key.
///
/// Groups are ordered by name and keys within a group lexically. Every key
/// of the union lands in exactly one group.
pub fn group(documents: &[ArbDocument]) -> Vec<KeyGroup> {
    let total = documents.len();
    let mut buckets: BTreeMap<&str, Vec<KeyStatus>> = BTreeMap::new();

    let mut keys: Vec<&str> = documents
        .iter()
        .flat_map(|d| d.translations.keys().map(String::as_str))
        .collect();
    keys.sort_unstable();
    keys.dedup();

    for key in keys {
        let present = documents.iter().filter(|d| d.has_key(key)).count();
        buckets
            .entry(group_name_of(key))
            .or_default()
            .push(KeyStatus::new(key, present, total));
    }

    buckets
        .into_iter()
        .map(|(name, keys)| KeyGroup {
            group_name: name.to_string(),
            keys,
        })
        .collect()
}
