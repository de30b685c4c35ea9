//! Field-level comparison of two JSON snapshots.

use serde_json::{Map, Value, json};

/// Fields whose value differs between `old` and `new`, keyed by field name.
///
/// Keys present on only one side compare against `null`, so a field that is
/// absent in one snapshot and explicitly `null` in the other is not reported.
/// Values compare structurally: key order inside nested objects never counts
/// as a change, unlike comparing serialized JSON text. If either snapshot
/// is missing the diff is empty; creations and deletions carry their full
/// snapshot instead. Snapshots that are not JSON objects have no fields.
pub fn diff(old: Option<&Value>, new: Option<&Value>) -> Map<String, Value> {
    let mut changes = Map::new();
    let (Some(old), Some(new)) = (old, new) else {
        return changes;
    };
    let empty = Map::new();
    let old_fields = old.as_object().unwrap_or(&empty);
    let new_fields = new.as_object().unwrap_or(&empty);

    for key in old_fields.keys().chain(new_fields.keys()) {
        if changes.contains_key(key) {
            continue;
        }
        let before = old_fields.get(key).unwrap_or(&Value::Null);
        let after = new_fields.get(key).unwrap_or(&Value::Null);
        if before != after {
            changes.insert(key.clone(), json!({ "old": before, "new": after }));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_fields_are_omitted() {
        let old = json!({"name": "Mug", "stock": 10, "images": ["a.png"]});
        let new = json!({"name": "Mug", "stock": 6, "images": ["a.png"]});
        let changes = diff(Some(&old), Some(&new));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["stock"], json!({"old": 10, "new": 6}));
    }

    #[test]
    fn keys_from_both_sides_are_compared() {
        let old = json!({"name": "Mug", "location": "A1"});
        let new = json!({"name": "Mug", "type": "ceramic"});
        let changes = diff(Some(&old), Some(&new));
        assert_eq!(changes["location"], json!({"old": "A1", "new": null}));
        assert_eq!(changes["type"], json!({"old": null, "new": "ceramic"}));
        assert!(!changes.contains_key("name"));
    }

    #[test]
    fn nested_values_compare_structurally() {
        let old = json!({"colorVariants": [{"name": "red"}]});
        let new = json!({"colorVariants": [{"name": "blue"}]});
        let changes = diff(Some(&old), Some(&new));
        assert_eq!(
            changes["colorVariants"],
            json!({"old": [{"name": "red"}], "new": [{"name": "blue"}]})
        );
    }

    #[test]
    fn missing_snapshot_yields_empty_diff() {
        let value = json!({"name": "Mug"});
        assert!(diff(None, Some(&value)).is_empty());
        assert!(diff(Some(&value), None).is_empty());
        assert!(diff(None, None).is_empty());
    }

    #[test]
    fn identical_snapshots_yield_empty_diff() {
        let value = json!({"name": "Mug", "price": "12.50"});
        assert!(diff(Some(&value), Some(&value.clone())).is_empty());
    }

    #[test]
    fn absent_and_null_are_the_same() {
        let old = json!({"name": "Mug", "location": null, "variant": {"a": 1, "b": 2}});
        let new = json!({"name": "Mug", "variant": {"b": 2, "a": 1}});
        assert!(diff(Some(&old), Some(&new)).is_empty());
    }
}
