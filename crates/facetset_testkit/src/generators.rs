//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random values, tracks and operation
//! sequences that stay within the invariants the engine expects.

use crate::fixtures::Track;
use facetset_json::Value;
use proptest::prelude::*;

/// Strategy for scalar values (no containers).
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        prop::num::f64::NORMAL.prop_map(Value::Float),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::Text),
    ]
}

/// Strategy for arbitrary values, including nested arrays and maps.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_value_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Value::map),
        ]
    })
}

/// Strategy for valid tracks.
pub fn track_strategy() -> impl Strategy<Value = Track> {
    (
        "[A-Za-z ]{0,16}",
        prop::sample::select(vec!["New Order", "Joy Division", "Electronic", "Unknown"]),
        1960u16..2030u16,
    )
        .prop_map(|(title, artist, year)| Track::new(&title, artist, year))
}

/// Strategy for short lists of tracks with likely duplicates.
pub fn track_batch_strategy() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(track_strategy(), 0..24)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn value_strategy_produces_lawful_hash_keys(value in value_strategy()) {
            use std::collections::HashMap;
            let mut map = HashMap::new();
            map.insert(value.clone(), ());
            // Equal values must find themselves again.
            prop_assert!(map.contains_key(&value));
        }

        #[test]
        fn map_values_are_canonically_sorted(value in value_strategy()) {
            if let Value::Map(pairs) = &value {
                for window in pairs.windows(2) {
                    let ord = window[0].0.cmp_canonical(&window[1].0);
                    prop_assert_ne!(ord, std::cmp::Ordering::Greater);
                }
            }
        }
    }
}
