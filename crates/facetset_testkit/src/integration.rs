//! Cross-crate integration test helpers.
//!
//! Provides a harness that drives an [`IndexedSet`] alongside a plain
//! `HashSet` model and verifies the two stay in agreement, plus the
//! workspace's cross-crate integration suite.

use crate::fixtures::Track;
use facetset_core::IndexedSet;
use std::collections::HashSet;

/// A test harness pairing an indexed set with a model hash set.
pub struct SetHarness {
    /// The system under test.
    pub set: IndexedSet<Track>,
    /// Plain-set model of expected membership.
    model: HashSet<Track>,
}

impl SetHarness {
    /// Creates a harness over a fully indexed empty set.
    pub fn new() -> Self {
        Self {
            set: IndexedSet::discover().expect("Track publishes accessors"),
            model: HashSet::new(),
        }
    }

    /// Inserts into both sides and checks they agree on the outcome.
    pub fn insert(&mut self, track: Track) {
        let expected = self.model.insert(track.clone());
        let actual = self.set.insert(track);
        assert_eq!(actual, expected, "insert outcome diverged from model");
    }

    /// Removes from both sides and checks they agree on the outcome.
    pub fn remove(&mut self, track: &Track) {
        let expected = self.model.remove(track);
        let actual = self.set.remove(track);
        assert_eq!(actual, expected, "remove outcome diverged from model");
    }

    /// Verifies membership parity and index consistency.
    ///
    /// Every model element must be present, and — since the harness always
    /// indexes — findable through every extractor whose derivation
    /// succeeds.
    pub fn verify(&self) {
        assert_eq!(self.set.len(), self.model.len());
        for track in &self.model {
            assert!(self.set.contains(track));
            for extractor in self.set.extractors().iter() {
                if let Some(value) = extractor.derive(track) {
                    let bucket = self
                        .set
                        .get(extractor.name(), value)
                        .expect("registered extractor");
                    assert!(
                        bucket.contains(track),
                        "element missing from {} bucket",
                        extractor.name()
                    );
                    for member in &bucket {
                        assert!(self.set.contains(member), "bucket references non-member");
                    }
                }
            }
        }
    }
}

impl Default for SetHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{discography, indexed_discography};
    use crate::generators::track_batch_strategy;
    use facetset_core::Snapshot;
    use proptest::prelude::*;

    #[test]
    fn harness_stays_consistent_through_a_scripted_session() {
        let mut harness = SetHarness::new();
        for track in discography() {
            harness.insert(track);
        }
        harness.verify();

        harness.insert(Track::new("Blue Monday", "New Order", 1983));
        harness.remove(&Track::new("Disorder", "Joy Division", 1979));
        harness.remove(&Track::new("Disorder", "Joy Division", 1979));
        harness.verify();
    }

    #[test]
    fn rendered_json_has_the_snapshot_shape() {
        let set = indexed_discography();
        let parsed: serde_json::Value = serde_json::from_str(&set.to_json()).unwrap();

        let elements = parsed["elements"].as_array().unwrap();
        assert_eq!(elements.len(), set.len());

        let index = parsed["index"].as_object().unwrap();
        assert_eq!(index.len(), set.extractors().len());
        assert!(index.contains_key("artist"));
        assert!(index.contains_key("decade"));

        let new_order = index["artist"]["New Order"].as_array().unwrap();
        assert_eq!(new_order.len(), 2);
    }

    #[test]
    fn rendering_is_stable_across_clone_and_reindex() {
        let set = indexed_discography();
        let mut clone = set.clone();
        assert_eq!(set.to_json(), clone.to_json());
        assert_eq!(set.to_json_pretty(), clone.to_json_pretty());
        assert_eq!(set.to_text(), clone.to_text());

        clone.clear_index();
        clone.reindex();
        assert_eq!(set.to_json(), clone.to_json());
    }

    #[test]
    fn snapshot_roundtrips_through_serde_json() {
        let set = indexed_discography();
        let wire = serde_json::to_vec(&set.export()).unwrap();
        let snapshot: Snapshot<Track> = serde_json::from_slice(&wire).unwrap();
        let restored = IndexedSet::import(snapshot).unwrap();

        assert!(set.equals_comparing_indexes(&restored));
        assert_eq!(set.to_json(), restored.to_json());
    }

    #[test]
    fn equality_across_registries() {
        let wide = indexed_discography();
        let mut narrow = IndexedSet::<Track>::resolve(&["artist"]).unwrap();
        narrow.insert_all(discography());

        assert_eq!(wide, narrow);
        assert!(!wide.equals_comparing_indexes(&narrow));
    }

    proptest! {
        #[test]
        fn random_sessions_stay_consistent(
            inserts in track_batch_strategy(),
            removals in track_batch_strategy(),
        ) {
            let mut harness = SetHarness::new();
            for track in inserts {
                harness.insert(track);
            }
            for track in &removals {
                harness.remove(track);
            }
            harness.verify();
        }

        #[test]
        fn reindex_matches_eager_indexing(batch in track_batch_strategy()) {
            let mut eager = IndexedSet::<Track>::discover().unwrap();
            let mut lazy = IndexedSet::<Track>::discover().unwrap();

            for track in batch {
                eager.insert(track.clone());
                lazy.insert_unindexed(track);
            }
            lazy.reindex();

            prop_assert!(eager.equals_comparing_indexes(&lazy));
        }
    }
}
