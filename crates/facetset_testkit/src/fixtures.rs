//! Test fixtures.
//!
//! Provides a realistic indexable element type and prebuilt sets for tests
//! across the workspace.

use facetset_core::{Extractor, IndexedSet, Indexable};
use facetset_json::{ToValue, Value};
use serde::{Deserialize, Serialize};

/// A music catalog entry, the workhorse element type of the test suite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Track title.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Release year.
    pub year: u16,
}

impl Track {
    /// Creates a track.
    pub fn new(title: &str, artist: &str, year: u16) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            year,
        }
    }
}

impl Indexable for Track {
    fn accessors() -> Vec<Extractor<Self>> {
        vec![
            Extractor::new("artist", |t: &Track| t.artist.clone()),
            Extractor::new("year", |t: &Track| i64::from(t.year)),
            Extractor::new("decade", |t: &Track| i64::from(t.year / 10 * 10)),
            // Fails for untitled tracks; those stay out of this index.
            Extractor::fallible("title_initial", |t: &Track| {
                t.title.chars().next().map(|c| c.to_string())
            }),
        ]
    }
}

impl ToValue for Track {
    fn to_value(&self) -> Value {
        Value::map(vec![
            (
                Value::Text("title".to_string()),
                Value::Text(self.title.clone()),
            ),
            (
                Value::Text("artist".to_string()),
                Value::Text(self.artist.clone()),
            ),
            (Value::Text("year".to_string()), Value::Int(i64::from(self.year))),
        ])
    }
}

/// A small discography with shared artists, years and decades, so every
/// index has multi-member buckets.
pub fn discography() -> Vec<Track> {
    vec![
        Track::new("Blue Monday", "New Order", 1983),
        Track::new("Age of Consent", "New Order", 1983),
        Track::new("Atmosphere", "Joy Division", 1980),
        Track::new("Disorder", "Joy Division", 1979),
        Track::new("", "Unknown", 1983),
    ]
}

/// A fully indexed set over [`discography`], using every accessor the
/// [`Track`] type publishes.
pub fn indexed_discography() -> IndexedSet<Track> {
    let mut set = IndexedSet::<Track>::discover().expect("Track publishes accessors");
    set.insert_all(discography());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discography_has_shared_buckets() {
        let set = indexed_discography();

        let new_order = set.get("artist", "New Order").unwrap();
        assert_eq!(new_order.len(), 2);

        let eighty_three = set.get("year", 1983i64).unwrap();
        assert_eq!(eighty_three.len(), 3);

        let seventies = set.get("decade", 1970i64).unwrap();
        assert_eq!(seventies.len(), 1);
    }

    #[test]
    fn untitled_track_is_swallowed_by_title_initial() {
        let set = indexed_discography();

        assert!(set.contains(&Track::new("", "Unknown", 1983)));
        let initials = set.get("title_initial", "A").unwrap();
        assert_eq!(initials.len(), 2);
        assert!(set.get("title_initial", "").unwrap().is_empty());
    }
}
