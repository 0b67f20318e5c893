//! Basic Facetset Example - Track Catalog
//!
//! This example demonstrates core facetset functionality:
//! - Declaring extractors for an element type
//! - Multi-key lookup through the secondary indexes
//! - Indexing flags, clear/reindex, and clone independence
//! - JSON views and snapshot export/import
//!
//! Run with: cargo run -p catalog

use facetset_core::{Extractor, IndexedSet, Indexable, Snapshot};
use facetset_json::{ToValue, Value};
use serde::{Deserialize, Serialize};

/// A music catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct Track {
    title: String,
    artist: String,
    year: u16,
}

impl Track {
    fn new(title: &str, artist: &str, year: u16) -> Self {
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
            (
                Value::Text("year".to_string()),
                Value::Int(i64::from(self.year)),
            ),
        ])
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Facetset Track Catalog ===\n");

    let mut catalog = IndexedSet::<Track>::discover().expect("Track publishes accessors");

    catalog.insert_all(vec![
        Track::new("Blue Monday", "New Order", 1983),
        Track::new("Age of Consent", "New Order", 1983),
        Track::new("Atmosphere", "Joy Division", 1980),
        Track::new("Disorder", "Joy Division", 1979),
    ]);
    println!("catalog holds {} tracks\n", catalog.len());

    println!("-- lookup by artist: New Order");
    for track in catalog.get("artist", "New Order").expect("indexed") {
        println!("   {} ({})", track.title, track.year);
    }

    println!("\n-- lookup by decade: 1970");
    for track in catalog.get("decade", 1970i64).expect("indexed") {
        println!("   {} - {}", track.artist, track.title);
    }

    // An unindexed insert stays invisible to queries until a reindex.
    catalog.insert_unindexed(Track::new("Temptation", "New Order", 1982));
    let visible = catalog.get("artist", "New Order").expect("indexed").len();
    println!("\n-- after unindexed insert: {visible} New Order tracks visible");
    catalog.reindex();
    let visible = catalog.get("artist", "New Order").expect("indexed").len();
    println!("-- after reindex:          {visible} New Order tracks visible");

    // Clones share nothing mutable with the source.
    let mut shortlist = catalog.clone();
    shortlist.retain_all([&Track::new("Blue Monday", "New Order", 1983)]);
    println!(
        "\n-- shortlist kept {} track(s), catalog still holds {}",
        shortlist.len(),
        catalog.len()
    );

    println!("\n-- compact JSON view of the shortlist");
    println!("{}", shortlist.to_json());

    println!("\n-- human-readable dump");
    print!("{}", shortlist.to_text());

    // Snapshots travel through any serde transport; import re-resolves
    // extractor bindings by name.
    let wire = serde_json::to_string(&catalog.export()).expect("serializable snapshot");
    let snapshot: Snapshot<Track> = serde_json::from_str(&wire).expect("well-formed snapshot");
    let restored = IndexedSet::import(snapshot).expect("resolvable extractors");
    println!(
        "\n-- snapshot round-trip: {} tracks, indexes intact: {}",
        restored.len(),
        restored.equals_comparing_indexes(&catalog)
    );
}
