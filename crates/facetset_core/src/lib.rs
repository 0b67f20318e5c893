//! # Facetset Core
//!
//! An in-memory set with secondary indexes.
//!
//! [`IndexedSet`] stores unique elements like an ordinary hash set and
//! additionally maintains one index per registered [`Extractor`] — a named,
//! zero-argument derivation from an element to a value — so "every element
//! whose derivation X equals V" is an amortized O(1) lookup instead of a
//! scan.
//!
//! This crate provides:
//! - Extractor descriptors and the validated, immutable [`ExtractorSet`]
//!   registry (explicit, name-resolved, or auto-discovered construction)
//! - The [`IndexedSet`] engine: inventory/index co-maintenance across
//!   insert, remove, clear and reindex, defensive-copy queries, two
//!   equality notions, deep cloning
//! - [`Snapshot`] export/import for transporting a set across process
//!   boundaries, re-resolving extractor bindings by name on import
//!
//! The structure is single-threaded: no internal locking exists, and
//! concurrent use requires external mutual exclusion around the whole set.
//!
//! ## Example
//!
//! ```
//! use facetset_core::{Extractor, IndexedSet};
//!
//! let mut cache = IndexedSet::from_extractors(vec![
//!     Extractor::new("domain", |email: &String| {
//!         email.split('@').next_back().unwrap_or("").to_string()
//!     }),
//! ]).unwrap();
//!
//! cache.insert("ada@example.com".to_string());
//! cache.insert("alan@example.com".to_string());
//!
//! let hits = cache.get("domain", "example.com").unwrap();
//! assert_eq!(hits.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod extractor;
mod set;
mod snapshot;

pub use error::{CoreError, CoreResult};
pub use extractor::{Element, Extractor, ExtractorSet, Indexable};
pub use set::IndexedSet;
pub use snapshot::{ExtractorSnapshot, Snapshot};
