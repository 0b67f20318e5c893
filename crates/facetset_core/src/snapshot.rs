//! Snapshot export and import.
//!
//! A [`Snapshot`] is a plain value capturing an indexed set's inventory and
//! index content together with the element type descriptor and the
//! registered extractor *names*. The runtime extractor bindings are never
//! persisted: import re-resolves each persisted name against the element
//! type's published accessors, so a snapshot is only as portable as those
//! names.
//!
//! Snapshots are transport-agnostic: `Snapshot` derives serde traits and
//! any serde format can carry it.

use crate::error::{CoreError, CoreResult};
use crate::extractor::{Element, ExtractorSet, Indexable};
use crate::set::IndexedSet;
use facetset_json::Value;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use tracing::debug;

/// A transportable capture of an indexed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Descriptor of the element type the snapshot was taken from.
    pub element_type: String,
    /// The inventory.
    pub elements: Vec<T>,
    /// Per-extractor index content, in registration order.
    pub index: Vec<ExtractorSnapshot<T>>,
}

/// One extractor's persisted name and bucket contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorSnapshot<T> {
    /// The extractor's registered name.
    pub extractor: String,
    /// Derived value to bucket members.
    pub buckets: Vec<(Value, Vec<T>)>,
}

impl<T> IndexedSet<T>
where
    T: Element + Indexable + Serialize + DeserializeOwned,
{
    /// Captures the current inventory and index content.
    ///
    /// The snapshot records index state as-is: elements that were inserted
    /// unindexed, or whose derivation failed, stay absent from the
    /// persisted buckets.
    pub fn export(&self) -> Snapshot<T> {
        let index = self
            .extractors()
            .iter()
            .map(|extractor| ExtractorSnapshot {
                extractor: extractor.name().to_string(),
                buckets: self
                    .bucket_entries(extractor.name())
                    .into_iter()
                    .flatten()
                    .map(|(key, members)| {
                        (key.clone(), members.iter().cloned().collect())
                    })
                    .collect(),
            })
            .collect();

        Snapshot {
            element_type: type_name::<T>().to_string(),
            elements: self.iter().cloned().collect(),
            index,
        }
    }

    /// Rehydrates a set from a snapshot.
    ///
    /// Inventory and index are restored exactly as persisted — nothing is
    /// re-derived. Extractor bindings are rebuilt by resolving each
    /// persisted name against `T`'s accessors.
    ///
    /// # Errors
    ///
    /// [`CoreError::ElementTypeMismatch`] if the snapshot was taken from a
    /// different element type; [`CoreError::UnresolvedExtractor`] if a
    /// persisted name no longer resolves; the registry construction errors
    /// for an empty or duplicated name list. No instance is produced on any
    /// of these.
    pub fn import(snapshot: Snapshot<T>) -> CoreResult<Self> {
        let expected = type_name::<T>();
        if snapshot.element_type != expected {
            return Err(CoreError::element_type_mismatch(
                expected,
                snapshot.element_type,
            ));
        }

        let names: Vec<&str> = snapshot
            .index
            .iter()
            .map(|entry| entry.extractor.as_str())
            .collect();
        let extractors = ExtractorSet::<T>::resolve(&names)?;

        let mut set = IndexedSet::new(extractors);
        for entry in snapshot.index {
            for (key, members) in entry.buckets {
                set.restore_bucket(&entry.extractor, key, members.into_iter().collect());
            }
        }
        for element in snapshot.elements {
            set.insert_unindexed(element);
        }

        debug!(
            elements = set.len(),
            extractors = set.extractors().len(),
            "imported snapshot"
        );
        Ok(set)
    }
}
