//! The indexed set engine.
//!
//! [`IndexedSet`] behaves like a unique-element hash set that additionally
//! maintains one secondary index per registered extractor: a mapping from
//! derived value to the set of elements producing that value. Mutations
//! keep inventory and index consistent; queries read the index directly.
//!
//! # Invariants
//!
//! - Every index key matches a registered extractor name.
//! - An element indexed at insert time with a successful derivation is
//!   present in that extractor's bucket for the derived value.
//! - An element inserted unindexed, or whose derivation failed, is absent
//!   from that extractor's buckets until a reindex succeeds.
//! - Buckets only reference elements currently in the inventory, unless the
//!   caller explicitly suppressed index maintenance on removal.

use crate::error::{CoreError, CoreResult};
use crate::extractor::{Element, Extractor, ExtractorSet, Indexable};
use facetset_json::{to_json_string, to_json_string_pretty, ToValue, Value};
use std::collections::hash_set;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type BucketMap<T> = HashMap<Value, HashSet<T>>;

/// A hash set with secondary indexes over derived values.
///
/// # Example
///
/// ```
/// use facetset_core::IndexedSet;
///
/// let mut set = IndexedSet::<String>::resolve(&["trim", "len"]).unwrap();
/// set.insert("Hello World  ".to_string());
/// set.insert("abc123".to_string());
///
/// let hits = set.get("trim", "Hello World").unwrap();
/// assert!(hits.contains("Hello World  "));
/// ```
pub struct IndexedSet<T: Element> {
    /// Registered extractors; immutable, shared between clones.
    extractors: Arc<ExtractorSet<T>>,
    /// Canonical element storage.
    inventory: HashSet<T>,
    /// Per-extractor bucket maps, one entry per registered extractor.
    index: HashMap<String, BucketMap<T>>,
}

impl<T: Element> IndexedSet<T> {
    /// Creates an indexed set over a validated registry.
    pub fn new(extractors: ExtractorSet<T>) -> Self {
        let index = extractors
            .names()
            .map(|name| (name.to_string(), BucketMap::new()))
            .collect();
        Self {
            extractors: Arc::new(extractors),
            inventory: HashSet::new(),
            index,
        }
    }

    /// Creates an indexed set from an explicit collection of extractors.
    ///
    /// # Errors
    ///
    /// The [`ExtractorSet::from_extractors`] configuration errors.
    pub fn from_extractors<I>(extractors: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Extractor<T>>,
    {
        Ok(Self::new(ExtractorSet::from_extractors(extractors)?))
    }

    /// Returns the registered extractors.
    pub fn extractors(&self) -> &ExtractorSet<T> {
        &self.extractors
    }

    /// Inserts an element, indexing it under every extractor whose
    /// derivation succeeds.
    ///
    /// Returns false without touching anything if the element is already
    /// present. A failed derivation leaves the element out of that
    /// extractor's buckets and has no effect on the insert itself.
    pub fn insert(&mut self, element: T) -> bool {
        self.insert_impl(element, true)
    }

    /// Inserts an element into the inventory only, skipping the index.
    ///
    /// The element stays invisible to [`IndexedSet::get`] until a
    /// [`IndexedSet::reindex`].
    pub fn insert_unindexed(&mut self, element: T) -> bool {
        self.insert_impl(element, false)
    }

    fn insert_impl(&mut self, element: T, index: bool) -> bool {
        if self.inventory.contains(&element) {
            return false;
        }
        if index {
            index_element(&self.extractors, &mut self.index, &element);
        }
        self.inventory.insert(element)
    }

    /// Inserts every element of `elements`, indexing each.
    ///
    /// Returns true iff any element changed membership.
    pub fn insert_all<I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for element in elements {
            changed |= self.insert(element);
        }
        changed
    }

    /// Inserts every element of `elements` without indexing any.
    pub fn insert_all_unindexed<I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for element in elements {
            changed |= self.insert_unindexed(element);
        }
        changed
    }

    /// Removes an element from the inventory and from every bucket of every
    /// extractor.
    ///
    /// Returns whether the inventory contained it.
    pub fn remove(&mut self, element: &T) -> bool {
        self.remove_impl(element, true)
    }

    /// Removes an element from the inventory, leaving index entries behind.
    pub fn remove_keeping_index(&mut self, element: &T) -> bool {
        self.remove_impl(element, false)
    }

    fn remove_impl(&mut self, element: &T, unindex: bool) -> bool {
        if unindex {
            scrub_from_index(&mut self.index, element);
        }
        self.inventory.remove(element)
    }

    /// Removes every element of `elements`; returns true iff any was present.
    pub fn remove_all<'a, I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.remove_all_impl(elements, true)
    }

    /// Removes every element of `elements` from the inventory only.
    pub fn remove_all_keeping_index<'a, I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.remove_all_impl(elements, false)
    }

    fn remove_all_impl<'a, I>(&mut self, elements: I, unindex: bool) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for element in elements {
            changed |= self.remove_impl(element, unindex);
        }
        changed
    }

    /// Keeps only the elements present in `keep`; returns true iff anything
    /// was removed.
    pub fn retain_all<'a, I>(&mut self, keep: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.retain_all_impl(keep, true)
    }

    /// Keeps only the elements present in `keep`, leaving index entries of
    /// the removed elements behind.
    pub fn retain_all_keeping_index<'a, I>(&mut self, keep: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.retain_all_impl(keep, false)
    }

    fn retain_all_impl<'a, I>(&mut self, keep: I, unindex: bool) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let keep: HashSet<&T> = keep.into_iter().collect();
        let doomed: Vec<T> = self
            .inventory
            .iter()
            .filter(|element| !keep.contains(element))
            .cloned()
            .collect();
        let mut changed = false;
        for element in &doomed {
            changed |= self.remove_impl(element, unindex);
        }
        changed
    }

    /// Empties the inventory and every bucket map.
    pub fn clear(&mut self) {
        self.clear_index();
        self.inventory.clear();
        debug!("cleared inventory and index");
    }

    /// Empties the inventory, leaving index content behind.
    pub fn clear_keeping_index(&mut self) {
        self.inventory.clear();
    }

    /// Resets every extractor's bucket map to empty.
    ///
    /// The inventory is untouched; queries return empty until a
    /// [`IndexedSet::reindex`].
    pub fn clear_index(&mut self) {
        for buckets in self.index.values_mut() {
            buckets.clear();
        }
    }

    /// Rebuilds the index from the current inventory.
    ///
    /// Equivalent to [`IndexedSet::clear_index`] followed by the insert-time
    /// indexing step for every element, with the same silent-failure policy.
    pub fn reindex(&mut self) {
        self.clear_index();
        for element in &self.inventory {
            index_element(&self.extractors, &mut self.index, element);
        }
        debug!(
            elements = self.inventory.len(),
            extractors = self.extractors.len(),
            "reindexed"
        );
    }

    /// Returns the elements whose derivation under `name` equals `value`,
    /// based on the current state of the index.
    ///
    /// The result is a defensive copy; mutating it does not affect the
    /// index. A registered extractor with no matching bucket yields an
    /// empty set.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownExtractor`] if `name` is not registered.
    pub fn get(&self, name: &str, value: impl Into<Value>) -> CoreResult<HashSet<T>> {
        let buckets = self
            .index
            .get(name)
            .ok_or_else(|| CoreError::unknown_extractor(name))?;
        Ok(buckets.get(&value.into()).cloned().unwrap_or_default())
    }

    /// Like [`IndexedSet::get`], but requires the registered descriptor
    /// itself — same name and same derivation function.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownExtractor`] if the descriptor is not the
    /// registered one.
    pub fn get_by(&self, extractor: &Extractor<T>, value: impl Into<Value>) -> CoreResult<HashSet<T>> {
        if !self.extractors.contains_spec(extractor) {
            return Err(CoreError::unknown_extractor(extractor.name()));
        }
        self.get(extractor.name(), value)
    }

    /// Returns true if an extractor with this name is registered.
    pub fn is_indexed(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns true if this exact descriptor is registered.
    pub fn is_indexed_by(&self, extractor: &Extractor<T>) -> bool {
        self.extractors.contains_spec(extractor)
    }

    /// Returns true if the inventory contains the element.
    pub fn contains(&self, element: &T) -> bool {
        self.inventory.contains(element)
    }

    /// Returns true if the inventory contains every element of `elements`.
    pub fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        elements.into_iter().all(|e| self.inventory.contains(e))
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    /// Returns true if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Iterates the elements in inventory order.
    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.inventory.iter()
    }

    /// Copies the elements into a vector, in inventory order.
    pub fn to_vec(&self) -> Vec<T> {
        self.inventory.iter().cloned().collect()
    }

    /// Structural equality of inventory, registry and index content.
    ///
    /// Plain `==` compares inventories only; this additionally requires the
    /// same registered names and bucket-for-bucket identical index state.
    pub fn equals_comparing_indexes(&self, other: &Self) -> bool {
        self.inventory == other.inventory
            && *self.extractors == *other.extractors
            && self.index == other.index
    }

    pub(crate) fn bucket_entries(&self, name: &str) -> Option<&BucketMap<T>> {
        self.index.get(name)
    }

    pub(crate) fn restore_bucket(&mut self, name: &str, key: Value, members: HashSet<T>) {
        if let Some(buckets) = self.index.get_mut(name) {
            buckets.insert(key, members);
        }
    }
}

/// Runs every extractor against one element, filing it under each
/// successful derivation. A `None` derivation files nothing and raises
/// nothing.
fn index_element<T: Element>(
    extractors: &ExtractorSet<T>,
    index: &mut HashMap<String, BucketMap<T>>,
    element: &T,
) {
    for extractor in extractors.iter() {
        if let Some(value) = extractor.derive(element) {
            if let Some(buckets) = index.get_mut(extractor.name()) {
                buckets.entry(value).or_default().insert(element.clone());
            }
        }
    }
}

/// Removes the element from every bucket of every extractor, pruning
/// buckets that become empty.
///
/// This scans existing index content instead of recomputing derivations: a
/// derivation may have drifted since the element was indexed, and a key
/// lookup from a fresh derivation would miss the stale entry.
fn scrub_from_index<T: Element>(index: &mut HashMap<String, BucketMap<T>>, element: &T) {
    for buckets in index.values_mut() {
        buckets.retain(|_, members| {
            members.remove(element);
            !members.is_empty()
        });
    }
}

impl<T: Element + Indexable> IndexedSet<T> {
    /// Creates an indexed set by resolving accessor names.
    ///
    /// # Errors
    ///
    /// The [`ExtractorSet::resolve`] configuration errors.
    pub fn resolve(names: &[&str]) -> CoreResult<Self> {
        Ok(Self::new(ExtractorSet::resolve(names)?))
    }

    /// Creates an indexed set over every accessor the element type
    /// publishes.
    ///
    /// # Errors
    ///
    /// The [`ExtractorSet::discover`] configuration errors.
    pub fn discover() -> CoreResult<Self> {
        Ok(Self::new(ExtractorSet::discover()?))
    }
}

impl<T: Element> Clone for IndexedSet<T> {
    /// Deep copy sharing no mutable state with the source.
    ///
    /// Inventory and every bucket set are copied; the registry is shared by
    /// reference (immutable descriptors).
    fn clone(&self) -> Self {
        Self {
            extractors: Arc::clone(&self.extractors),
            inventory: self.inventory.clone(),
            index: self.index.clone(),
        }
    }
}

/// Inventory-only structural equality, independent of extractor
/// registration and index content. See
/// [`IndexedSet::equals_comparing_indexes`] for the stricter notion.
impl<T: Element> PartialEq for IndexedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inventory == other.inventory
    }
}

impl<T: Element> Eq for IndexedSet<T> {}

impl<T: Element + fmt::Debug> fmt::Debug for IndexedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedSet")
            .field("elements", &self.inventory)
            .field("extractors", &self.extractors)
            .finish()
    }
}

impl<'a, T: Element> IntoIterator for &'a IndexedSet<T> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inventory.iter()
    }
}

impl<T: Element> IntoIterator for IndexedSet<T> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inventory.into_iter()
    }
}

/// Extending inserts with indexing enabled.
impl<T: Element> Extend<T> for IndexedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T: Element + ToValue> IndexedSet<T> {
    /// Renders `{"elements": [...], "index": {...}}` as compact JSON.
    ///
    /// Output is deterministic: extractors appear in registration order,
    /// bucket keys and element sequences in canonical value order.
    pub fn to_json(&self) -> String {
        to_json_string(&self.render_tree())
    }

    /// Renders the same structure pretty-printed.
    pub fn to_json_pretty(&self) -> String {
        to_json_string_pretty(&self.render_tree())
    }

    /// Renders a human-readable dump of the elements and the index.
    pub fn to_text(&self) -> String {
        let mut sorted: Vec<Value> = self.inventory.iter().map(ToValue::to_value).collect();
        sorted.sort_by(Value::cmp_canonical);

        let mut out = String::from("elements: ");
        let rendered: Vec<String> = sorted.iter().map(to_json_string).collect();
        out.push_str(&rendered.join(","));
        out.push('\n');

        out.push_str("index:\n");
        for extractor in self.extractors.iter() {
            out.push_str("  ");
            out.push_str(extractor.name());
            out.push_str(":\n");
            for (key, members) in self.sorted_buckets(extractor.name()) {
                out.push_str("    ");
                out.push_str(&to_json_string(&key));
                out.push_str(": ");
                let members: Vec<String> = match members {
                    Value::Array(items) => items.iter().map(to_json_string).collect(),
                    other => vec![to_json_string(&other)],
                };
                out.push_str(&members.join(","));
                out.push('\n');
            }
        }
        out
    }

    fn render_tree(&self) -> Value {
        let mut elements: Vec<Value> = self.inventory.iter().map(ToValue::to_value).collect();
        elements.sort_by(Value::cmp_canonical);

        let index_pairs: Vec<(Value, Value)> = self
            .extractors
            .iter()
            .map(|extractor| {
                (
                    Value::Text(extractor.name().to_string()),
                    Value::Map(self.sorted_buckets(extractor.name())),
                )
            })
            .collect();

        Value::Map(vec![
            (Value::Text("elements".to_string()), Value::Array(elements)),
            (Value::Text("index".to_string()), Value::Map(index_pairs)),
        ])
    }

    fn sorted_buckets(&self, name: &str) -> Vec<(Value, Value)> {
        let mut pairs: Vec<(Value, Value)> = self
            .index
            .get(name)
            .into_iter()
            .flatten()
            .map(|(key, members)| {
                let mut rendered: Vec<Value> = members.iter().map(ToValue::to_value).collect();
                rendered.sort_by(Value::cmp_canonical);
                (key.clone(), Value::Array(rendered))
            })
            .collect();
        pairs.sort_by(|a, b| a.0.cmp_canonical(&b.0));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn string_set() -> IndexedSet<String> {
        IndexedSet::<String>::resolve(&["trim", "len"]).unwrap()
    }

    fn hits(set: &IndexedSet<String>, name: &str, value: impl Into<Value>) -> Vec<String> {
        let mut found: Vec<String> = set.get(name, value).unwrap().into_iter().collect();
        found.sort();
        found
    }

    #[test]
    fn insert_and_get() {
        let mut set = string_set();
        assert!(set.insert("Hello World  ".to_string()));
        assert!(set.insert("abc123".to_string()));

        assert_eq!(hits(&set, "trim", "Hello World"), vec!["Hello World  "]);
        assert_eq!(hits(&set, "len", 6i64), vec!["abc123"]);
        assert_eq!(hits(&set, "len", 13i64), vec!["Hello World  "]);
    }

    #[test]
    fn registered_extractor_with_no_match_returns_empty() {
        let set = string_set();
        assert!(set.get("trim", "missing").unwrap().is_empty());
    }

    #[test]
    fn unknown_extractor_is_a_precondition_violation() {
        let set = string_set();
        let result = set.get("to_uppercase", "X");
        assert!(matches!(
            result,
            Err(CoreError::UnknownExtractor { name }) if name == "to_uppercase"
        ));
    }

    #[test]
    fn reinsert_is_a_noop() {
        let mut set = string_set();
        set.insert("abc123".to_string());
        let before = set.clone();

        assert!(!set.insert("abc123".to_string()));
        assert!(set.equals_comparing_indexes(&before));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn clear_index_then_reindex_restores_lookups() {
        let mut set = string_set();
        set.insert("Hello World".to_string());
        set.insert("abc123".to_string());
        let pristine = set.clone();

        set.clear_index();
        assert!(set.get("trim", "Hello World").unwrap().is_empty());
        assert_eq!(set.len(), 2);
        assert!(!set.equals_comparing_indexes(&pristine));

        set.reindex();
        assert_eq!(hits(&set, "trim", "Hello World"), vec!["Hello World"]);
        assert!(set.equals_comparing_indexes(&pristine));
    }

    #[test]
    fn unindexed_insert_is_invisible_until_reindex() {
        let mut set = string_set();
        assert!(set.insert_unindexed("bb".to_string()));

        assert!(set.contains(&"bb".to_string()));
        assert!(set.get("len", 2i64).unwrap().is_empty());

        set.reindex();
        assert_eq!(hits(&set, "len", 2i64), vec!["bb"]);
    }

    #[test]
    fn remove_scrubs_every_bucket() {
        let mut set = string_set();
        set.insert("Hello World".to_string());
        set.insert("abc123".to_string());

        assert!(set.remove(&"abc123".to_string()));

        assert!(!set.contains(&"abc123".to_string()));
        assert!(set.get("trim", "abc123").unwrap().is_empty());
        assert!(set.get("len", 6i64).unwrap().is_empty());
        assert_eq!(hits(&set, "trim", "Hello World"), vec!["Hello World"]);
    }

    #[test]
    fn remove_keeping_index_leaves_stale_entries() {
        let mut set = string_set();
        set.insert("abc123".to_string());

        assert!(set.remove_keeping_index(&"abc123".to_string()));

        assert!(!set.contains(&"abc123".to_string()));
        assert_eq!(hits(&set, "len", 6i64), vec!["abc123"]);
    }

    #[test]
    fn removal_scans_buckets_rather_than_recomputing() {
        // An extractor whose output drifts between insert and remove: a
        // recompute-based removal would look in the wrong bucket.
        let drifted = Arc::new(AtomicBool::new(false));
        let probe = Arc::clone(&drifted);
        let extractor = Extractor::new("mood", move |_: &String| {
            if probe.load(Ordering::SeqCst) {
                "after".to_string()
            } else {
                "before".to_string()
            }
        });
        let mut set = IndexedSet::from_extractors(vec![extractor]).unwrap();
        set.insert("x".to_string());
        assert_eq!(hits(&set, "mood", "before"), vec!["x"]);

        drifted.store(true, Ordering::SeqCst);
        assert!(set.remove(&"x".to_string()));
        assert!(set.get("mood", "before").unwrap().is_empty());
        assert!(set.get("mood", "after").unwrap().is_empty());
    }

    #[test]
    fn failed_derivation_is_swallowed() {
        let parsed = Extractor::fallible("parsed", |s: &String| s.parse::<i64>().ok());
        let len = Extractor::new("len", |s: &String| s.len() as i64);
        let mut set = IndexedSet::from_extractors(vec![parsed, len]).unwrap();

        assert!(set.insert("41".to_string()));
        assert!(set.insert("forty-one".to_string()));

        assert_eq!(hits(&set, "parsed", 41i64), vec!["41"]);
        assert!(set.get("parsed", 9i64).unwrap().is_empty());
        // The failing element is indexed normally everywhere else.
        assert_eq!(hits(&set, "len", 9i64), vec!["forty-one"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_all_reports_any_change() {
        let mut set = string_set();
        assert!(set.insert_all(vec!["a".to_string(), "b".to_string()]));
        assert!(!set.insert_all(vec!["a".to_string(), "b".to_string()]));
        assert!(set.insert_all(vec!["a".to_string(), "c".to_string()]));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn remove_all_and_retain_all() {
        let mut set = string_set();
        set.insert_all(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

        let doomed = ["a".to_string(), "zz".to_string()];
        assert!(set.remove_all(doomed.iter()));
        assert_eq!(set.len(), 2);
        assert!(set.get("len", 1i64).unwrap().contains("b"));
        assert!(!set.get("len", 1i64).unwrap().contains("a"));

        let keep = ["b".to_string()];
        assert!(set.retain_all(keep.iter()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&"b".to_string()));
        assert!(!set.retain_all(keep.iter()));
        assert_eq!(hits(&set, "len", 1i64), vec!["b"]);
    }

    #[test]
    fn retain_all_keeping_index_leaves_stale_entries() {
        let mut set = string_set();
        set.insert_all(vec!["a".to_string(), "b".to_string()]);

        assert!(set.retain_all_keeping_index([&"a".to_string()]));
        assert_eq!(set.len(), 1);
        // "b" is gone from the inventory but still indexed.
        assert!(set.get("trim", "b").unwrap().contains("b"));
    }

    #[test]
    fn clear_variants() {
        let mut set = string_set();
        set.insert("a".to_string());
        set.clear();
        assert!(set.is_empty());
        assert!(set.get("trim", "a").unwrap().is_empty());

        set.insert("a".to_string());
        set.clear_keeping_index();
        assert!(set.is_empty());
        assert_eq!(hits(&set, "trim", "a"), vec!["a"]);
    }

    #[test]
    fn get_returns_a_defensive_copy() {
        let mut set = string_set();
        set.insert("abc123".to_string());

        let mut copy = set.get("len", 6i64).unwrap();
        copy.clear();

        assert_eq!(hits(&set, "len", 6i64), vec!["abc123"]);
    }

    #[test]
    fn get_by_requires_the_registered_descriptor() {
        let set = string_set();
        let registered = set.extractors().get("trim").unwrap().clone();
        assert!(set.get_by(&registered, "x").is_ok());

        // Same name, different function: not the registered descriptor.
        let imposter = Extractor::new("trim", |s: &String| s.to_string());
        assert!(matches!(
            set.get_by(&imposter, "x"),
            Err(CoreError::UnknownExtractor { .. })
        ));
    }

    #[test]
    fn is_indexed() {
        let set = string_set();
        assert!(set.is_indexed("trim"));
        assert!(!set.is_indexed("to_uppercase"));
        assert!(!set.is_indexed("imaginary"));

        let registered = set.extractors().get("len").unwrap().clone();
        assert!(set.is_indexed_by(&registered));
        let foreign = Extractor::new("len", |s: &String| s.len() as i64);
        assert!(!set.is_indexed_by(&foreign));
    }

    #[test]
    fn set_facade() {
        let mut set = string_set();
        assert!(set.is_empty());
        set.insert_all(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&"a".to_string()));
        assert!(set.contains_all([&"a".to_string(), &"b".to_string()]));
        assert!(!set.contains_all([&"a".to_string(), &"z".to_string()]));

        let mut collected: Vec<String> = set.iter().cloned().collect();
        collected.sort();
        assert_eq!(collected, vec!["a", "b"]);

        let mut vec = set.to_vec();
        vec.sort();
        assert_eq!(vec, vec!["a", "b"]);
    }

    #[test]
    fn extend_indexes_new_elements() {
        let mut set = string_set();
        set.extend(vec!["ab".to_string()]);
        assert_eq!(hits(&set, "len", 2i64), vec!["ab"]);
    }

    #[test]
    fn equality_ignores_registry_and_index() {
        let mut narrow = IndexedSet::<String>::resolve(&["trim", "len"]).unwrap();
        let mut wide = IndexedSet::<String>::resolve(&["trim", "len", "is_empty"]).unwrap();
        narrow.insert("a".to_string());
        wide.insert("a".to_string());

        assert_eq!(narrow, wide);
        assert!(!narrow.equals_comparing_indexes(&wide));
    }

    #[test]
    fn equals_comparing_indexes_requires_identical_buckets() {
        let mut a = string_set();
        let mut b = string_set();
        a.insert("x".to_string());
        b.insert_unindexed("x".to_string());

        assert_eq!(a, b);
        assert!(!a.equals_comparing_indexes(&b));

        b.reindex();
        assert!(a.equals_comparing_indexes(&b));
    }

    #[test]
    fn clone_is_independent_both_ways() {
        let mut original = string_set();
        original.insert("Hello World".to_string());

        let mut copy = original.clone();
        assert_eq!(original, copy);
        assert!(original.equals_comparing_indexes(&copy));

        copy.insert("123abc".to_string());
        assert_ne!(original, copy);
        assert!(!original.equals_comparing_indexes(&copy));

        let mut copy = original.clone();
        original.remove(&"Hello World".to_string());
        assert!(copy.contains(&"Hello World".to_string()));
        assert_eq!(hits(&copy, "trim", "Hello World"), vec!["Hello World"]);
        copy.clear();
        assert!(!original.contains(&"Hello World".to_string()));
    }

    #[test]
    fn to_json_is_deterministic_and_canonical() {
        let mut set = string_set();
        set.insert("Hello World  ".to_string());
        set.insert("abc123".to_string());

        let expected = concat!(
            "{\"elements\":[\"abc123\",\"Hello World  \"],",
            "\"index\":{",
            "\"trim\":{\"abc123\":[\"abc123\"],\"Hello World\":[\"Hello World  \"]},",
            "\"len\":{\"6\":[\"abc123\"],\"13\":[\"Hello World  \"]}",
            "}}"
        );
        assert_eq!(set.to_json(), expected);
        // Rendering twice gives the same text.
        assert_eq!(set.to_json(), expected);
    }

    #[test]
    fn to_json_empty_set_lists_registered_extractors() {
        let set = string_set();
        assert_eq!(
            set.to_json(),
            "{\"elements\":[],\"index\":{\"trim\":{},\"len\":{}}}"
        );
    }

    #[test]
    fn to_json_pretty_shape() {
        let mut set = IndexedSet::<String>::resolve(&["len"]).unwrap();
        set.insert("ab".to_string());
        let expected = concat!(
            "{\n",
            "  \"elements\": [\n    \"ab\"\n  ],\n",
            "  \"index\": {\n",
            "    \"len\": {\n",
            "      \"2\": [\n        \"ab\"\n      ]\n",
            "    }\n",
            "  }\n",
            "}"
        );
        assert_eq!(set.to_json_pretty(), expected);
    }

    #[test]
    fn to_text_dump() {
        let mut set = IndexedSet::<String>::resolve(&["len"]).unwrap();
        set.insert("ab".to_string());
        set.insert("c".to_string());
        let expected = "elements: \"c\",\"ab\"\nindex:\n  len:\n    1: \"c\"\n    2: \"ab\"\n";
        assert_eq!(set.to_text(), expected);
    }

    proptest! {
        #[test]
        fn membership_tracks_a_plain_hash_set(
            ops in prop::collection::vec(
                (prop::bool::ANY, prop::bool::ANY, "[a-d]{0,3}"),
                0..64,
            )
        ) {
            let mut set = string_set();
            let mut model: HashSet<String> = HashSet::new();

            for (is_insert, indexed, word) in ops {
                if is_insert {
                    if indexed {
                        prop_assert_eq!(set.insert(word.clone()), model.insert(word));
                    } else {
                        prop_assert_eq!(set.insert_unindexed(word.clone()), model.insert(word));
                    }
                } else {
                    prop_assert_eq!(set.remove(&word), model.remove(&word));
                }
            }

            prop_assert_eq!(set.len(), model.len());
            for word in &model {
                prop_assert!(set.contains(word));
            }
        }

        #[test]
        fn reindex_reproduces_fully_indexed_state(
            words in prop::collection::hash_set("[a-f ]{0,6}", 0..32)
        ) {
            let mut indexed = string_set();
            let mut lazy = string_set();

            for word in &words {
                indexed.insert(word.clone());
                lazy.insert_unindexed(word.clone());
            }

            if words.is_empty() {
                prop_assert!(indexed.equals_comparing_indexes(&lazy));
            } else {
                prop_assert!(!indexed.equals_comparing_indexes(&lazy));
            }
            lazy.reindex();
            prop_assert!(indexed.equals_comparing_indexes(&lazy));

            indexed.clear_index();
            indexed.reindex();
            prop_assert!(indexed.equals_comparing_indexes(&lazy));
        }
    }
}
