//! Extractor descriptors and the immutable registry.

use crate::error::{CoreError, CoreResult};
use facetset_json::Value;
use std::any::type_name;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Bound alias for element types stored in an indexed set.
///
/// Elements must support value equality and hashing (inventory membership
/// and bucket membership are both by value), and cloning (buckets hold
/// equal-by-value copies of inventory elements).
pub trait Element: Clone + Eq + Hash + 'static {}

impl<T: Clone + Eq + Hash + 'static> Element for T {}

type DeriveFn<T> = Arc<dyn Fn(&T) -> Option<Value> + Send + Sync>;

/// A named, zero-argument derivation from an element to a [`Value`].
///
/// Derivation is explicitly fallible: returning `None` means the element
/// produces nothing under this extractor, and the indexing step omits it
/// from this extractor's buckets without raising anything.
///
/// # Example
///
/// ```
/// use facetset_core::Extractor;
///
/// let len = Extractor::new("len", |s: &String| s.len() as i64);
/// assert_eq!(len.derive(&"abc".to_string()), Some(3i64.into()));
///
/// let parsed = Extractor::fallible("parsed", |s: &String| s.parse::<i64>().ok());
/// assert_eq!(parsed.derive(&"oops".to_string()), None);
/// ```
pub struct Extractor<T> {
    name: String,
    derive: DeriveFn<T>,
}

impl<T> Extractor<T> {
    /// Creates an extractor from an infallible derivation.
    pub fn new<V, F>(name: impl Into<String>, derive: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            derive: Arc::new(move |element| Some(derive(element).into())),
        }
    }

    /// Creates an extractor whose derivation may fail.
    pub fn fallible<V, F>(name: impl Into<String>, derive: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            derive: Arc::new(move |element| derive(element).map(Into::into)),
        }
    }

    /// Returns the extractor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the derivation against an element.
    pub fn derive(&self, element: &T) -> Option<Value> {
        (self.derive)(element)
    }

    /// Returns true if `other` is the same descriptor: same name and the
    /// same underlying derivation function.
    pub fn same_spec(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.derive, &other.derive)
    }
}

impl<T> Clone for Extractor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            derive: Arc::clone(&self.derive),
        }
    }
}

impl<T> fmt::Debug for Extractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").field("name", &self.name).finish()
    }
}

/// An element type that publishes its indexable accessors.
///
/// Implementing this enables name-based registry construction
/// ([`ExtractorSet::resolve`]), auto-discovery ([`ExtractorSet::discover`])
/// and snapshot import, all of which bind extractors by name.
pub trait Indexable: Element {
    /// Every accessor of this type that is eligible for indexing.
    fn accessors() -> Vec<Extractor<Self>>;
}

impl Indexable for String {
    fn accessors() -> Vec<Extractor<Self>> {
        vec![
            Extractor::new("trim", |s: &String| s.trim().to_string()),
            Extractor::new("len", |s: &String| s.len() as i64),
            Extractor::new("is_empty", |s: &String| s.is_empty()),
            Extractor::new("to_lowercase", |s: &String| s.to_lowercase()),
            Extractor::new("to_uppercase", |s: &String| s.to_uppercase()),
        ]
    }
}

/// The immutable set of extractors an indexed set indexes by.
///
/// Fixed at construction; every constructor validates the whole set and
/// fails without producing an instance if validation fails.
pub struct ExtractorSet<T> {
    extractors: Vec<Extractor<T>>,
}

impl<T> ExtractorSet<T> {
    /// Builds a registry from an explicit collection of extractors.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyExtractors`] if the collection is empty,
    /// [`CoreError::DuplicateExtractor`] if two extractors share a name.
    pub fn from_extractors<I>(extractors: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Extractor<T>>,
    {
        let extractors: Vec<_> = extractors.into_iter().collect();
        if extractors.is_empty() {
            return Err(CoreError::EmptyExtractors);
        }
        let mut seen = HashSet::new();
        for extractor in &extractors {
            if !seen.insert(extractor.name().to_string()) {
                return Err(CoreError::duplicate_extractor(extractor.name()));
            }
        }
        Ok(Self { extractors })
    }

    /// Returns the number of registered extractors (always at least one).
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Returns true if no extractors are registered.
    ///
    /// Never true for a successfully constructed registry; provided for
    /// completeness of the collection surface.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Iterates the extractors in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Extractor<T>> {
        self.extractors.iter()
    }

    /// Iterates the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extractors.iter().map(Extractor::name)
    }

    /// Looks up an extractor by name.
    pub fn get(&self, name: &str) -> Option<&Extractor<T>> {
        self.extractors.iter().find(|ex| ex.name() == name)
    }

    /// Returns true if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if this exact descriptor is registered — same name and
    /// same derivation function, not merely a name collision.
    pub fn contains_spec(&self, extractor: &Extractor<T>) -> bool {
        self.get(extractor.name())
            .is_some_and(|registered| registered.same_spec(extractor))
    }
}

impl<T: Indexable> ExtractorSet<T> {
    /// Resolves a list of names against the element type's accessors.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnresolvedExtractor`] for any name the element type does
    /// not publish, plus the [`ExtractorSet::from_extractors`] errors.
    pub fn resolve(names: &[&str]) -> CoreResult<Self> {
        let available = T::accessors();
        let mut chosen = Vec::with_capacity(names.len());
        for &name in names {
            match available.iter().find(|ex| ex.name() == name) {
                Some(extractor) => chosen.push(extractor.clone()),
                None => {
                    return Err(CoreError::unresolved_extractor(name, type_name::<T>()));
                }
            }
        }
        Self::from_extractors(chosen)
    }

    /// Builds a registry from every accessor the element type publishes.
    ///
    /// # Errors
    ///
    /// The [`ExtractorSet::from_extractors`] errors; in particular an
    /// element type publishing no accessors is a configuration error.
    pub fn discover() -> CoreResult<Self> {
        Self::from_extractors(T::accessors())
    }
}

impl<T> Clone for ExtractorSet<T> {
    fn clone(&self) -> Self {
        Self {
            extractors: self.extractors.clone(),
        }
    }
}

// Names are the persistent identity of extractors (import re-resolves by
// name), so registry equality compares name sets, not function pointers.
impl<T> PartialEq for ExtractorSet<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.extractors.len() != other.extractors.len() {
            return false;
        }
        self.names().all(|name| other.contains(name))
    }
}

impl<T> Eq for ExtractorSet<T> {}

impl<T> fmt::Debug for ExtractorSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
