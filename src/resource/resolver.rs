//! Cross-reference resolution
//!
//! Some attributes are not present on the item being converted and have to be
//! stitched together from sibling collections. Resolution walks an ordered
//! list of tiers and the first tier producing a non-empty value wins:
//!
//! 1. [`MapTier`] - lookup in a [`CrossReferenceMap`] built from an auxiliary
//!    collection
//! 2. [`EmbeddedTier`] - first entry of an embedded/expanded sub-collection
//! 3. [`PropertyTier`] - a well-known key in the item's [`PropertyBag`]
//!
//! Nothing resolving is not an error, the attribute is just left out.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Lookup table from a key found on auxiliary items to those items' ids.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CrossReferenceMap {
    entries: HashMap<String, String>,
}

impl CrossReferenceMap {
    /// Build a map from an auxiliary collection.
    ///
    /// Items without a key or id are ignored. When two items share a key the
    /// later one wins.
    pub fn build<'a, A, K, I>(items: &'a [A], key: K, id: I) -> Self
    where
        K: Fn(&'a A) -> Option<&'a str>,
        I: Fn(&'a A) -> Option<&'a str>,
    {
        let entries = items
            .iter()
            .filter_map(|item| {
                let k = key(item).filter(|k| !k.is_empty())?;
                let v = id(item).filter(|v| !v.is_empty())?;
                Some((k.to_string(), v.to_string()))
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Open-ended properties the API returned but the typed models don't know.
///
/// Only readable through [`PropertyTier`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(HashMap<String, Value>);

impl PropertyBag {
    /// Stringify the value stored under `key`. Nulls count as missing.
    fn stringified(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<HashMap<String, Value>> for PropertyBag {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

/// Something with a remote identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

/// One source an attribute can be resolved from.
pub trait ResolutionTier<T> {
    /// Short label used in trace logs
    fn name(&self) -> &'static str;

    fn lookup(&self, item: &T) -> Option<String>;
}

/// Look the item up in a prebuilt [`CrossReferenceMap`].
pub struct MapTier<'m, T> {
    map: &'m CrossReferenceMap,
    key: fn(&T) -> Option<&str>,
}

impl<'m, T> MapTier<'m, T> {
    pub fn new(map: &'m CrossReferenceMap, key: fn(&T) -> Option<&str>) -> Self {
        Self { map, key }
    }
}

impl<T> ResolutionTier<T> for MapTier<'_, T> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn lookup(&self, item: &T) -> Option<String> {
        let key = (self.key)(item)?;
        self.map.get(key).map(str::to_string)
    }
}

/// Take the id of the first entry in an embedded sub-collection.
pub struct EmbeddedTier<T, R> {
    collection: fn(&T) -> Option<&[R]>,
}

impl<T, R> EmbeddedTier<T, R> {
    pub fn new(collection: fn(&T) -> Option<&[R]>) -> Self {
        Self { collection }
    }
}

impl<T, R: Identified> ResolutionTier<T> for EmbeddedTier<T, R> {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn lookup(&self, item: &T) -> Option<String> {
        (self.collection)(item)?
            .first()
            .map(|entry| entry.id().to_string())
    }
}

/// Read a well-known key from the item's [`PropertyBag`].
pub struct PropertyTier<T> {
    bag: fn(&T) -> &PropertyBag,
    key: &'static str,
}

impl<T> PropertyTier<T> {
    pub fn new(bag: fn(&T) -> &PropertyBag, key: &'static str) -> Self {
        Self { bag, key }
    }
}

impl<T> ResolutionTier<T> for PropertyTier<T> {
    fn name(&self) -> &'static str {
        "property"
    }

    fn lookup(&self, item: &T) -> Option<String> {
        (self.bag)(item).stringified(self.key)
    }
}

/// Resolve an attribute through `tiers` in order.
///
/// Empty strings are treated like a miss so a later tier still gets a chance.
pub fn resolve<T>(item: &T, tiers: &[&dyn ResolutionTier<T>]) -> Option<String> {
    tiers.iter().find_map(|tier| {
        let value = tier.lookup(item).filter(|v| !v.is_empty())?;
        tracing::trace!("resolved via {} tier: {}", tier.name(), value);
        Some(value)
    })
}
