//! Insertion-ordered set keyed by string id.
//!
//! # Responsibility
//! - Hold reference data attached to boards and cards (members, labels,
//!   dependencies) with mechanical "no duplicate id" enforcement.
//!
//! # Invariants
//! - At most one element per id.
//! - Iteration order is first-insertion order.
//! - Deserialization keeps the first element of every id and drops later
//!   duplicates instead of failing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Elements that carry a stable identity.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Ordered set of `T` unique by [`Keyed::key`].
#[derive(Debug, Clone)]
pub struct IdSet<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for IdSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> IdSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless its id is already present.
    ///
    /// Returns `true` when the set grew.
    pub fn insert(&mut self, value: T) -> bool {
        if self.index.contains_key(value.key()) {
            return false;
        }
        self.index.insert(value.key().to_string(), self.items.len());
        self.items.push(value);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Removes the element with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let position = self.index.remove(id)?;
        let removed = self.items.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Returns `true` when any element id is in `ids`.
    pub fn intersects<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().any(|id| self.contains(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Keyed::key)
    }
}

impl<T> IdSet<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for IdSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> FromIterator<T> for IdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Keyed> From<Vec<T>> for IdSet<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a IdSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for IdSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for IdSet<T>
where
    T: Deserialize<'de> + Keyed,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
