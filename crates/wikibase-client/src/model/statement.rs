//! Shared machinery for statement collections.
//!
//! Claims, qualifiers, and references all live in per-owner bucket maps
//! keyed by property ID. [`StatementMap`] holds the bucketing invariant: a
//! property key is present iff its bucket is non-empty, and insertion order
//! within a bucket equals call order. No order is guaranteed across
//! properties.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::EntityId;

/// The three snak kinds of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakType {
    /// The statement carries a concrete value.
    Value,
    /// The property is known to have no value.
    NoValue,
    /// The property has some unknown value.
    SomeValue,
}

impl SnakType {
    pub fn as_str(self) -> &'static str {
        match self {
            SnakType::Value => "value",
            SnakType::NoValue => "novalue",
            SnakType::SomeValue => "somevalue",
        }
    }
}

impl fmt::Display for SnakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Preferred,
    Normal,
    Deprecated,
}

/// A statement-like object with an identity and an owning property.
pub trait Statement {
    /// The statement's own identity (claim GUID or snak hash).
    fn statement_id(&self) -> &str;

    /// The property this statement is stored under.
    fn property_id(&self) -> EntityId;
}

/// Bucket map from property ID to an ordered sequence of statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct StatementMap<T> {
    buckets: FxHashMap<EntityId, Vec<T>>,
}

impl<T: Statement> StatementMap<T> {
    pub(crate) fn new() -> StatementMap<T> {
        StatementMap {
            buckets: FxHashMap::default(),
        }
    }

    /// Appends a statement to its property's bucket and returns a reference
    /// to the stored value.
    pub(crate) fn insert(&mut self, statement: T) -> &T {
        let bucket = self.buckets.entry(statement.property_id()).or_default();
        bucket.push(statement);
        &bucket[bucket.len() - 1]
    }

    /// Returns whether a statement with the given identity is stored under
    /// the given property.
    pub(crate) fn contains(&self, property_id: EntityId, statement_id: &str) -> bool {
        self.buckets
            .get(&property_id)
            .is_some_and(|bucket| bucket.iter().any(|s| s.statement_id() == statement_id))
    }

    /// Removes a statement by identity, pruning the bucket if it empties.
    pub(crate) fn remove(&mut self, property_id: EntityId, statement_id: &str) -> Option<T> {
        let bucket = self.buckets.get_mut(&property_id)?;
        let index = bucket.iter().position(|s| s.statement_id() == statement_id)?;
        let removed = bucket.remove(index);
        if bucket.is_empty() {
            self.buckets.remove(&property_id);
        }
        Some(removed)
    }

    pub(crate) fn get(&self, property_id: EntityId) -> &[T] {
        self.buckets
            .get(&property_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mutable lookup by identity, for in-place value updates.
    pub(crate) fn get_mut(&mut self, property_id: EntityId, statement_id: &str) -> Option<&mut T> {
        self.buckets
            .get_mut(&property_id)?
            .iter_mut()
            .find(|s| s.statement_id() == statement_id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten()
    }

    pub(crate) fn buckets(&self) -> &FxHashMap<EntityId, Vec<T>> {
        &self.buckets
    }

    /// Flattens the buckets into one sequence. FxHashMap iteration is
    /// unseeded, so the order is stable for a fixed insertion history, but
    /// nothing is guaranteed across properties.
    pub(crate) fn to_list(&self) -> Vec<&T> {
        self.buckets.values().flatten().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
