//! Letter-prefixed numeric identifiers for Wikibase entities.
//!
//! Every entity is identified by an uppercase kind prefix (`Q` for items,
//! `P` for properties) followed by decimal digits. IDs are validated at
//! parse time; a held [`EntityId`] is always well-formed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MalformedEntityId;

/// The two entity kinds of the Wikibase data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Property,
}

impl EntityKind {
    /// Returns the kind name used by the API (`"item"` / `"property"`).
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Property => "property",
        }
    }

    /// Returns the ID prefix letter for this kind.
    pub fn prefix(self) -> char {
        match self {
            EntityKind::Item => 'Q',
            EntityKind::Property => 'P',
        }
    }

    /// Returns the page-title namespace for this kind (`"Item"` / `"Property"`).
    pub fn namespace(self) -> &'static str {
        match self {
            EntityKind::Item => "Item",
            EntityKind::Property => "Property",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated entity identifier (`Q42`, `P31`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    kind: EntityKind,
    number: u64,
}

impl EntityId {
    /// Creates an ID from its kind and numeric part.
    pub fn new(kind: EntityKind, number: u64) -> EntityId {
        EntityId { kind, number }
    }

    /// Creates an item ID (`Q<number>`).
    pub fn item(number: u64) -> EntityId {
        EntityId::new(EntityKind::Item, number)
    }

    /// Creates a property ID (`P<number>`).
    pub fn property(number: u64) -> EntityId {
        EntityId::new(EntityKind::Property, number)
    }

    pub fn kind(self) -> EntityKind {
        self.kind
    }

    /// Returns the numeric part of the ID (the digits after the prefix).
    pub fn number(self) -> u64 {
        self.number
    }

    pub fn is_item(self) -> bool {
        self.kind == EntityKind::Item
    }

    pub fn is_property(self) -> bool {
        self.kind == EntityKind::Property
    }

    /// Returns the page title for this entity (`"Item:Q42"`).
    pub fn title(self) -> String {
        format!("{}:{}", self.kind.namespace(), self)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.number)
    }
}

impl FromStr for EntityId {
    type Err = MalformedEntityId;

    fn from_str(s: &str) -> Result<EntityId, MalformedEntityId> {
        let malformed = || MalformedEntityId { id: s.to_owned() };

        let mut chars = s.chars();
        let kind = match chars.next() {
            Some('Q') => EntityKind::Item,
            Some('P') => EntityKind::Property,
            _ => return Err(malformed()),
        };

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let number = digits.parse::<u64>().map_err(|_| malformed())?;

        Ok(EntityId { kind, number })
    }
}

impl TryFrom<String> for EntityId {
    type Error = MalformedEntityId;

    fn try_from(s: String) -> Result<EntityId, MalformedEntityId> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.to_string()
    }
}
