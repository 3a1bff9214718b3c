//! Wire-format envelope records returned by the API.
//!
//! These are the serde shapes of the sub-trees the service sends back for
//! entities, claims, and references. The model layer decodes them into its
//! own types; nothing here issues network calls.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::codec::snak::Snak;
use crate::error::UnmarshalError;
use crate::model::{EntityId, Rank};

/// A claim record (`claims.<prop>[n]` in an entity, or the `claim` sub-tree
/// of a write response).
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRecord {
    pub id: String,
    pub rank: Rank,
    pub mainsnak: Snak,
    #[serde(default)]
    pub qualifiers: FxHashMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub references: Vec<serde_json::Value>,
}

/// A reference record: identity hash plus a per-property snak map.
///
/// `snaks-order` carries the service's property ordering for the map; JSON
/// objects alone don't preserve it.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRecord {
    pub hash: String,
    pub snaks: FxHashMap<String, Vec<Snak>>,
    #[serde(default, rename = "snaks-order")]
    pub snaks_order: Vec<String>,
}

impl ReferenceRecord {
    /// Returns the reference's main snak: the first snak of the first
    /// property, in `snaks-order` when present.
    ///
    /// The service allows several properties with several snaks each per
    /// reference; this model keeps the legacy single-snak view and reads
    /// only the first pair.
    pub fn main_snak(&self) -> Result<&Snak, UnmarshalError> {
        let first_property = self
            .snaks_order
            .first()
            .map(String::as_str)
            .or_else(|| self.snaks.keys().next().map(String::as_str))
            .ok_or(UnmarshalError::MissingField { field: "snaks" })?;

        self.snaks
            .get(first_property)
            .and_then(|snaks| snaks.first())
            .ok_or(UnmarshalError::MissingField { field: "snaks" })
    }
}

/// A term (label/description) in one language.
#[derive(Debug, Clone, Deserialize)]
pub struct TermRecord {
    pub language: String,
    pub value: String,
}

/// An entity record as returned by `wbgetentities` / `wbeditentity`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    #[serde(default)]
    pub labels: FxHashMap<String, TermRecord>,
    #[serde(default)]
    pub descriptions: FxHashMap<String, TermRecord>,
    #[serde(default)]
    pub aliases: FxHashMap<String, Vec<TermRecord>>,
    #[serde(default)]
    pub claims: FxHashMap<String, Vec<serde_json::Value>>,
    /// Declared value data type; properties only.
    #[serde(default)]
    pub datatype: Option<String>,
}

/// A single hit from `wbsearchentities`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRecord {
    pub id: EntityId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Converts a serde decode failure into an [`UnmarshalError`].
pub(crate) fn record_error(context: &'static str, err: serde_json::Error) -> UnmarshalError {
    UnmarshalError::MalformedValue {
        context,
        detail: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::SnakType;

    #[test]
    fn test_reference_main_snak_follows_snaks_order() {
        let record: ReferenceRecord = serde_json::from_value(json!({
            "hash": "abc123",
            "snaks": {
                "P2": [{ "snaktype": "novalue", "property": "P2" }],
                "P9": [{ "snaktype": "somevalue", "property": "P9" }],
            },
            "snaks-order": ["P9", "P2"],
        }))
        .unwrap();

        let snak = record.main_snak().unwrap();
        assert_eq!(snak.property, EntityId::property(9));
        assert_eq!(snak.snaktype, SnakType::SomeValue);
    }

    #[test]
    fn test_reference_without_snaks_is_malformed() {
        let record: ReferenceRecord = serde_json::from_value(json!({
            "hash": "abc123",
            "snaks": {},
        }))
        .unwrap();
        assert_eq!(
            record.main_snak().unwrap_err(),
            UnmarshalError::MissingField { field: "snaks" }
        );
    }

    #[test]
    fn test_entity_record_defaults() {
        let record: EntityRecord = serde_json::from_value(json!({ "id": "Q1" })).unwrap();
        assert!(record.labels.is_empty());
        assert!(record.claims.is_empty());
        assert!(record.datatype.is_none());
    }
}
