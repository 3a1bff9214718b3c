//! Claims: statements attached to an entity.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::client::Client;
use crate::codec::record::{ClaimRecord, record_error};
use crate::codec::snak::decode_snak_value;
use crate::codec::value::encode_value;
use crate::error::{EditError, Error, ValidationError};
use crate::model::statement::{Statement, StatementMap};
use crate::model::{
    EntityId, Property, Qualifiers, Rank, References, SnakType, Value,
};
use crate::validate::check_value_type;

/// A statement on an item: a property plus a value or an explicit
/// no-value/some-value marker.
///
/// `value` is present iff `snak_type` is [`SnakType::Value`]. Claims are
/// created by decoding a server response, either from a full entity fetch
/// or through [`Claims::add`]; they never exist outside their owning
/// collection.
#[derive(Debug, Clone)]
pub struct Claim {
    /// Claim GUID assigned by the service.
    pub claim_id: String,
    /// The item this claim is attached to.
    pub item_id: EntityId,
    /// The claim's property, with the data type inferred from the snak.
    pub property: Property,
    pub rank: Rank,
    pub snak_type: SnakType,
    pub value: Option<Value>,
    pub qualifiers: Qualifiers,
    pub references: References,
}

// Claim identity is its GUID.
impl PartialEq for Claim {
    fn eq(&self, other: &Claim) -> bool {
        self.claim_id == other.claim_id
    }
}

impl Statement for Claim {
    fn statement_id(&self) -> &str {
        &self.claim_id
    }

    fn property_id(&self) -> EntityId {
        self.property.id
    }
}

impl Claim {
    /// Decodes a claim record from a server response. Pure.
    pub fn unmarshal(item_id: EntityId, record: &serde_json::Value) -> Result<Claim, Error> {
        let record: ClaimRecord = serde_json::from_value(record.clone())
            .map_err(|e| record_error("claim record", e))?;

        let value = decode_snak_value(&record.mainsnak)?;
        let mut property = Property::reference(record.mainsnak.property)?;
        property.data_type = record
            .mainsnak
            .data_type()
            .or_else(|| value.as_ref().map(Value::data_type));

        let qualifiers = Qualifiers::from_record_map(&record.id, &record.qualifiers)?;
        let references = References::from_records(&record.id, &record.references)?;

        Ok(Claim {
            claim_id: record.id,
            item_id,
            property,
            rank: record.rank,
            snak_type: record.mainsnak.snaktype,
            value,
            qualifiers,
            references,
        })
    }

    /// Replaces this claim's value, remotely then locally.
    pub fn set_value(&mut self, client: &Client, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        check_value_type(&value, &self.property)?;
        let payload = encode_value(&value, client.config())?;

        client
            .api()
            .claim_update(&self.claim_id, self.property.id, Some(&payload), SnakType::Value)
            .map_err(|e| EditError::from_api("update claim value", e))?;

        debug!(claim_id = %self.claim_id, "updated claim value");
        self.snak_type = SnakType::Value;
        self.value = Some(value);
        Ok(())
    }

    /// Marks this claim as having no value, remotely then locally.
    pub fn set_no_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::NoValue)
    }

    /// Marks this claim as having some unspecified value, remotely then
    /// locally.
    pub fn set_some_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::SomeValue)
    }

    fn set_marker(&mut self, client: &Client, snak_type: SnakType) -> Result<(), Error> {
        client
            .api()
            .claim_update(&self.claim_id, self.property.id, None, snak_type)
            .map_err(|e| EditError::from_api("update claim value", e))?;

        debug!(claim_id = %self.claim_id, snak_type = %snak_type, "updated claim value");
        self.snak_type = snak_type;
        self.value = None;
        Ok(())
    }
}

/// The claims of one item, bucketed by property.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    item_id: EntityId,
    map: StatementMap<Claim>,
}

impl Claims {
    pub(crate) fn empty(item_id: EntityId) -> Claims {
        Claims {
            item_id,
            map: StatementMap::new(),
        }
    }

    /// Decodes the per-property claim grouping of an entity record. Pure.
    pub fn unmarshal(item_id: EntityId, claims: &serde_json::Value) -> Result<Claims, Error> {
        let records: FxHashMap<String, Vec<serde_json::Value>> =
            serde_json::from_value(claims.clone())
                .map_err(|e| record_error("claims grouping", e))?;
        Claims::from_record_map(item_id, &records)
    }

    pub(crate) fn from_record_map(
        item_id: EntityId,
        records: &FxHashMap<String, Vec<serde_json::Value>>,
    ) -> Result<Claims, Error> {
        let mut claims = Claims::empty(item_id);
        for record in records.values().flatten() {
            let claim = Claim::unmarshal(item_id, record)?;
            claims.map.insert(claim);
        }
        Ok(claims)
    }

    /// Creates a claim with the given property and value.
    pub fn add(
        &mut self,
        client: &Client,
        property: &Property,
        value: impl Into<Value>,
    ) -> Result<&Claim, Error> {
        let value = value.into();
        check_value_type(&value, property)?;
        let payload = encode_value(&value, client.config())?;

        let response = client
            .api()
            .claim_add(self.item_id, property.id, Some(&payload), SnakType::Value)
            .map_err(|e| EditError::from_api("create claim", e))?;
        self.store_created(&response)
    }

    /// Creates a claim marking the property as having no value.
    pub fn add_no_value(&mut self, client: &Client, property: &Property) -> Result<&Claim, Error> {
        self.add_marker(client, property, SnakType::NoValue)
    }

    /// Creates a claim marking the property as having some unspecified
    /// value.
    pub fn add_some_value(
        &mut self,
        client: &Client,
        property: &Property,
    ) -> Result<&Claim, Error> {
        self.add_marker(client, property, SnakType::SomeValue)
    }

    fn add_marker(
        &mut self,
        client: &Client,
        property: &Property,
        snak_type: SnakType,
    ) -> Result<&Claim, Error> {
        let response = client
            .api()
            .claim_add(self.item_id, property.id, None, snak_type)
            .map_err(|e| EditError::from_api("create claim", e))?;
        self.store_created(&response)
    }

    fn store_created(&mut self, response: &serde_json::Value) -> Result<&Claim, Error> {
        let record = response.get("claim").ok_or(EditError::UnexpectedResponse {
            operation: "create claim",
            field: "claim",
        })?;
        let claim = Claim::unmarshal(self.item_id, record)?;
        debug!(claim_id = %claim.claim_id, item_id = %self.item_id, "created claim");
        Ok(self.map.insert(claim))
    }

    /// Deletes a claim, remotely then locally. The property bucket is
    /// dropped when it empties.
    pub fn remove(&mut self, client: &Client, claim: &Claim) -> Result<(), Error> {
        let property_id = claim.property.id;
        if !self.map.contains(property_id, &claim.claim_id) {
            return Err(ValidationError::UnknownStatement {
                kind: "claim",
                id: claim.claim_id.clone(),
            }
            .into());
        }

        client
            .api()
            .claim_remove(&claim.claim_id)
            .map_err(|e| EditError::from_api("remove claim", e))?;

        self.map.remove(property_id, &claim.claim_id);
        debug!(claim_id = %claim.claim_id, item_id = %self.item_id, "removed claim");
        Ok(())
    }

    /// The claims under one property, in insertion order.
    pub fn get(&self, property_id: EntityId) -> &[Claim] {
        self.map.get(property_id)
    }

    /// Mutable lookup by claim GUID, for in-place updates and qualifier or
    /// reference edits.
    pub fn get_mut(&mut self, property_id: EntityId, claim_id: &str) -> Option<&mut Claim> {
        self.map.get_mut(property_id, claim_id)
    }

    /// All claims as one flat sequence.
    pub fn to_list(&self) -> Vec<&Claim> {
        self.map.to_list()
    }

    /// The raw property-to-claims mapping.
    pub fn to_dict(&self) -> &FxHashMap<EntityId, Vec<Claim>> {
        self.map.buckets()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
