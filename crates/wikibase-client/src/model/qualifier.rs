//! Qualifiers: claim-scoped modifier statements.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::client::Client;
use crate::codec::record::record_error;
use crate::codec::snak::{Snak, decode_snak_value};
use crate::codec::value::encode_value;
use crate::error::{EditError, Error, UnmarshalError, ValidationError};
use crate::model::statement::{Statement, StatementMap};
use crate::model::{EntityId, Property, SnakType, Value};
use crate::validate::check_value_type;

/// A qualifier on a claim.
///
/// Identity is the snak hash minted by the service, not a sequential GUID.
#[derive(Debug, Clone)]
pub struct Qualifier {
    /// Snak hash assigned by the service.
    pub qualifier_id: String,
    /// The claim this qualifier is attached to.
    pub claim_id: String,
    pub property: Property,
    pub snak_type: SnakType,
    pub value: Option<Value>,
}

impl PartialEq for Qualifier {
    fn eq(&self, other: &Qualifier) -> bool {
        self.qualifier_id == other.qualifier_id
    }
}

impl Statement for Qualifier {
    fn statement_id(&self) -> &str {
        &self.qualifier_id
    }

    fn property_id(&self) -> EntityId {
        self.property.id
    }
}

impl Qualifier {
    /// Decodes a qualifier snak from a server response. Pure.
    pub fn unmarshal(claim_id: &str, record: &serde_json::Value) -> Result<Qualifier, Error> {
        let snak: Snak = serde_json::from_value(record.clone())
            .map_err(|e| record_error("qualifier snak", e))?;
        let qualifier_id = snak
            .hash
            .clone()
            .ok_or(UnmarshalError::MissingField { field: "hash" })?;

        let value = decode_snak_value(&snak)?;
        let mut property = Property::reference(snak.property)?;
        property.data_type = snak
            .data_type()
            .or_else(|| value.as_ref().map(Value::data_type));

        Ok(Qualifier {
            qualifier_id,
            claim_id: claim_id.to_owned(),
            property,
            snak_type: snak.snaktype,
            value,
        })
    }

    /// Replaces this qualifier's value, remotely then locally.
    ///
    /// The service re-hashes updated snaks; the stored `qualifier_id` keeps
    /// the pre-update hash until the owning entity is fetched again.
    pub fn set_value(&mut self, client: &Client, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        check_value_type(&value, &self.property)?;
        let payload = encode_value(&value, client.config())?;

        client
            .api()
            .qualifier_update(
                &self.claim_id,
                &self.qualifier_id,
                self.property.id,
                Some(&payload),
                SnakType::Value,
            )
            .map_err(|e| EditError::from_api("update qualifier value", e))?;

        debug!(qualifier_id = %self.qualifier_id, "updated qualifier value");
        self.snak_type = SnakType::Value;
        self.value = Some(value);
        Ok(())
    }

    /// Marks this qualifier as having no value, remotely then locally.
    pub fn set_no_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::NoValue)
    }

    /// Marks this qualifier as having some unspecified value, remotely then
    /// locally.
    pub fn set_some_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::SomeValue)
    }

    fn set_marker(&mut self, client: &Client, snak_type: SnakType) -> Result<(), Error> {
        client
            .api()
            .qualifier_update(
                &self.claim_id,
                &self.qualifier_id,
                self.property.id,
                None,
                snak_type,
            )
            .map_err(|e| EditError::from_api("update qualifier value", e))?;

        debug!(qualifier_id = %self.qualifier_id, snak_type = %snak_type, "updated qualifier value");
        self.snak_type = snak_type;
        self.value = None;
        Ok(())
    }
}

/// The qualifiers of one claim, bucketed by property.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifiers {
    claim_id: String,
    map: StatementMap<Qualifier>,
}

impl Qualifiers {
    pub(crate) fn empty(claim_id: &str) -> Qualifiers {
        Qualifiers {
            claim_id: claim_id.to_owned(),
            map: StatementMap::new(),
        }
    }

    /// Decodes the per-property qualifier grouping of a claim record. Pure.
    pub fn unmarshal(claim_id: &str, qualifiers: &serde_json::Value) -> Result<Qualifiers, Error> {
        let records: FxHashMap<String, Vec<serde_json::Value>> =
            serde_json::from_value(qualifiers.clone())
                .map_err(|e| record_error("qualifiers grouping", e))?;
        Qualifiers::from_record_map(claim_id, &records)
    }

    pub(crate) fn from_record_map(
        claim_id: &str,
        records: &FxHashMap<String, Vec<serde_json::Value>>,
    ) -> Result<Qualifiers, Error> {
        let mut qualifiers = Qualifiers::empty(claim_id);
        for record in records.values().flatten() {
            let qualifier = Qualifier::unmarshal(claim_id, record)?;
            qualifiers.map.insert(qualifier);
        }
        Ok(qualifiers)
    }

    /// Creates a qualifier with the given property and value.
    pub fn add(
        &mut self,
        client: &Client,
        property: &Property,
        value: impl Into<Value>,
    ) -> Result<&Qualifier, Error> {
        let value = value.into();
        check_value_type(&value, property)?;
        let payload = encode_value(&value, client.config())?;

        let response = client
            .api()
            .qualifier_add(&self.claim_id, property.id, Some(&payload), SnakType::Value)
            .map_err(|e| EditError::from_api("create qualifier", e))?;
        self.store_created(property.id, &response)
    }

    /// Creates a qualifier marking the property as having no value.
    pub fn add_no_value(
        &mut self,
        client: &Client,
        property: &Property,
    ) -> Result<&Qualifier, Error> {
        self.add_marker(client, property, SnakType::NoValue)
    }

    /// Creates a qualifier marking the property as having some unspecified
    /// value.
    pub fn add_some_value(
        &mut self,
        client: &Client,
        property: &Property,
    ) -> Result<&Qualifier, Error> {
        self.add_marker(client, property, SnakType::SomeValue)
    }

    fn add_marker(
        &mut self,
        client: &Client,
        property: &Property,
        snak_type: SnakType,
    ) -> Result<&Qualifier, Error> {
        let response = client
            .api()
            .qualifier_add(&self.claim_id, property.id, None, snak_type)
            .map_err(|e| EditError::from_api("create qualifier", e))?;
        self.store_created(property.id, &response)
    }

    /// The create response returns the whole claim; the new qualifier is
    /// the last entry under its property.
    fn store_created(
        &mut self,
        property_id: EntityId,
        response: &serde_json::Value,
    ) -> Result<&Qualifier, Error> {
        let record = response
            .get("claim")
            .and_then(|claim| claim.get("qualifiers"))
            .and_then(|qualifiers| qualifiers.get(property_id.to_string()))
            .and_then(|bucket| bucket.as_array())
            .and_then(|bucket| bucket.last())
            .ok_or(EditError::UnexpectedResponse {
                operation: "create qualifier",
                field: "qualifiers",
            })?;

        let qualifier = Qualifier::unmarshal(&self.claim_id, record)?;
        debug!(qualifier_id = %qualifier.qualifier_id, claim_id = %self.claim_id, "created qualifier");
        Ok(self.map.insert(qualifier))
    }

    /// Deletes a qualifier, remotely then locally. The property bucket is
    /// dropped when it empties.
    pub fn remove(&mut self, client: &Client, qualifier: &Qualifier) -> Result<(), Error> {
        let property_id = qualifier.property.id;
        if !self.map.contains(property_id, &qualifier.qualifier_id) {
            return Err(ValidationError::UnknownStatement {
                kind: "qualifier",
                id: qualifier.qualifier_id.clone(),
            }
            .into());
        }

        client
            .api()
            .qualifier_remove(&qualifier.claim_id, &qualifier.qualifier_id)
            .map_err(|e| EditError::from_api("remove qualifier", e))?;

        self.map.remove(property_id, &qualifier.qualifier_id);
        debug!(qualifier_id = %qualifier.qualifier_id, claim_id = %self.claim_id, "removed qualifier");
        Ok(())
    }

    /// The qualifiers under one property, in insertion order.
    pub fn get(&self, property_id: EntityId) -> &[Qualifier] {
        self.map.get(property_id)
    }

    /// Mutable lookup by snak hash, for in-place value updates.
    pub fn get_mut(&mut self, property_id: EntityId, qualifier_id: &str) -> Option<&mut Qualifier> {
        self.map.get_mut(property_id, qualifier_id)
    }

    /// All qualifiers as one flat sequence.
    pub fn to_list(&self) -> Vec<&Qualifier> {
        self.map.to_list()
    }

    /// The raw property-to-qualifiers mapping.
    pub fn to_dict(&self) -> &FxHashMap<EntityId, Vec<Qualifier>> {
        self.map.buckets()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
