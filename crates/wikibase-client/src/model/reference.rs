//! References: claim-scoped citation statements.

use rustc_hash::FxHashMap;
use serde_json::json;
use tracing::debug;

use crate::client::Client;
use crate::codec::record::{ReferenceRecord, record_error};
use crate::codec::snak::decode_snak_value;
use crate::codec::value::encode_value;
use crate::error::{EditError, Error, UnmarshalError, ValidationError};
use crate::model::statement::{Statement, StatementMap};
use crate::model::{EntityId, Property, SnakType, Value};
use crate::validate::check_value_type;

/// A reference on a claim.
///
/// The wire record nests its snaks in a per-property map; this model keeps
/// the legacy single-snak view and represents a reference by its first
/// property/snak pair (see [`ReferenceRecord::main_snak`]).
#[derive(Debug, Clone)]
pub struct Reference {
    /// Reference hash assigned by the service.
    pub reference_id: String,
    /// The claim this reference is attached to.
    pub claim_id: String,
    pub property: Property,
    pub snak_type: SnakType,
    pub value: Option<Value>,
}

impl PartialEq for Reference {
    fn eq(&self, other: &Reference) -> bool {
        self.reference_id == other.reference_id
    }
}

impl Statement for Reference {
    fn statement_id(&self) -> &str {
        &self.reference_id
    }

    fn property_id(&self) -> EntityId {
        self.property.id
    }
}

impl Reference {
    /// Decodes a reference record from a server response. Pure.
    pub fn unmarshal(claim_id: &str, record: &serde_json::Value) -> Result<Reference, Error> {
        let record: ReferenceRecord = serde_json::from_value(record.clone())
            .map_err(|e| record_error("reference record", e))?;
        let snak = record.main_snak()?.clone();

        let value = decode_snak_value(&snak)?;
        let mut property = Property::reference(snak.property)?;
        property.data_type = snak
            .data_type()
            .or_else(|| value.as_ref().map(Value::data_type));

        Ok(Reference {
            reference_id: record.hash,
            claim_id: claim_id.to_owned(),
            property,
            snak_type: snak.snaktype,
            value,
        })
    }

    /// Replaces this reference's value, remotely then locally.
    ///
    /// The service re-hashes updated references; the stored `reference_id`
    /// keeps the pre-update hash until the owning entity is fetched again.
    pub fn set_value(&mut self, client: &Client, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        check_value_type(&value, &self.property)?;
        let payload = typed_payload(&value, client)?;

        client
            .api()
            .reference_update(
                &self.claim_id,
                &self.reference_id,
                self.property.id,
                Some(&payload),
                SnakType::Value,
            )
            .map_err(|e| EditError::from_api("update reference value", e))?;

        debug!(reference_id = %self.reference_id, "updated reference value");
        self.snak_type = SnakType::Value;
        self.value = Some(value);
        Ok(())
    }

    /// Marks this reference as having no value, remotely then locally.
    pub fn set_no_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::NoValue)
    }

    /// Marks this reference as having some unspecified value, remotely then
    /// locally.
    pub fn set_some_value(&mut self, client: &Client) -> Result<(), Error> {
        self.set_marker(client, SnakType::SomeValue)
    }

    fn set_marker(&mut self, client: &Client, snak_type: SnakType) -> Result<(), Error> {
        client
            .api()
            .reference_update(
                &self.claim_id,
                &self.reference_id,
                self.property.id,
                None,
                snak_type,
            )
            .map_err(|e| EditError::from_api("update reference value", e))?;

        debug!(reference_id = %self.reference_id, snak_type = %snak_type, "updated reference value");
        self.snak_type = snak_type;
        self.value = None;
        Ok(())
    }
}

/// The references of one claim, bucketed by property.
#[derive(Debug, Clone, PartialEq)]
pub struct References {
    claim_id: String,
    map: StatementMap<Reference>,
}

impl References {
    pub(crate) fn empty(claim_id: &str) -> References {
        References {
            claim_id: claim_id.to_owned(),
            map: StatementMap::new(),
        }
    }

    /// Decodes the reference list of a claim record. Pure. The service
    /// returns references as a JSON array, unlike the qualifier grouping.
    pub fn unmarshal(claim_id: &str, references: &serde_json::Value) -> Result<References, Error> {
        let records = references.as_array().ok_or(UnmarshalError::MalformedValue {
            context: "references",
            detail: "expected a JSON array".to_owned(),
        })?;
        References::from_records(claim_id, records)
    }

    pub(crate) fn from_records(
        claim_id: &str,
        records: &[serde_json::Value],
    ) -> Result<References, Error> {
        let mut references = References::empty(claim_id);
        for record in records {
            let reference = Reference::unmarshal(claim_id, record)?;
            references.map.insert(reference);
        }
        Ok(references)
    }

    /// Creates a reference with the given property and value.
    pub fn add(
        &mut self,
        client: &Client,
        property: &Property,
        value: impl Into<Value>,
    ) -> Result<&Reference, Error> {
        let value = value.into();
        check_value_type(&value, property)?;
        let payload = typed_payload(&value, client)?;

        let response = client
            .api()
            .reference_add(&self.claim_id, property.id, Some(&payload), SnakType::Value)
            .map_err(|e| EditError::from_api("create reference", e))?;
        self.store_created(&response)
    }

    /// Creates a reference marking the property as having no value.
    pub fn add_no_value(
        &mut self,
        client: &Client,
        property: &Property,
    ) -> Result<&Reference, Error> {
        self.add_marker(client, property, SnakType::NoValue)
    }

    /// Creates a reference marking the property as having some unspecified
    /// value.
    pub fn add_some_value(
        &mut self,
        client: &Client,
        property: &Property,
    ) -> Result<&Reference, Error> {
        self.add_marker(client, property, SnakType::SomeValue)
    }

    fn add_marker(
        &mut self,
        client: &Client,
        property: &Property,
        snak_type: SnakType,
    ) -> Result<&Reference, Error> {
        let response = client
            .api()
            .reference_add(&self.claim_id, property.id, None, snak_type)
            .map_err(|e| EditError::from_api("create reference", e))?;
        self.store_created(&response)
    }

    fn store_created(&mut self, response: &serde_json::Value) -> Result<&Reference, Error> {
        let record = response
            .get("reference")
            .ok_or(EditError::UnexpectedResponse {
                operation: "create reference",
                field: "reference",
            })?;
        let reference = Reference::unmarshal(&self.claim_id, record)?;
        debug!(reference_id = %reference.reference_id, claim_id = %self.claim_id, "created reference");
        Ok(self.map.insert(reference))
    }

    /// Deletes a reference, remotely then locally. The property bucket is
    /// dropped when it empties.
    pub fn remove(&mut self, client: &Client, reference: &Reference) -> Result<(), Error> {
        let property_id = reference.property.id;
        if !self.map.contains(property_id, &reference.reference_id) {
            return Err(ValidationError::UnknownStatement {
                kind: "reference",
                id: reference.reference_id.clone(),
            }
            .into());
        }

        client
            .api()
            .reference_remove(&reference.claim_id, &reference.reference_id)
            .map_err(|e| EditError::from_api("remove reference", e))?;

        self.map.remove(property_id, &reference.reference_id);
        debug!(reference_id = %reference.reference_id, claim_id = %self.claim_id, "removed reference");
        Ok(())
    }

    /// The references under one property, in insertion order.
    pub fn get(&self, property_id: EntityId) -> &[Reference] {
        self.map.get(property_id)
    }

    /// Mutable lookup by reference hash, for in-place value updates.
    pub fn get_mut(&mut self, property_id: EntityId, reference_id: &str) -> Option<&mut Reference> {
        self.map.get_mut(property_id, reference_id)
    }

    /// All references as one flat sequence.
    pub fn to_list(&self) -> Vec<&Reference> {
        self.map.to_list()
    }

    /// The raw property-to-references mapping.
    pub fn to_dict(&self) -> &FxHashMap<EntityId, Vec<Reference>> {
        self.map.buckets()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Reference snaks carry the discriminator alongside the value on the wire.
fn typed_payload(value: &Value, client: &Client) -> Result<serde_json::Value, Error> {
    let payload = encode_value(value, client.config())?;
    Ok(json!({
        "type": value.data_type().discriminator(),
        "value": payload,
    }))
}

