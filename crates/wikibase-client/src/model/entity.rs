//! Items and properties: the two entity kinds of the data model.

use serde_json::json;
use tracing::debug;

use crate::api::ApiError;
use crate::client::Client;
use crate::codec::record::{EntityRecord, SearchRecord, record_error};
use crate::error::{EditError, Error, SearchError, UnmarshalError, ValidationError};
use crate::model::{
    Aliases, Claims, DataType, Descriptions, EntityId, EntityKind, Labels, Value,
};

/// An item, fully loaded from the service.
///
/// Items only exist with an ID: they are obtained through [`Item::create`]
/// or [`Item::get`]. A bare ID reached through a decoded statement value is
/// a [`Value::Entity`] stub instead; fetch it to get an `Item`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: EntityId,
    pub label: Labels,
    pub description: Descriptions,
    pub aliases: Aliases,
    pub claims: Claims,
}

impl Item {
    /// Creates a new item with a label in the client's language.
    pub fn create(client: &Client, label: &str) -> Result<Item, Error> {
        let content = label_content(client.language(), label);
        let record = create_entity(client, EntityKind::Item, &content)?;
        Item::from_record(record)
    }

    /// Fetches an item by ID.
    pub fn get(client: &Client, id: EntityId) -> Result<Item, Error> {
        if !id.is_item() {
            return Err(ValidationError::NotAnItem { id }.into());
        }
        Item::from_record(fetch_entity(client, id)?)
    }

    /// Searches items by label in the client's language. Zero hits is an
    /// empty result, not an error.
    pub fn search(client: &Client, label: &str) -> Result<Vec<SearchRecord>, Error> {
        search_entities(client, label, EntityKind::Item)
    }

    /// Deletes the item from the service.
    pub fn delete(self, client: &Client) -> Result<(), Error> {
        delete_entity(client, self.id)
    }

    /// This item as a statement value (a reference by ID).
    pub fn as_value(&self) -> Value {
        Value::Entity(self.id)
    }

    fn from_record(record: EntityRecord) -> Result<Item, Error> {
        let id = record.id;
        if !id.is_item() {
            return Err(ValidationError::NotAnItem { id }.into());
        }
        Ok(Item {
            id,
            label: Labels::from_terms(id, &record.labels),
            description: Descriptions::from_terms(id, &record.descriptions),
            aliases: Aliases::from_terms(id, &record.aliases),
            claims: Claims::from_record_map(id, &record.claims)?,
        })
    }
}

/// A property, either fully loaded or a local reference.
///
/// `data_type` is the declared value type of the property's claims; it
/// gates what values may be stored under it. References built with
/// [`Property::reference`] carry no data type until one is supplied or the
/// property is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: EntityId,
    pub data_type: Option<DataType>,
    pub label: Labels,
    pub description: Descriptions,
    pub aliases: Aliases,
    pub claims: Claims,
}

impl Property {
    /// A local reference to a property by ID, with no terms or claims.
    pub fn reference(id: EntityId) -> Result<Property, ValidationError> {
        if !id.is_property() {
            return Err(ValidationError::NotAProperty { id });
        }
        Ok(Property {
            id,
            data_type: None,
            label: Labels::empty(id),
            description: Descriptions::empty(id),
            aliases: Aliases::empty(id),
            claims: Claims::empty(id),
        })
    }

    /// Sets the declared data type on a local reference.
    pub fn with_data_type(mut self, data_type: DataType) -> Property {
        self.data_type = Some(data_type);
        self
    }

    /// Creates a new property with a label in the client's language and the
    /// given value data type.
    pub fn create(client: &Client, label: &str, data_type: DataType) -> Result<Property, Error> {
        let mut content = label_content(client.language(), label);
        content["datatype"] = json!(data_type.discriminator());
        let record = create_entity(client, EntityKind::Property, &content)?;
        Property::from_record(record)
    }

    /// Fetches a property by ID.
    pub fn get(client: &Client, id: EntityId) -> Result<Property, Error> {
        if !id.is_property() {
            return Err(ValidationError::NotAProperty { id }.into());
        }
        Property::from_record(fetch_entity(client, id)?)
    }

    /// Searches properties by label in the client's language. Zero hits is
    /// an empty result, not an error.
    pub fn search(client: &Client, label: &str) -> Result<Vec<SearchRecord>, Error> {
        search_entities(client, label, EntityKind::Property)
    }

    /// Deletes the property from the service.
    pub fn delete(self, client: &Client) -> Result<(), Error> {
        delete_entity(client, self.id)
    }

    /// This property as a statement value (a reference by ID).
    pub fn as_value(&self) -> Value {
        Value::Entity(self.id)
    }

    fn from_record(record: EntityRecord) -> Result<Property, Error> {
        let id = record.id;
        if !id.is_property() {
            return Err(ValidationError::NotAProperty { id }.into());
        }
        let data_type = match &record.datatype {
            None => None,
            Some(discriminator) => Some(
                DataType::from_discriminator(discriminator).ok_or_else(|| {
                    UnmarshalError::UnsupportedDataType {
                        data_type: discriminator.clone(),
                    }
                })?,
            ),
        };
        Ok(Property {
            id,
            data_type,
            label: Labels::from_terms(id, &record.labels),
            description: Descriptions::from_terms(id, &record.descriptions),
            aliases: Aliases::from_terms(id, &record.aliases),
            claims: Claims::from_record_map(id, &record.claims)?,
        })
    }
}

/// Builds the `wbeditentity` content for a fresh entity with one label.
fn label_content(language: &str, label: &str) -> serde_json::Value {
    let mut labels = serde_json::Map::new();
    labels.insert(
        language.to_owned(),
        json!({ "language": language, "value": label }),
    );
    json!({ "labels": labels })
}

fn create_entity(
    client: &Client,
    kind: EntityKind,
    content: &serde_json::Value,
) -> Result<EntityRecord, Error> {
    let response = client
        .api()
        .entity_add(kind, content)
        .map_err(|e| EditError::from_api("create entity", e))?;
    let entity = response.get("entity").ok_or(EditError::UnexpectedResponse {
        operation: "create entity",
        field: "entity",
    })?;
    let record: EntityRecord = serde_json::from_value(entity.clone())
        .map_err(|e| record_error("entity record", e))?;
    debug!(entity_id = %record.id, kind = %kind, "created entity");
    Ok(record)
}

/// Fetches one entity record. Absence of `success` or a `missing` marker on
/// the entity means "not found".
fn fetch_entity(client: &Client, id: EntityId) -> Result<EntityRecord, Error> {
    let response = client
        .api()
        .entity_get(id)
        .map_err(|source| SearchError::Failed { source })?;

    if response.get("success").and_then(serde_json::Value::as_i64) != Some(1) {
        return Err(not_found(id));
    }
    let entity = response
        .get("entities")
        .and_then(|entities| entities.get(id.to_string()))
        .ok_or_else(|| not_found(id))?;
    if entity.get("missing").is_some() {
        return Err(not_found(id));
    }

    serde_json::from_value(entity.clone())
        .map_err(|e| record_error("entity record", e).into())
}

fn not_found(id: EntityId) -> Error {
    SearchError::NotFound {
        kind: id.kind(),
        id: id.to_string(),
    }
    .into()
}

fn delete_entity(client: &Client, id: EntityId) -> Result<(), Error> {
    let response = client
        .api()
        .entity_remove(&id.title())
        .map_err(|e| EditError::from_api("delete entity", e))?;

    if response.get("delete").is_none() || response.get("error").is_some() {
        return Err(EditError::UnexpectedResponse {
            operation: "delete entity",
            field: "delete",
        }
        .into());
    }
    debug!(entity_id = %id, "deleted entity");
    Ok(())
}

fn search_entities(
    client: &Client,
    label: &str,
    kind: EntityKind,
) -> Result<Vec<SearchRecord>, Error> {
    let response = client
        .api()
        .entity_search(label, client.language(), kind)
        .map_err(|source| SearchError::Failed { source })?;

    let hits = response.get("search").ok_or_else(|| SearchError::Failed {
        source: ApiError::new(None, "response is missing the \"search\" field"),
    })?;
    serde_json::from_value(hits.clone())
        .map_err(|e| record_error("search results", e).into())
}
