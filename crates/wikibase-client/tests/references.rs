//! Reference collection behavior against a scripted transport.

mod common;

use common::{MockApi, client};
use serde_json::json;
use wikibase_client::{
    DataType, EditError, EntityId, Error, ExternalId, Property, References, SnakType, Value,
};

const CLAIM_ID: &str = "Q1$claim";

fn external_id_prop(id: u64) -> Property {
    Property::reference(EntityId::property(id))
        .unwrap()
        .with_data_type(DataType::ExternalId)
}

fn empty_references() -> References {
    References::unmarshal(CLAIM_ID, &json!([])).unwrap()
}

fn reference_added_response(property: &str, hash: &str, id: &str) -> serde_json::Value {
    json!({
        "reference": {
            "hash": hash,
            "snaks": {
                property: [{
                    "snaktype": "value",
                    "property": property,
                    "datatype": "external-id",
                    "datavalue": { "value": id, "type": "string" },
                }],
            },
            "snaks-order": [property],
        },
    })
}

#[test]
fn test_unmarshal_reads_first_snak_only() {
    let references = References::unmarshal(
        CLAIM_ID,
        &json!([{
            "hash": "r1",
            "snaks": {
                "P4": [
                    { "snaktype": "value", "property": "P4",
                      "datavalue": { "value": "first", "type": "string" } },
                    { "snaktype": "value", "property": "P4",
                      "datavalue": { "value": "second", "type": "string" } },
                ],
                "P9": [
                    { "snaktype": "value", "property": "P9",
                      "datavalue": { "value": "other", "type": "string" } },
                ],
            },
            "snaks-order": ["P4", "P9"],
        }]),
    )
    .unwrap();

    // Single-snak model: only the first property's first snak survives.
    assert_eq!(references.len(), 1);
    let reference = references.to_list()[0];
    assert_eq!(reference.reference_id, "r1");
    assert_eq!(reference.property.id, EntityId::property(4));
    assert_eq!(reference.value, Some(Value::String("first".to_owned())));
}

#[test]
fn test_add_reads_reference_from_response() {
    let api = MockApi::new();
    let client = client(&api);
    let mut references = empty_references();

    api.push(reference_added_response("P4", "r1", "ID123"));
    let reference = references
        .add(&client, &external_id_prop(4), ExternalId::new("ID123"))
        .unwrap();
    assert_eq!(reference.reference_id, "r1");
    assert_eq!(
        reference.value,
        Some(Value::ExternalId(ExternalId::new("ID123")))
    );
    assert_eq!(api.calls(), [format!("reference_add:{CLAIM_ID}:P4:value")]);
}

#[test]
fn test_add_no_value_marker() {
    let api = MockApi::new();
    let client = client(&api);
    let mut references = empty_references();

    api.push(json!({
        "reference": {
            "hash": "r1",
            "snaks": { "P4": [{ "snaktype": "novalue", "property": "P4" }] },
            "snaks-order": ["P4"],
        },
    }));
    let reference = references
        .add_no_value(&client, &external_id_prop(4))
        .unwrap();
    assert_eq!(reference.snak_type, SnakType::NoValue);
    assert!(reference.value.is_none());
}

#[test]
fn test_remove_prunes_empty_bucket() {
    let api = MockApi::new();
    let client = client(&api);
    let mut references = empty_references();

    api.push(reference_added_response("P4", "r1", "ID123"));
    let reference = references
        .add(&client, &external_id_prop(4), ExternalId::new("ID123"))
        .unwrap()
        .clone();

    api.push(json!({ "success": 1 }));
    references.remove(&client, &reference).unwrap();
    assert!(references.is_empty());
    assert!(!references.to_dict().contains_key(&EntityId::property(4)));
}

#[test]
fn test_remove_after_failed_remote_call_keeps_reference() {
    let api = MockApi::new();
    let client = client(&api);
    let mut references = empty_references();

    api.push(reference_added_response("P4", "r1", "ID123"));
    let reference = references
        .add(&client, &external_id_prop(4), ExternalId::new("ID123"))
        .unwrap()
        .clone();

    api.push_error(None, "backend down");
    let err = references.remove(&client, &reference).unwrap_err();
    assert!(matches!(err, Error::Edit(EditError::Rejected { .. })));
    assert_eq!(references.to_list().len(), 1);
}

#[test]
fn test_set_value_updates_in_place() {
    let api = MockApi::new();
    let client = client(&api);
    let mut references = empty_references();

    api.push(reference_added_response("P4", "r1", "ID123"));
    references
        .add(&client, &external_id_prop(4), ExternalId::new("ID123"))
        .unwrap();

    let reference = references.get_mut(EntityId::property(4), "r1").unwrap();
    api.push(json!({ "reference": {} }));
    reference
        .set_value(&client, ExternalId::new("ID456"))
        .unwrap();
    assert_eq!(
        reference.value,
        Some(Value::ExternalId(ExternalId::new("ID456")))
    );

    api.push_error(None, "backend down");
    assert!(reference.set_value(&client, ExternalId::new("lost")).is_err());
    assert_eq!(
        reference.value,
        Some(Value::ExternalId(ExternalId::new("ID456")))
    );
}
