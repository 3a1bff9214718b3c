//! Entity lifecycle and term behavior against a scripted transport.

mod common;

use common::{MockApi, client};
use serde_json::json;
use wikibase_client::{
    DataType, EditError, EntityId, Error, Item, Property, SearchError, ValidationError,
};

fn created_item_response(id: &str, label: &str) -> serde_json::Value {
    json!({
        "entity": {
            "id": id,
            "labels": { "en": { "language": "en", "value": label } },
        },
    })
}

#[test]
fn test_create_item() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Test item"));
    let item = Item::create(&client, "Test item").unwrap();
    assert_eq!(item.id, EntityId::item(5));
    assert_eq!(item.label.get("en"), Some("Test item"));
    assert!(item.claims.is_empty());
    assert_eq!(api.calls(), ["entity_add:item"]);
}

#[test]
fn test_create_property_with_data_type() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(json!({
        "entity": {
            "id": "P2",
            "labels": { "en": { "language": "en", "value": "Test property" } },
            "datatype": "quantity",
        },
    }));
    let prop = Property::create(&client, "Test property", DataType::Quantity).unwrap();
    assert_eq!(prop.id, EntityId::property(2));
    assert_eq!(prop.data_type, Some(DataType::Quantity));
}

#[test]
fn test_get_item_populates_claims() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(json!({
        "success": 1,
        "entities": {
            "Q5": {
                "id": "Q5",
                "labels": { "en": { "language": "en", "value": "Test item" } },
                "descriptions": { "en": { "language": "en", "value": "A thing" } },
                "aliases": { "en": [{ "language": "en", "value": "Thing" }] },
                "claims": {
                    "P1": [{
                        "id": "Q5$abc",
                        "rank": "normal",
                        "mainsnak": {
                            "snaktype": "value",
                            "property": "P1",
                            "datatype": "string",
                            "datavalue": { "value": "x", "type": "string" },
                        },
                    }],
                },
            },
        },
    }));

    let item = Item::get(&client, EntityId::item(5)).unwrap();
    assert_eq!(item.description.get("en"), Some("A thing"));
    assert_eq!(item.aliases.get("en"), ["Thing".to_owned()]);
    assert_eq!(item.claims.len(), 1);
    assert_eq!(item.claims.to_list()[0].claim_id, "Q5$abc");
}

#[test]
fn test_get_item_rejects_property_id() {
    let api = MockApi::new();
    let client = client(&api);

    let err = Item::get(&client, EntityId::property(1)).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NotAnItem { .. })
    ));
    assert!(api.calls().is_empty());
}

#[test]
fn test_get_missing_entity_is_not_found() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(json!({
        "success": 1,
        "entities": { "Q9": { "id": "Q9", "missing": "" } },
    }));
    let err = Item::get(&client, EntityId::item(9)).unwrap_err();
    assert!(matches!(err, Error::Search(SearchError::NotFound { .. })));

    api.push(json!({}));
    let err = Item::get(&client, EntityId::item(9)).unwrap_err();
    assert!(matches!(err, Error::Search(SearchError::NotFound { .. })));
}

#[test]
fn test_delete_checks_response_shape() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Test item"));
    let item = Item::create(&client, "Test item").unwrap();
    api.push(json!({ "delete": { "title": "Item:Q5" } }));
    item.delete(&client).unwrap();
    assert_eq!(api.calls()[1], "entity_remove:Item:Q5");

    api.push(created_item_response("Q6", "Test item"));
    let item = Item::create(&client, "Test item").unwrap();
    api.push(json!({}));
    let err = item.delete(&client).unwrap_err();
    assert!(matches!(
        err,
        Error::Edit(EditError::UnexpectedResponse { field: "delete", .. })
    ));
}

#[test]
fn test_search_returns_hits_and_tolerates_zero() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(json!({
        "search": [
            { "id": "Q5", "label": "Test item" },
            { "id": "Q6", "label": "Test item 2" },
        ],
    }));
    let hits = Item::search(&client, "Test item").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, EntityId::item(5));
    assert_eq!(hits[0].label.as_deref(), Some("Test item"));

    // Zero results is a valid empty outcome, not an error.
    api.push(json!({ "search": [] }));
    assert!(Item::search(&client, "nothing").unwrap().is_empty());

    api.push_error(None, "network unreachable");
    let err = Item::search(&client, "Test item").unwrap_err();
    assert!(matches!(err, Error::Search(SearchError::Failed { .. })));
}

#[test]
fn test_label_set_confirms_and_updates() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Old"));
    let mut item = Item::create(&client, "Old").unwrap();

    api.push(json!({
        "success": 1,
        "entity": { "labels": { "en": { "language": "en", "value": "New" } } },
    }));
    item.label.set(&client, "New", None).unwrap();
    assert_eq!(item.label.get("en"), Some("New"));
}

#[test]
fn test_label_set_rejects_unconfirmed_response() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Old"));
    let mut item = Item::create(&client, "Old").unwrap();

    api.push(json!({ "success": 1, "entity": { "labels": {} } }));
    let err = item.label.set(&client, "New", None).unwrap_err();
    assert!(matches!(
        err,
        Error::Edit(EditError::UnexpectedResponse { field: "labels", .. })
    ));
    assert_eq!(item.label.get("en"), Some("Old"));
}

#[test]
fn test_duplicate_label_conflict_is_refined() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Old"));
    let mut item = Item::create(&client, "Old").unwrap();

    api.push_error(
        Some("modification-failed"),
        "Item Q6 already has label \"New\"",
    );
    let err = item.label.set(&client, "New", None).unwrap_err();
    assert!(matches!(err, Error::Edit(EditError::Duplicate { .. })));
    assert_eq!(item.label.get("en"), Some("Old"));
}

#[test]
fn test_alias_add_refreshes_from_response() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Test item"));
    let mut item = Item::create(&client, "Test item").unwrap();

    api.push(json!({
        "success": 1,
        "entity": {
            "aliases": { "en": [
                { "language": "en", "value": "Alias A" },
                { "language": "en", "value": "Alias B" },
            ]},
        },
    }));
    item.aliases.add(&client, "Alias B", None).unwrap();
    assert_eq!(
        item.aliases.get("en"),
        ["Alias A".to_owned(), "Alias B".to_owned()]
    );

    api.push(json!({ "success": 1 }));
    item.aliases.remove(&client, "Alias A", None).unwrap();
    assert_eq!(item.aliases.get("en"), ["Alias B".to_owned()]);
}

#[test]
fn test_description_set_updates_locally() {
    let api = MockApi::new();
    let client = client(&api);

    api.push(created_item_response("Q5", "Test item"));
    let mut item = Item::create(&client, "Test item").unwrap();

    api.push(json!({
        "success": 1,
        "entity": { "descriptions": { "en": { "language": "en", "value": "A thing" } } },
    }));
    item.description.set(&client, "A thing", None).unwrap();
    assert_eq!(item.description.get("en"), Some("A thing"));
}
