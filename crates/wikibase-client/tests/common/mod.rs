//! Scripted in-memory transport for exercising the object model without a
//! live Wikibase instance.

// Each integration test binary compiles its own copy of this module and
// uses a different subset of the helpers.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::json;
use wikibase_client::{
    ApiClient, ApiError, ApiResult, Client, Config, EntityId, EntityKind, SnakType,
};

#[derive(Default)]
struct State {
    responses: VecDeque<ApiResult>,
    calls: Vec<String>,
}

/// A transport double: responses are scripted in call order, and every call
/// is recorded so tests can assert that validation failures never reach the
/// network.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Rc<RefCell<State>>,
}

impl MockApi {
    pub fn new() -> MockApi {
        MockApi::default()
    }

    /// Scripts the next response.
    pub fn push(&self, response: serde_json::Value) {
        self.state.borrow_mut().responses.push_back(Ok(response));
    }

    /// Scripts the next call to fail at the transport level.
    pub fn push_error(&self, code: Option<&str>, message: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Err(ApiError::new(code, message)));
    }

    /// The calls issued so far, as `"method:detail"` strings.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn next(&self, call: String) -> ApiResult {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::new(None, "no scripted response")))
    }
}

impl ApiClient for MockApi {
    fn entity_add(&self, entity_type: EntityKind, _content: &serde_json::Value) -> ApiResult {
        self.next(format!("entity_add:{entity_type}"))
    }

    fn entity_get(&self, entity_id: EntityId) -> ApiResult {
        self.next(format!("entity_get:{entity_id}"))
    }

    fn entity_remove(&self, title: &str) -> ApiResult {
        self.next(format!("entity_remove:{title}"))
    }

    fn entity_search(&self, label: &str, language: &str, entity_type: EntityKind) -> ApiResult {
        self.next(format!("entity_search:{entity_type}:{language}:{label}"))
    }

    fn claim_add(
        &self,
        item_id: EntityId,
        property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!("claim_add:{item_id}:{property_id}:{snak_type}"))
    }

    fn claim_update(
        &self,
        claim_id: &str,
        _property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!("claim_update:{claim_id}:{snak_type}"))
    }

    fn claim_remove(&self, claim_id: &str) -> ApiResult {
        self.next(format!("claim_remove:{claim_id}"))
    }

    fn qualifier_add(
        &self,
        claim_id: &str,
        property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!("qualifier_add:{claim_id}:{property_id}:{snak_type}"))
    }

    fn qualifier_update(
        &self,
        claim_id: &str,
        qualifier_id: &str,
        _property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!(
            "qualifier_update:{claim_id}:{qualifier_id}:{snak_type}"
        ))
    }

    fn qualifier_remove(&self, claim_id: &str, qualifier_id: &str) -> ApiResult {
        self.next(format!("qualifier_remove:{claim_id}:{qualifier_id}"))
    }

    fn reference_add(
        &self,
        claim_id: &str,
        property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!("reference_add:{claim_id}:{property_id}:{snak_type}"))
    }

    fn reference_update(
        &self,
        claim_id: &str,
        reference_id: &str,
        _property_id: EntityId,
        _value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult {
        self.next(format!(
            "reference_update:{claim_id}:{reference_id}:{snak_type}"
        ))
    }

    fn reference_remove(&self, claim_id: &str, reference_id: &str) -> ApiResult {
        self.next(format!("reference_remove:{claim_id}:{reference_id}"))
    }

    fn label_set(&self, entity_id: EntityId, label: &str, language: &str) -> ApiResult {
        self.next(format!("label_set:{entity_id}:{language}:{label}"))
    }

    fn description_set(&self, entity_id: EntityId, description: &str, language: &str) -> ApiResult {
        self.next(format!("description_set:{entity_id}:{language}:{description}"))
    }

    fn alias_add(&self, entity_id: EntityId, alias: &str, language: &str) -> ApiResult {
        self.next(format!("alias_add:{entity_id}:{language}:{alias}"))
    }

    fn alias_remove(&self, entity_id: EntityId, alias: &str, language: &str) -> ApiResult {
        self.next(format!("alias_remove:{entity_id}:{language}:{alias}"))
    }
}

/// A client over a clone of the given mock, with default configuration.
pub fn client(api: &MockApi) -> Client {
    Client::new(api.clone(), Config::default())
}

/// A `wbcreateclaim`-style response for a claim with a value snak.
pub fn claim_response(
    claim_id: &str,
    property: &str,
    datatype: &str,
    datavalue: serde_json::Value,
) -> serde_json::Value {
    json!({
        "claim": {
            "id": claim_id,
            "rank": "normal",
            "mainsnak": {
                "snaktype": "value",
                "property": property,
                "datatype": datatype,
                "datavalue": { "value": datavalue, "type": datatype },
            },
        },
    })
}

/// A `wbcreateclaim`-style response for a no-value/some-value claim.
pub fn marker_claim_response(claim_id: &str, property: &str, snaktype: &str) -> serde_json::Value {
    json!({
        "claim": {
            "id": claim_id,
            "rank": "normal",
            "mainsnak": { "snaktype": snaktype, "property": property },
        },
    })
}
