//! Transport interface to a Wikibase API endpoint.
//!
//! This crate models the remote service as a synchronous request/response
//! collaborator: one trait method per API module operation, each returning
//! the decoded JSON body or a transport-level [`ApiError`]. Authentication,
//! retries, and timeouts belong to the trait implementation, not to the
//! object model built on top of it.

use crate::model::{EntityId, EntityKind, SnakType};

/// Error reported by the transport for a failed API call.
///
/// `code` carries the service's machine-readable error code when the request
/// reached the API (e.g. `"modification-failed"`); it is `None` for purely
/// network-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(code: Option<&str>, message: impl Into<String>) -> ApiError {
        ApiError {
            code: code.map(str::to_owned),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result of a single API call.
pub type ApiResult = Result<serde_json::Value, ApiError>;

/// Synchronous Wikibase API transport.
///
/// Every method issues one blocking request and returns the decoded JSON
/// response. Write operations return the updated sub-tree needed to refresh
/// local state (`{"claim": ...}`, `{"reference": ...}`, `{"entity": ...}`).
pub trait ApiClient {
    // === Entities ===

    /// `wbeditentity` (create): returns `{"entity": {...}}`.
    fn entity_add(&self, entity_type: EntityKind, content: &serde_json::Value) -> ApiResult;

    /// `wbgetentities`: returns `{"success": 1, "entities": {id: {...}}}`.
    fn entity_get(&self, entity_id: EntityId) -> ApiResult;

    /// `delete` by page title (`"Item:Q1"` / `"Property:P1"`).
    fn entity_remove(&self, title: &str) -> ApiResult;

    /// `wbsearchentities`: returns `{"search": [{id, label, ...}, ...]}`.
    fn entity_search(&self, label: &str, language: &str, entity_type: EntityKind) -> ApiResult;

    // === Claims ===

    /// `wbcreateclaim`: returns `{"claim": {...}}`.
    fn claim_add(
        &self,
        item_id: EntityId,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbsetclaim`: returns `{"claim": {...}}`.
    fn claim_update(
        &self,
        claim_id: &str,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbremoveclaims` for a single claim.
    fn claim_remove(&self, claim_id: &str) -> ApiResult;

    // === Qualifiers ===

    /// `wbsetqualifier` (create): returns `{"claim": {...}}` with the
    /// updated qualifier map.
    fn qualifier_add(
        &self,
        claim_id: &str,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbsetqualifier` (update by snak hash): returns `{"claim": {...}}`.
    fn qualifier_update(
        &self,
        claim_id: &str,
        qualifier_id: &str,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbremovequalifiers` for a single qualifier.
    fn qualifier_remove(&self, claim_id: &str, qualifier_id: &str) -> ApiResult;

    // === References ===

    /// `wbsetreference` (create): returns `{"reference": {...}}`.
    fn reference_add(
        &self,
        claim_id: &str,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbsetreference` (update by reference hash): returns
    /// `{"reference": {...}}`.
    fn reference_update(
        &self,
        claim_id: &str,
        reference_id: &str,
        property_id: EntityId,
        value: Option<&serde_json::Value>,
        snak_type: SnakType,
    ) -> ApiResult;

    /// `wbremovereferences` for a single reference.
    fn reference_remove(&self, claim_id: &str, reference_id: &str) -> ApiResult;

    // === Terms ===

    /// `wbsetlabel`: returns `{"success": 1, "entity": {"labels": ...}}`.
    fn label_set(&self, entity_id: EntityId, label: &str, language: &str) -> ApiResult;

    /// `wbsetdescription`: returns `{"success": 1, "entity": {"descriptions": ...}}`.
    fn description_set(&self, entity_id: EntityId, description: &str, language: &str) -> ApiResult;

    /// `wbsetaliases` (add): returns `{"success": 1, "entity": {"aliases": ...}}`.
    fn alias_add(&self, entity_id: EntityId, alias: &str, language: &str) -> ApiResult;

    /// `wbsetaliases` (remove): returns `{"success": 1, "entity": {"aliases": ...}}`.
    fn alias_remove(&self, entity_id: EntityId, alias: &str, language: &str) -> ApiResult;
}
