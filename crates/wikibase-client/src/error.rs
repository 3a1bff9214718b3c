//! Error types for snak decoding/encoding, validation, and remote edits.

use thiserror::Error;

use crate::api::ApiError;
use crate::model::{DataType, EntityId, EntityKind};

/// An entity ID that does not match the `Q<digits>` / `P<digits>` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed entity ID {id:?}: expected \"Q\" or \"P\" followed by digits")]
pub struct MalformedEntityId {
    pub id: String,
}

/// Error while decoding a wire-format snak or entity record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnmarshalError {
    #[error("no decoder for data type {data_type:?}")]
    UnsupportedDataType { data_type: String },

    #[error("snak is missing required field {field:?}")]
    MissingField { field: &'static str },

    #[error("malformed {context}: {detail}")]
    MalformedValue {
        context: &'static str,
        detail: String,
    },

    #[error(transparent)]
    EntityId(#[from] MalformedEntityId),
}

/// Error while encoding a value into its wire-format payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarshalError {
    #[error("no encoder for values of data type {data_type:?}")]
    UnsupportedValueType { data_type: &'static str },

    #[error("quantity amount is not a finite number")]
    NonFiniteAmount,

    #[error("quantity unit {id} is not an item")]
    UnitNotAnItem { id: EntityId },

    #[error("latitude {lat} out of range [-90, +90]")]
    LatitudeOutOfRange { lat: f64 },

    #[error("longitude {lon} out of range [-180, +180]")]
    LongitudeOutOfRange { lon: f64 },

    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,
}

/// Error raised by parameter and type checks before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    EntityId(#[from] MalformedEntityId),

    #[error("value type mismatch for property {property}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        property: EntityId,
        expected: DataType,
        actual: DataType,
    },

    #[error("property {property} has no declared data type; fetch it before adding values")]
    MissingDataType { property: EntityId },

    #[error("entity ID {id} does not name a property")]
    NotAProperty { id: EntityId },

    #[error("entity ID {id} does not name an item")]
    NotAnItem { id: EntityId },

    #[error("{kind} {id:?} is not part of this collection")]
    UnknownStatement { kind: &'static str, id: String },
}

/// A remote mutating call failed or returned an unexpected response shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("could not {operation}: {source}")]
    Rejected {
        operation: &'static str,
        source: ApiError,
    },

    #[error("could not {operation}: conflicts with an existing entity ({source})")]
    Duplicate {
        operation: &'static str,
        source: ApiError,
    },

    #[error("could not {operation}: response is missing the {field:?} field")]
    UnexpectedResponse {
        operation: &'static str,
        field: &'static str,
    },
}

impl EditError {
    /// Wraps a transport error, refining label/description uniqueness
    /// conflicts into [`EditError::Duplicate`].
    pub(crate) fn from_api(operation: &'static str, source: ApiError) -> EditError {
        if source.code.as_deref() == Some("modification-failed") {
            EditError::Duplicate { operation, source }
        } else {
            EditError::Rejected { operation, source }
        }
    }
}

/// A remote read or search call failed, or a fetch found no matching entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("no {kind} found with entity ID {id:?}")]
    NotFound { kind: EntityKind, id: String },

    #[error("search failed: {source}")]
    Failed { source: ApiError },
}

/// Any error surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Unmarshal(#[from] UnmarshalError),

    #[error(transparent)]
    Marshal(#[from] MarshalError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<MalformedEntityId> for Error {
    fn from(err: MalformedEntityId) -> Error {
        Error::Validation(ValidationError::EntityId(err))
    }
}
