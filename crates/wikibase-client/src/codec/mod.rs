//! JSON wire-format encoding/decoding.
//!
//! This module converts between the service's snak format and the typed
//! value model. All functions are pure; network I/O lives behind
//! [`crate::api::ApiClient`].

pub mod record;
pub mod snak;
pub mod value;

pub use record::{ClaimRecord, EntityRecord, ReferenceRecord, SearchRecord, TermRecord};
pub use snak::{DataValue, Snak, decode_snak_value};
pub use value::encode_value;
