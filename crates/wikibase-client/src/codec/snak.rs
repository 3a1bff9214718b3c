//! Snak decoding: the tagged dispatch from wire discriminators to typed
//! values.
//!
//! A snak is the wire-format unit pairing one property with a value (or an
//! explicit no-value/some-value marker). The `datatype` discriminator
//! selects the decoder; the mapping is a closed table with a single
//! fallback that rejects unknown or unsupported discriminators by name.

use serde::Deserialize;

use crate::codec::value::{
    decode_entity_ref, decode_external_id, decode_globe_coordinate, decode_monolingual_text,
    decode_quantity, decode_string,
};
use crate::error::UnmarshalError;
use crate::model::{DataType, EntityId, SnakType, Value};

/// The `datavalue` envelope of a snak.
#[derive(Debug, Clone, Deserialize)]
pub struct DataValue {
    pub value: serde_json::Value,
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
}

/// A wire-format snak record.
///
/// `datatype` is absent on some qualifier/reference snaks; decoding falls
/// back to `"string"`. `hash` is present on qualifier and reference snaks
/// and serves as their local identity.
#[derive(Debug, Clone, Deserialize)]
pub struct Snak {
    pub snaktype: SnakType,
    pub property: EntityId,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default)]
    pub datavalue: Option<DataValue>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl Snak {
    /// Returns the declared data type of this snak, when it is one of the
    /// known discriminators.
    pub fn data_type(&self) -> Option<DataType> {
        self.datatype.as_deref().and_then(DataType::from_discriminator)
    }
}

/// Decodes a snak's payload into a typed [`Value`].
///
/// Returns `Ok(None)` for `novalue`/`somevalue` snaks; the caller still
/// records the snak type. Unknown or unsupported discriminators fail with
/// [`UnmarshalError::UnsupportedDataType`] naming the discriminator; data is
/// never silently dropped. This function performs no I/O.
pub fn decode_snak_value(snak: &Snak) -> Result<Option<Value>, UnmarshalError> {
    if snak.snaktype != SnakType::Value {
        return Ok(None);
    }

    let data_type = snak.datatype.as_deref().unwrap_or("string");
    let datavalue = snak
        .datavalue
        .as_ref()
        .ok_or(UnmarshalError::MissingField { field: "datavalue" })?;
    let payload = &datavalue.value;

    let decoder = match DataType::from_discriminator(data_type) {
        Some(DataType::String) => decode_string,
        Some(DataType::MonolingualText) => decode_monolingual_text,
        Some(DataType::ExternalId) => decode_external_id,
        Some(DataType::GlobeCoordinate) => decode_globe_coordinate,
        Some(DataType::Quantity) => decode_quantity,
        Some(DataType::Item) | Some(DataType::Property) => decode_entity_ref,
        _ => {
            return Err(UnmarshalError::UnsupportedDataType {
                data_type: data_type.to_owned(),
            });
        }
    };

    decoder(payload).map(Some)
}
