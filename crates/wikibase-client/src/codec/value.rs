//! Datavalue payload encoding/decoding.
//!
//! Implements the wire format for the `datavalue.value` payload of each
//! supported data type. Decoding is keyed by the snak's `datatype`
//! discriminator (see [`crate::codec::snak`]); encoding dispatches on the
//! local [`Value`] variant.

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{MarshalError, UnmarshalError};
use crate::model::{Amount, EntityId, ExternalId, GeoLocation, Quantity, Value};

// =============================================================================
// DECODING
// =============================================================================

fn malformed(context: &'static str, detail: impl ToString) -> UnmarshalError {
    UnmarshalError::MalformedValue {
        context,
        detail: detail.to_string(),
    }
}

/// Decodes a plain string payload.
pub fn decode_string(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let s = payload
        .as_str()
        .ok_or_else(|| malformed("string value", "expected a JSON string"))?;
    Ok(Value::String(s.to_owned()))
}

#[derive(Deserialize)]
struct MonolingualTextPayload {
    text: String,
}

/// Decodes a monolingual-text payload to its text, dropping the language
/// tag. Statement values are plain strings in this model.
pub fn decode_monolingual_text(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let text: MonolingualTextPayload = serde_json::from_value(payload.clone())
        .map_err(|e| malformed("monolingual text value", e))?;
    Ok(Value::String(text.text))
}

/// Decodes an external-id payload.
pub fn decode_external_id(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let s = payload
        .as_str()
        .ok_or_else(|| malformed("external ID value", "expected a JSON string"))?;
    Ok(Value::ExternalId(ExternalId::new(s)))
}

#[derive(Deserialize)]
struct GlobeCoordinatePayload {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: Option<f64>,
    #[serde(default)]
    precision: Option<f64>,
    #[serde(default)]
    globe: Option<String>,
}

/// Decodes a globe-coordinate payload.
pub fn decode_globe_coordinate(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let coord: GlobeCoordinatePayload =
        serde_json::from_value(payload.clone()).map_err(|e| malformed("globe coordinate", e))?;

    if !coord.latitude.is_finite() || !(-90.0..=90.0).contains(&coord.latitude) {
        return Err(malformed("globe coordinate", "latitude out of range"));
    }
    if !coord.longitude.is_finite() || !(-180.0..=180.0).contains(&coord.longitude) {
        return Err(malformed("globe coordinate", "longitude out of range"));
    }

    Ok(Value::GeoLocation(GeoLocation {
        latitude: coord.latitude,
        longitude: coord.longitude,
        altitude: coord.altitude,
        precision: coord.precision.unwrap_or(GeoLocation::DEFAULT_PRECISION),
        globe: coord.globe,
    }))
}

#[derive(Deserialize)]
struct QuantityPayload {
    amount: String,
    unit: String,
}

/// Decodes a quantity payload.
///
/// Amounts are signed decimal strings; integer parses are preferred so that
/// `"+5"` comes back as an integer amount. The unit is `"1"` for
/// dimensionless quantities, otherwise an entity URL whose last path
/// segment is the unit item's ID.
pub fn decode_quantity(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let quantity: QuantityPayload =
        serde_json::from_value(payload.clone()).map_err(|e| malformed("quantity", e))?;

    let amount = decode_amount(&quantity.amount)?;

    let unit = if quantity.unit == "1" {
        None
    } else {
        let unit_id = quantity
            .unit
            .rsplit('/')
            .next()
            .unwrap_or(quantity.unit.as_str());
        let id: EntityId = unit_id.parse().map_err(UnmarshalError::EntityId)?;
        if !id.is_item() {
            return Err(malformed("quantity", format!("unit {id} is not an item")));
        }
        Some(id)
    };

    Ok(Value::Quantity(Quantity { amount, unit }))
}

fn decode_amount(s: &str) -> Result<Amount, UnmarshalError> {
    if let Ok(v) = s.parse::<i64>() {
        return Ok(Amount::Int(v));
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Amount::Float(v)),
        _ => Err(malformed("quantity", format!("bad amount {s:?}"))),
    }
}

#[derive(Deserialize)]
struct EntityRefPayload {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default, rename = "entity-type")]
    entity_type: Option<String>,
    #[serde(default, rename = "numeric-id")]
    numeric_id: Option<u64>,
}

/// Decodes an item/property reference payload to a lazy [`Value::Entity`]
/// stub. The referenced entity is not fetched.
///
/// Read responses carry an `id` field; write payloads carry
/// `entity-type` + `numeric-id`. Both forms are accepted.
pub fn decode_entity_ref(payload: &serde_json::Value) -> Result<Value, UnmarshalError> {
    let entity: EntityRefPayload =
        serde_json::from_value(payload.clone()).map_err(|e| malformed("entity reference", e))?;

    if let Some(id) = entity.id {
        return Ok(Value::Entity(id));
    }

    match (entity.entity_type.as_deref(), entity.numeric_id) {
        (Some("item"), Some(n)) => Ok(Value::Entity(EntityId::item(n))),
        (Some("property"), Some(n)) => Ok(Value::Entity(EntityId::property(n))),
        _ => Err(malformed(
            "entity reference",
            "expected an \"id\" or an \"entity-type\"/\"numeric-id\" pair",
        )),
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value into the wire-format payload expected under
/// `datavalue.value`.
///
/// The quantity-unit entity URL is derived from the configured base URL;
/// deployments differ, so it is never hardcoded.
pub fn encode_value(value: &Value, config: &Config) -> Result<serde_json::Value, MarshalError> {
    match value {
        Value::String(s) => Ok(json!(s)),
        Value::ExternalId(id) => Ok(json!(id.as_str())),
        Value::Entity(id) => Ok(json!({
            "entity-type": id.kind().as_str(),
            "numeric-id": id.number(),
        })),
        Value::GeoLocation(geo) => encode_globe_coordinate(geo),
        Value::Quantity(quantity) => encode_quantity(quantity, config),
    }
}

fn encode_globe_coordinate(geo: &GeoLocation) -> Result<serde_json::Value, MarshalError> {
    if geo.latitude.is_nan() || geo.longitude.is_nan() || geo.altitude.is_some_and(f64::is_nan) {
        return Err(MarshalError::NonFiniteCoordinate);
    }
    if !(-90.0..=90.0).contains(&geo.latitude) {
        return Err(MarshalError::LatitudeOutOfRange { lat: geo.latitude });
    }
    if !(-180.0..=180.0).contains(&geo.longitude) {
        return Err(MarshalError::LongitudeOutOfRange { lon: geo.longitude });
    }

    let mut payload = json!({
        "latitude": geo.latitude,
        "longitude": geo.longitude,
        "precision": geo.precision,
    });
    // Optional keys are omitted entirely when unset, not sent as null.
    if let Some(altitude) = geo.altitude {
        payload["altitude"] = json!(altitude);
    }
    if let Some(globe) = &geo.globe {
        payload["globe"] = json!(globe);
    }
    Ok(payload)
}

fn encode_quantity(quantity: &Quantity, config: &Config) -> Result<serde_json::Value, MarshalError> {
    if !quantity.amount.is_finite() {
        return Err(MarshalError::NonFiniteAmount);
    }

    // Non-negative amounts get an explicit "+"; negative amounts already
    // carry their sign, exactly once.
    let rendered = quantity.amount.to_string();
    let amount = if rendered.starts_with('-') {
        rendered
    } else {
        format!("+{rendered}")
    };

    let unit = match quantity.unit {
        None => "1".to_owned(),
        Some(id) => {
            if !id.is_item() {
                return Err(MarshalError::UnitNotAnItem { id });
            }
            config.entity_url(id)
        }
    };

    Ok(json!({ "amount": amount, "unit": unit }))
}
