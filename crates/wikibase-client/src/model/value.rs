//! Typed values for Wikibase statements.
//!
//! A [`Value`] is the payload of a claim, qualifier, or reference. The
//! closed set of [`DataType`]s maps 1:1 onto the wire-format discriminator
//! strings via a process-wide, read-only table.

use std::fmt;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::{EntityId, EntityKind};

/// Data types for statement values, named by their wire discriminators.
///
/// The first block is decodable; the second block exists only so that wire
/// data using those discriminators is rejected by name instead of silently
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    MonolingualText,
    ExternalId,
    GlobeCoordinate,
    Quantity,
    Item,
    Property,

    CommonsMedia,
    GeoShape,
    Math,
    TabularData,
    Time,
    Url,
    Form,
    Lexeme,
    Sense,
}

/// All data types, in wire-discriminator order.
const ALL_DATA_TYPES: [DataType; 16] = [
    DataType::String,
    DataType::MonolingualText,
    DataType::ExternalId,
    DataType::GlobeCoordinate,
    DataType::Quantity,
    DataType::Item,
    DataType::Property,
    DataType::CommonsMedia,
    DataType::GeoShape,
    DataType::Math,
    DataType::TabularData,
    DataType::Time,
    DataType::Url,
    DataType::Form,
    DataType::Lexeme,
    DataType::Sense,
];

lazy_static! {
    /// Reverse half of the discriminator table, built once at startup.
    static ref DATA_TYPE_BY_DISCRIMINATOR: FxHashMap<&'static str, DataType> = ALL_DATA_TYPES
        .iter()
        .map(|dt| (dt.discriminator(), *dt))
        .collect();
}

impl DataType {
    /// Returns the wire-format discriminator string for this data type.
    pub fn discriminator(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::MonolingualText => "monolingualtext",
            DataType::ExternalId => "external-id",
            DataType::GlobeCoordinate => "globe-coordinate",
            DataType::Quantity => "quantity",
            DataType::Item => "wikibase-item",
            DataType::Property => "wikibase-property",
            DataType::CommonsMedia => "commonsMedia",
            DataType::GeoShape => "geo-shape",
            DataType::Math => "math",
            DataType::TabularData => "tabular-data",
            DataType::Time => "time",
            DataType::Url => "url",
            DataType::Form => "wikibase-form",
            DataType::Lexeme => "wikibase-lexeme",
            DataType::Sense => "wikibase-sense",
        }
    }

    /// Looks up a data type by its wire discriminator.
    pub fn from_discriminator(s: &str) -> Option<DataType> {
        DATA_TYPE_BY_DISCRIMINATOR.get(s).copied()
    }

    /// Returns whether values of this data type can be decoded and encoded.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            DataType::String
                | DataType::MonolingualText
                | DataType::ExternalId
                | DataType::GlobeCoordinate
                | DataType::Quantity
                | DataType::Item
                | DataType::Property
        )
    }

    /// Returns whether a value of type `actual` may be stored under a
    /// property declared with this data type.
    ///
    /// Monolingual text decodes to a plain string value, so a
    /// `monolingualtext` property accepts `string` values.
    pub fn accepts(self, actual: DataType) -> bool {
        self == actual || (self == DataType::MonolingualText && actual == DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

/// An external identifier in some other registry (e.g. a GND or DOI ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalId(pub String);

impl ExternalId {
    pub fn new(id: impl Into<String>) -> ExternalId {
        ExternalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A globe coordinate with optional altitude and globe URL.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to +90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180).
    pub longitude: f64,
    /// Altitude in meters (optional).
    pub altitude: Option<f64>,
    /// Coordinate precision in degrees.
    pub precision: f64,
    /// Globe entity URL, or None for the service default.
    pub globe: Option<String>,
}

impl GeoLocation {
    /// Default precision: one arcsecond.
    pub const DEFAULT_PRECISION: f64 = 1.0 / 3600.0;

    pub fn new(latitude: f64, longitude: f64) -> GeoLocation {
        GeoLocation {
            latitude,
            longitude,
            altitude: None,
            precision: GeoLocation::DEFAULT_PRECISION,
            globe: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> GeoLocation {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_precision(mut self, precision: f64) -> GeoLocation {
        self.precision = precision;
        self
    }

    pub fn with_globe(mut self, globe: impl Into<String>) -> GeoLocation {
        self.globe = Some(globe.into());
        self
    }
}

/// A quantity amount: the service's decimal strings are decoded as integers
/// whenever possible, falling back to floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Int(i64),
    Float(f64),
}

impl Amount {
    pub fn is_finite(self) -> bool {
        match self {
            Amount::Int(_) => true,
            Amount::Float(v) => v.is_finite(),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Int(v) => v as f64,
            Amount::Float(v) => v,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Int(v) => write!(f, "{v}"),
            // Keep a decimal point so whole floats stay floats on re-decode.
            Amount::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            Amount::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Amount {
        Amount::Int(v)
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Amount {
        Amount::Float(v)
    }
}

impl PartialEq<i64> for Amount {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Amount::Int(v) if v == other)
    }
}

impl PartialEq<f64> for Amount {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Amount::Float(v) if v == other)
    }
}

/// A quantity with an optional unit item.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub amount: Amount,
    /// Unit item ID, or None for a dimensionless quantity.
    pub unit: Option<EntityId>,
}

impl Quantity {
    pub fn new(amount: impl Into<Amount>) -> Quantity {
        Quantity {
            amount: amount.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: EntityId) -> Quantity {
        self.unit = Some(unit);
        self
    }
}

/// A typed statement payload.
///
/// `Entity` is a lazy reference: it carries only the ID of the referenced
/// item or property. Fetching the full entity is an explicit follow-up via
/// [`Item::get`](crate::model::Item::get) /
/// [`Property::get`](crate::model::Property::get).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Entity(EntityId),
    ExternalId(ExternalId),
    GeoLocation(GeoLocation),
    Quantity(Quantity),
}

impl Value {
    /// Returns the data type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::String(_) => DataType::String,
            Value::Entity(id) => match id.kind() {
                EntityKind::Item => DataType::Item,
                EntityKind::Property => DataType::Property,
            },
            Value::ExternalId(_) => DataType::ExternalId,
            Value::GeoLocation(_) => DataType::GlobeCoordinate,
            Value::Quantity(_) => DataType::Quantity,
        }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::String(v.to_owned())
    }
}

impl From<EntityId> for Value {
    fn from(v: EntityId) -> Value {
        Value::Entity(v)
    }
}

impl From<ExternalId> for Value {
    fn from(v: ExternalId) -> Value {
        Value::ExternalId(v)
    }
}

impl From<GeoLocation> for Value {
    fn from(v: GeoLocation) -> Value {
        Value::GeoLocation(v)
    }
}

impl From<Quantity> for Value {
    fn from(v: Quantity) -> Value {
        Value::Quantity(v)
    }
}
