//! wikibase-client: typed client-side object model for Wikibase knowledge
//! bases.
//!
//! This crate represents remote knowledge-base entities (items, properties)
//! and their statements (claims, qualifiers, references, labels,
//! descriptions, aliases) as typed local objects, synchronizes them with
//! the service through a JSON read/write API, and converts between the
//! service's polymorphic "snak" format and a closed set of typed values.
//!
//! # Overview
//!
//! - **Marshal/unmarshal**: the snak codec decodes the wire format's
//!   tagged union into [`Value`] variants and encodes them back; the
//!   round trip preserves every observable field.
//! - **Local collections**: claims, qualifiers, and references live in
//!   per-property buckets owned by their entity or claim. Buckets hold
//!   insertion order and are dropped when they empty.
//! - **Remote-first writes**: every mutating operation issues one blocking
//!   API call and touches local state only after the server confirmed the
//!   edit. A failed call leaves the local model unchanged.
//!
//! # Quick Start
//!
//! ```rust
//! use wikibase_client::{Config, EntityId, Quantity, Value, encode_value};
//!
//! // Encode a quantity the way the service expects it: explicit sign,
//! // unit URL derived from the configured deployment.
//! let config = Config::default();
//! let quantity = Quantity::new(123).with_unit(EntityId::item(7));
//! let payload = encode_value(&Value::Quantity(quantity), &config)?;
//! assert_eq!(payload["amount"], "+123");
//! # Ok::<(), wikibase_client::MarshalError>(())
//! ```
//!
//! Remote operations go through a [`Client`], which pairs an
//! [`ApiClient`] transport implementation with a [`Config`]:
//!
//! ```rust,ignore
//! let client = Client::new(my_transport, Config::default());
//! let mut item = Item::create(&client, "Douglas Adams")?;
//! let prop = Property::get(&client, "P1".parse()?)?;
//! item.claims.add(&client, &prop, Quantity::new(42))?;
//! ```
//!
//! # Modules
//!
//! - [`model`]: core data types (entities, values, statements)
//! - [`codec`]: snak and record encoding/decoding
//! - [`api`]: the transport trait and its error type
//! - [`validate`]: pre-flight checks for write operations
//! - [`error`]: error types
//!
//! # Concurrency
//!
//! Everything is synchronous and single-threaded: one blocking request per
//! mutating call, no retries, no internal locking. Callers that share a
//! collection across threads must serialize access themselves.

pub mod api;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use api::{ApiClient, ApiError, ApiResult};
pub use client::Client;
pub use codec::{SearchRecord, Snak, decode_snak_value, encode_value};
pub use config::Config;
pub use error::{
    EditError, Error, MalformedEntityId, MarshalError, SearchError, UnmarshalError,
    ValidationError,
};
pub use model::{
    Aliases, Amount, Claim, Claims, DataType, Descriptions, EntityId, EntityKind, ExternalId,
    GeoLocation, Item, Labels, Property, Qualifier, Qualifiers, Quantity, Rank, Reference,
    References, SnakType, Value,
};
pub use validate::check_value_type;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
