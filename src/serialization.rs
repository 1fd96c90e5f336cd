//! The external structured representation: a JSON envelope whose group
//! elements and scalars travel as base64 text, and a two-phase finish step
//! that binds a parsed payload to an ambient group before any
//! cryptographic operation may touch it.
//!
//! A serde newtype wrapping a [`Serial`] payload lets it travel as base64
//! text over JSON, and a two-step versioned-deserialization idiom keeps a
//! value parsed from wire bytes from being a usable object until a second
//! step checks it against ambient context the wire format itself does not
//! carry (here, which group the embedded points belong to). Per-type field
//! names (`cPrime`, `s`, `X`, `Y`, `Cd`, ...) are the caller's concern —
//! this module owns the envelope around them (the `group` descriptor and
//! the base64 `data` blob), not a bespoke JSON shape per proof type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{base64_decode, base64_encode, from_bytes, to_bytes, Deserial, Serial};
use crate::error::SerializationError;

/// The wire shape of an envelope: `group` named explicitly, every other
/// field (just `data`, in this module's own use of it) captured by
/// `#[serde(flatten)]` so callers with a richer per-type field set than
/// `data` alone can still round-trip through the same envelope.
#[derive(Serialize, Deserialize)]
struct Envelope {
    group: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Names the concrete group/field backend a payload's points and scalars
/// were encoded against. Not derived from [`crate::params::CryptoParams`]
/// (which has no notion of a group name of its own) — supplied by
/// whoever is doing the encoding, the same way a deployment tags its
/// parameter sets with a curve identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName(String);

impl GroupName {
    pub const RISTRETTO25519: &'static str = "ristretto25519";

    pub fn new(name: impl Into<String>) -> Self { GroupName(name.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

/// Options accepted by [`finish_deserialize`].
#[derive(Debug, Clone)]
pub struct FinishDeserializeOptions {
    /// If the payload carries a `group` field, use it.
    pub accept_embedded_group: bool,
    /// Used only if the payload omits a group (or `accept_embedded_group`
    /// is `false`).
    pub fallback_group: Option<GroupName>,
    /// Reject any field besides `group`/`data`.
    pub strict_mode: bool,
}

impl Default for FinishDeserializeOptions {
    fn default() -> Self {
        FinishDeserializeOptions { accept_embedded_group: true, fallback_group: None, strict_mode: false }
    }
}

/// A parsed-but-unbound structured payload: the result of the primary
/// JSON parse, before [`finish_deserialize`] binds it to a group and
/// decodes its body. Deliberately cannot be used for any cryptographic
/// operation: a deserialized object is incomplete until bound to an
/// ambient group/field.
pub struct RawEnvelope {
    group:  Option<GroupName>,
    fields: Map<String, Value>,
}

/// Parse the primary structured representation: a `group` descriptor
/// (optional) and whatever other fields the payload's type defines,
/// exactly one of which (`data`) carries the base64-encoded canonical
/// [`Serial`] bytes that [`finish_deserialize`] decodes.
pub fn parse_envelope(json: &str) -> Result<RawEnvelope, SerializationError> {
    let envelope: Envelope = serde_json::from_str(json)
        .map_err(|e| SerializationError::WrongEncoding { field: "json", reason: e.to_string() })?;
    Ok(RawEnvelope { group: envelope.group.map(GroupName::new), fields: envelope.fields })
}

/// The two-phase finish step. Fails with
/// [`SerializationError::NoGroupAvailable`] if neither the payload nor
/// `options.fallback_group` name a group, and with
/// [`SerializationError::UnknownFieldStrict`] under `options.strict_mode`
/// if any field besides `data` remains once `group` has been consumed.
pub fn finish_deserialize<T: Deserial>(
    mut envelope: RawEnvelope,
    options: &FinishDeserializeOptions,
) -> Result<(GroupName, T), SerializationError> {
    let group = if options.accept_embedded_group {
        envelope.group.take().or_else(|| options.fallback_group.clone())
    } else {
        options.fallback_group.clone()
    }
    .ok_or(SerializationError::NoGroupAvailable)?;

    if options.strict_mode {
        if let Some(unknown) = envelope.fields.keys().find(|k| k.as_str() != "data") {
            return Err(SerializationError::UnknownFieldStrict(unknown.clone()));
        }
    }

    let data = match envelope.fields.get("data") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(SerializationError::WrongEncoding { field: "data", reason: "expected a string".into() }),
        None => return Err(SerializationError::MissingField("data")),
    };
    let bytes = base64_decode(&data)?;
    let value = from_bytes::<T>(&bytes)?;
    Ok((group, value))
}

/// Build the structured representation for `value`: `{"group": ...,
/// "data": base64(serial(value))}`. The inverse of
/// [`parse_envelope`]+[`finish_deserialize`].
pub fn to_envelope_json<T: Serial>(value: &T, group: &GroupName) -> String {
    let mut fields = Map::new();
    fields.insert("data".to_string(), Value::String(base64_encode(&to_bytes(value))));
    let envelope = Envelope { group: Some(group.as_str().to_string()), fields };
    serde_json::to_string(&envelope).expect("an envelope built from well-formed fields always serializes")
}
