use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::parser::EntityId;

/// Status marker the API puts in `message` for a usable record
pub const OK_MESSAGE: &str = "ok";

/// Why a single requested record was left out of the output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("status marker {0:?}")]
    StatusMarker(Option<String>),
    #[error("identity {0} was already extracted")]
    DuplicateIdentity(EntityId),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<EnvelopeResult>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResult {
    #[serde(default)]
    uid: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// The `result` of a usable response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceBody {
    /// Self-reported identifier, as sent (string or number)
    pub uid: Option<Value>,
    pub properties: Map<String, Value>,
}

impl ResourceBody {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Reported `uid` when it reads as an integer, otherwise the id that was requested
    pub fn resolve_id(&self, requested: EntityId) -> EntityId {
        self.uid.as_ref().and_then(integer_value).unwrap_or(requested)
    }
}

/// Fractional uids (`4.7`) are not identities; the caller falls back to the requested id
fn integer_value(value: &Value) -> Option<EntityId> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Classify a finished HTTP exchange
pub fn classify_response(status: u16, body: &str) -> Result<ResourceBody, SkipReason> {
    if !(200..300).contains(&status) {
        return Err(SkipReason::HttpStatus(status));
    }
    parse_envelope(body)
}

/// Parse a `{message, result: {uid, properties}}` envelope
pub fn parse_envelope(body: &str) -> Result<ResourceBody, SkipReason> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| SkipReason::MalformedBody(e.to_string()))?;

    if envelope.message.as_deref() != Some(OK_MESSAGE) {
        return Err(SkipReason::StatusMarker(envelope.message));
    }

    let result = envelope
        .result
        .ok_or_else(|| SkipReason::MalformedBody("missing result".to_string()))?;

    Ok(ResourceBody {
        uid: result.uid,
        properties: result.properties.unwrap_or_default(),
    })
}
