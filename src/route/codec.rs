//! Translation between `ReverseRoute` and Caddy's route JSON.
//!
//! # Responsibilities
//! - Materialize a route from a fixed skeleton by patching four leaves
//! - Read the same four leaves back out of single-object and list responses
//!
//! # Design Decisions
//! - The skeleton is a literal document; only the patched leaves vary
//! - Reads are tolerant: list and single-object responses share sub-shapes
//!   but not nesting depth, so absent fields decode to defaults

use serde_json::Value;
use thiserror::Error;

use crate::route::types::ReverseRoute;

/// Skeleton of a single terminal route: outer host matcher, one subroute
/// with a path matcher and a reverse_proxy handler with one upstream.
const ROUTE_TEMPLATE: &str = r#"
{
    "@id": "",
    "handle": [
        {
            "handler": "subroute",
            "routes": [
                {
                    "handle": [
                        {
                            "handler": "reverse_proxy",
                            "upstreams": [
                                {
                                    "dial": "127.0.0.1:3000"
                                }
                            ]
                        }
                    ],
                    "match": [
                        {
                            "path": [
                                "/*"
                            ]
                        }
                    ]
                }
            ]
        }
    ],
    "match": [
        {
            "host": [
                "example.com"
            ]
        }
    ],
    "terminal": true
}
"#;

pub const ID_POINTER: &str = "/@id";
pub const UPSTREAM_DIAL_POINTER: &str = "/handle/0/routes/0/handle/0/upstreams/0/dial";
pub const MATCH_PATH_POINTER: &str = "/handle/0/routes/0/match/0/path/0";
pub const MATCH_HOST_POINTER: &str = "/match/0/host/0";

/// Errors raised while writing a route into the skeleton.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The skeleton itself is not valid JSON.
    #[error("Route template is malformed: {0}")]
    Template(#[from] serde_json::Error),

    /// A field pointer did not resolve against the skeleton.
    #[error("Route template has no field at '{0}'")]
    MissingField(&'static str),
}

/// Encode a route into the JSON object the admin API expects.
pub fn encode(route: &ReverseRoute) -> Result<Value, EncodeError> {
    encode_with_template(ROUTE_TEMPLATE, route)
}

/// Encode a route as compact JSON text.
pub fn encode_string(route: &ReverseRoute) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&encode(route)?)?)
}

fn encode_with_template(template: &str, route: &ReverseRoute) -> Result<Value, EncodeError> {
    let mut doc: Value = serde_json::from_str(template)?;

    set_field(&mut doc, ID_POINTER, Value::from(route.id))?;
    set_field(&mut doc, UPSTREAM_DIAL_POINTER, Value::from(route.upstream_dial.as_str()))?;
    set_field(&mut doc, MATCH_PATH_POINTER, Value::from(route.match_path.as_str()))?;
    set_field(&mut doc, MATCH_HOST_POINTER, Value::from(route.match_host.as_str()))?;

    Ok(doc)
}

fn set_field(doc: &mut Value, pointer: &'static str, value: Value) -> Result<(), EncodeError> {
    let slot = doc
        .pointer_mut(pointer)
        .ok_or(EncodeError::MissingField(pointer))?;
    *slot = value;
    Ok(())
}

/// Decode a single route object. Never fails.
pub fn decode(doc: &Value) -> ReverseRoute {
    ReverseRoute {
        id: read_id(doc),
        match_host: read_string(doc, MATCH_HOST_POINTER),
        match_path: read_string(doc, MATCH_PATH_POINTER),
        upstream_dial: read_string(doc, UPSTREAM_DIAL_POINTER),
    }
}

/// Decode a single route from response text.
///
/// Empty or unparsable text yields the default route.
pub fn decode_str(text: &str) -> ReverseRoute {
    match parse_tolerant(text) {
        Some(doc) => decode(&doc),
        None => ReverseRoute::default(),
    }
}

/// Decode a route collection from response text, preserving remote order.
///
/// `null`, empty and unparsable text yield an empty list. A lone object is
/// treated as a one-element collection.
pub fn decode_list(text: &str) -> Vec<ReverseRoute> {
    match parse_tolerant(text) {
        Some(Value::Array(items)) => items.iter().map(decode).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![decode(&other)],
    }
}

fn parse_tolerant(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(error = %e, "Admin API returned non-JSON body, decoding as empty");
            None
        }
    }
}

// Caddy echoes `@id` back as written, but hand-edited configs may carry it
// as a numeric string.
fn read_id(doc: &Value) -> i64 {
    match doc.pointer(ID_POINTER) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn read_string(doc: &Value, pointer: &str) -> String {
    match doc.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
