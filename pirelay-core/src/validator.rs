//! Extraction of payment identifiers from caller payloads.
//!
//! Clients in the wild send the payment id under several names, sometimes
//! nested in the `paymentDTO` object the Pi SDK hands them. Each field is
//! resolved from an ordered table of JSON paths; the first path yielding a
//! non-empty value wins.

use pirelay_sdk::objects::{PaymentAction, PaymentActionInput};
use serde_json::{Map, Value};

use crate::error::RelayError;

/// A path of object keys from the payload root.
type JsonPath = &'static [&'static str];

/// Where the payment id may live, in priority order.
pub const PAYMENT_ID_PATHS: &[JsonPath] = &[
    &["paymentId"],
    &["identifier"],
    &["id"],
    &["payment_id"],
    &["paymentDTO", "paymentId"],
    &["paymentDTO", "identifier"],
    &["paymentDTO", "id"],
    &["paymentDTO", "payment_id"],
];

/// Where the blockchain transaction id may live, in priority order.
pub const TXID_PATHS: &[JsonPath] = &[&["txid"], &["paymentDTO", "transaction", "txid"]];

/// Parse a raw body, treating absent or malformed input as `{}`.
pub fn parse_payload(body: Option<&[u8]>) -> Value {
    body.filter(|bytes| !bytes.is_empty())
        .and_then(|bytes| serde_json::from_slice(bytes).ok())
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// First non-empty value found along `paths`.
pub fn resolve(payload: &Value, paths: &[JsonPath]) -> Option<String> {
    paths
        .iter()
        .copied()
        .find_map(|path| lookup(payload, path).and_then(coerce))
}

/// Build the action input, or reject the request before any upstream call.
pub fn validate(
    action: PaymentAction,
    body: Option<&[u8]>,
) -> Result<PaymentActionInput, RelayError> {
    let payload = parse_payload(body);
    let payment_id = resolve(&payload, PAYMENT_ID_PATHS);
    // Percent-encoding leaves these intact and URL parsing would fold them
    // into the parent path.
    if matches!(payment_id.as_deref(), Some("." | "..")) {
        return Err(RelayError::Validation("paymentId is invalid"));
    }

    if action.requires_txid() {
        let txid = resolve(&payload, TXID_PATHS);
        return match (payment_id, txid) {
            (Some(payment_id), Some(txid)) => Ok(PaymentActionInput {
                payment_id,
                txid: Some(txid),
            }),
            _ => Err(RelayError::Validation("paymentId and txid are required")),
        };
    }

    payment_id
        .map(|payment_id| PaymentActionInput {
            payment_id,
            txid: None,
        })
        .ok_or(RelayError::Validation("paymentId is required"))
}

fn lookup<'a>(payload: &'a Value, path: JsonPath) -> Option<&'a Value> {
    path.iter().try_fold(payload, |value, key| value.get(*key))
}

/// Scalars become strings; empty, zero, false and structured values are absent.
fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}
