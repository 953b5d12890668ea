//! The caller-facing response envelope.

use serde::{Deserialize, Serialize};

/// `{ ok, error?, details? }` returned by both relay endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResponseEnvelope {
    /// Successful envelope carrying the upstream body.
    pub fn success(details: impl Into<String>) -> Self {
        Self {
            ok: true,
            error: None,
            details: Some(details.into()),
        }
    }

    /// Failure envelope without diagnostic details.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            details: None,
        }
    }

    /// Failure envelope with diagnostic details.
    pub fn failure_with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            details: Some(details.into()),
        }
    }
}
