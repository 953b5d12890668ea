//! Failure taxonomy of a relay invocation.
//!
//! Every variant is terminal: the pipeline converts it into a
//! [`ResponseEnvelope`] and an HTTP status, never into a panic or a raw
//! error body.

use http::StatusCode;
use pirelay_sdk::objects::{PaymentAction, ResponseEnvelope, UpstreamResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The Pi API secret was not provisioned.
    #[error("Missing {key_name}")]
    MissingApiKey { key_name: &'static str },

    /// Anything other than `POST` (preflights never get here).
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A required identifier could not be resolved from the payload.
    #[error("{0}")]
    Validation(&'static str),

    /// The Pi API answered with a non-2xx status.
    #[error("{} failed with status {}", .action.display_name(), .result.status_code)]
    Upstream {
        action: PaymentAction,
        result: UpstreamResult,
    },

    /// The Pi API could not be reached.
    #[error("{} error: {message}", .action.display_name())]
    Transport {
        action: PaymentAction,
        message: String,
    },
}

impl RelayError {
    /// Outward HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingApiKey { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { result, .. } => upstream_status(result.status_code),
            RelayError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing envelope for this failure.
    pub fn envelope(&self) -> ResponseEnvelope {
        match self {
            RelayError::MissingApiKey { .. }
            | RelayError::MethodNotAllowed
            | RelayError::Validation(_) => ResponseEnvelope::failure(self.to_string()),
            RelayError::Upstream { action, result } => ResponseEnvelope::failure_with_details(
                format!("{} failed", action.display_name()),
                result.body.clone(),
            ),
            RelayError::Transport { action, message } => ResponseEnvelope::failure_with_details(
                format!("{} error", action.display_name()),
                message.clone(),
            ),
        }
    }
}

/// The upstream's own status, or 500 when it is zero or not a valid code.
fn upstream_status(status_code: u16) -> StatusCode {
    match status_code {
        0 => StatusCode::INTERNAL_SERVER_ERROR,
        code => StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status_code: u16, body: &str) -> RelayError {
        RelayError::Upstream {
            action: PaymentAction::Complete,
            result: UpstreamResult {
                status_code,
                body: body.to_owned(),
            },
        }
    }

    #[test]
    fn test_statuses() {
        let missing = RelayError::MissingApiKey {
            key_name: "PI_API_KEY",
        };
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::Validation("paymentId is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(upstream(404, "").status(), StatusCode::NOT_FOUND);
        assert_eq!(upstream(503, "").status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream(0, "").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream(42, "").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelopes() {
        let missing = RelayError::MissingApiKey {
            key_name: "PI_API_KEY",
        };
        assert_eq!(
            missing.envelope(),
            ResponseEnvelope::failure("Missing PI_API_KEY")
        );
        assert_eq!(
            RelayError::MethodNotAllowed.envelope(),
            ResponseEnvelope::failure("Method not allowed")
        );
        assert_eq!(
            upstream(404, "not found").envelope(),
            ResponseEnvelope::failure_with_details("Complete failed", "not found")
        );

        let transport = RelayError::Transport {
            action: PaymentAction::Cancel,
            message: "connection refused".to_owned(),
        };
        assert_eq!(transport.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            transport.envelope(),
            ResponseEnvelope::failure_with_details("Cancel error", "connection refused")
        );
    }
}
