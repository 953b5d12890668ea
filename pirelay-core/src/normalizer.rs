//! Mapping of upstream results and relay failures onto the caller contract.

use http::StatusCode;
use pirelay_sdk::objects::{PaymentAction, ResponseEnvelope, UpstreamResult};

use crate::error::RelayError;

/// What the server writes back for one invocation.
///
/// `envelope` is `None` only for CORS preflights, which answer with an
/// empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReply {
    pub status: StatusCode,
    pub envelope: Option<ResponseEnvelope>,
}

impl ActionReply {
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            envelope: None,
        }
    }

    pub fn ok(envelope: ResponseEnvelope) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Some(envelope),
        }
    }
}

impl From<RelayError> for ActionReply {
    fn from(err: RelayError) -> Self {
        Self {
            status: err.status(),
            envelope: Some(err.envelope()),
        }
    }
}

/// Classify an upstream result. The body is forwarded untouched either way.
pub fn normalize(
    action: PaymentAction,
    result: UpstreamResult,
) -> Result<ResponseEnvelope, RelayError> {
    if result.is_success() {
        Ok(ResponseEnvelope::success(result.body))
    } else {
        Err(RelayError::Upstream { action, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(action: PaymentAction, status_code: u16, body: &str) -> ActionReply {
        let result = UpstreamResult {
            status_code,
            body: body.to_owned(),
        };
        match normalize(action, result) {
            Ok(envelope) => ActionReply::ok(envelope),
            Err(err) => err.into(),
        }
    }

    #[test]
    fn test_success_range() {
        for status_code in [200, 201, 204, 299] {
            let reply = reply(PaymentAction::Cancel, status_code, r#"{"status":"cancelled"}"#);
            assert_eq!(reply.status, StatusCode::OK);
            assert_eq!(
                reply.envelope,
                Some(ResponseEnvelope::success(r#"{"status":"cancelled"}"#))
            );
        }
    }

    #[test]
    fn test_failures_keep_upstream_status() {
        for status_code in [199, 300, 301, 400, 401, 404, 409, 500, 502] {
            let reply = reply(PaymentAction::Complete, status_code, "nope");
            assert_eq!(reply.status.as_u16(), status_code);
            assert_eq!(
                reply.envelope,
                Some(ResponseEnvelope::failure_with_details(
                    "Complete failed",
                    "nope"
                ))
            );
        }
    }

    #[test]
    fn test_zero_status_becomes_500() {
        let reply = reply(PaymentAction::Cancel, 0, "");
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            reply.envelope,
            Some(ResponseEnvelope::failure_with_details("Cancel failed", ""))
        );
    }

    #[test]
    fn test_body_is_not_reparsed() {
        let body = "  {not json at all ";
        let reply = reply(PaymentAction::Cancel, 200, body);
        assert_eq!(reply.envelope, Some(ResponseEnvelope::success(body)));
    }

    #[test]
    fn test_preflight_has_no_body() {
        let reply = ActionReply::preflight();
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.envelope.is_none());
    }
}
