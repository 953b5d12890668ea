//! Payment actions and the values that flow through a single relay call.

use std::fmt;

/// One of the two operations the relay forwards to the Pi payments API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentAction {
    /// Cancel a pending payment.
    Cancel,
    /// Mark a payment complete with the blockchain transaction id.
    Complete,
}

impl PaymentAction {
    /// Upstream path suffix: `/v2/payments/{id}/{operation}`.
    pub const fn operation(self) -> &'static str {
        match self {
            PaymentAction::Cancel => "cancel",
            PaymentAction::Complete => "complete",
        }
    }

    /// Capitalised name used in caller-facing error strings.
    pub const fn display_name(self) -> &'static str {
        match self {
            PaymentAction::Cancel => "Cancel",
            PaymentAction::Complete => "Complete",
        }
    }

    /// Whether the action needs a `txid` in addition to the payment id.
    pub const fn requires_txid(self) -> bool {
        matches!(self, PaymentAction::Complete)
    }
}

impl fmt::Display for PaymentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Identifiers extracted from the caller's payload.
///
/// `payment_id` is never empty once validation has passed. `txid` is only
/// populated for [`PaymentAction::Complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentActionInput {
    pub payment_id: String,
    pub txid: Option<String>,
}

/// Raw outcome of the upstream call.
///
/// `body` is the concatenation of every received chunk and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResult {
    pub status_code: u16,
    pub body: String,
}

impl UpstreamResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
