//! Relay API handlers.
//!
//! Called by the Pi app frontend, which never sees the Pi API secret.
//!
//! # Endpoints
//!
//! - `POST /pi-cancel`   – cancel a pending payment
//! - `POST /pi-complete` – complete a payment with its blockchain `txid`
//!
//! Both also answer `OPTIONS` preflights. Every other method is routed to
//! the pipeline too so callers get the JSON 405 envelope instead of axum's
//! plain-text one.

use axum::{
    Json, Router,
    http::{
        HeaderName,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
    },
    response::{IntoResponse, Response},
    routing::any,
};
use pirelay_core::ActionReply;

use crate::state::AppState;

mod payments;

/// Fixed permissive CORS set, emitted on every relay response.
const RELAY_HEADERS: [(HeaderName, &str); 4] = [
    (CONTENT_TYPE, "application/json"),
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
];

/// Build the relay API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pi-cancel", any(payments::cancel_payment))
        .route("/pi-complete", any(payments::complete_payment))
}

/// HTTP rendering of a pipeline reply.
struct RelayResponse(ActionReply);

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let ActionReply { status, envelope } = self.0;
        match envelope {
            Some(envelope) => (status, RELAY_HEADERS, Json(envelope)).into_response(),
            None => (status, RELAY_HEADERS).into_response(),
        }
    }
}
