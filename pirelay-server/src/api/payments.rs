use axum::{
    body::{self, Bytes},
    extract::{Request, State},
    http::Method,
    response::IntoResponse,
};
use pirelay_core::{ActionPipeline, IncomingRequest};
use pirelay_sdk::client::PiClient;

use super::RelayResponse;
use crate::state::AppState;

/// Largest request body the relay buffers. Payloads carry two identifiers,
/// anything past this is treated as an absent body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// `POST /pi-cancel` – cancel a pending payment.
pub(super) async fn cancel_payment(
    State(state): State<AppState>,
    request: Request,
) -> impl IntoResponse {
    relay(&state.cancel, request).await
}

/// `POST /pi-complete` – mark a payment complete with its `txid`.
pub(super) async fn complete_payment(
    State(state): State<AppState>,
    request: Request,
) -> impl IntoResponse {
    relay(&state.complete, request).await
}

async fn relay(pipeline: &ActionPipeline<PiClient>, request: Request) -> RelayResponse {
    let method = request.method().clone();
    // Preflights are answered without touching the body.
    let body = if method == Method::OPTIONS {
        None
    } else {
        read_body(request).await
    };
    RelayResponse(pipeline.handle(IncomingRequest { method, body }).await)
}

async fn read_body(request: Request) -> Option<Bytes> {
    match body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => (!bytes.is_empty()).then_some(bytes),
        Err(e) => {
            tracing::debug!(error = %e, "Request body unreadable, treating as empty");
            None
        }
    }
}
