//! The request pipeline shared by the cancel and complete endpoints.
//!
//! ```text
//! OPTIONS → 200 (empty)
//! method  → 405
//! api key → 500
//! payload → 400
//! upstream transport → 500
//! upstream status → normalized envelope
//! ```
//!
//! The pipeline is strictly linear and single-attempt. It holds no mutable
//! state, so one instance is shared by every concurrent request.

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use pirelay_sdk::client::{ClientError, PiClient};
use pirelay_sdk::objects::{PaymentAction, PaymentActionInput, ResponseEnvelope, UpstreamResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::normalizer::{self, ActionReply};
use crate::validator;

/// A single inbound invocation as handed over by the HTTP layer.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub body: Option<Bytes>,
}

/// The one outbound call a pipeline makes.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn forward(
        &self,
        action: PaymentAction,
        api_key: &str,
        input: &PaymentActionInput,
    ) -> Result<UpstreamResult, ClientError>;
}

#[async_trait]
impl Upstream for PiClient {
    async fn forward(
        &self,
        action: PaymentAction,
        api_key: &str,
        input: &PaymentActionInput,
    ) -> Result<UpstreamResult, ClientError> {
        self.send(action, api_key, &input.payment_id, input.txid.as_deref())
            .await
    }
}

/// One action's pipeline: the action descriptor plus injected collaborators.
pub struct ActionPipeline<U> {
    action: PaymentAction,
    config: Arc<RelayConfig>,
    upstream: Arc<U>,
}

impl<U> Clone for ActionPipeline<U> {
    fn clone(&self) -> Self {
        Self {
            action: self.action,
            config: self.config.clone(),
            upstream: self.upstream.clone(),
        }
    }
}

impl<U: Upstream> ActionPipeline<U> {
    pub fn new(action: PaymentAction, config: Arc<RelayConfig>, upstream: Arc<U>) -> Self {
        Self {
            action,
            config,
            upstream,
        }
    }

    pub fn cancel(config: Arc<RelayConfig>, upstream: Arc<U>) -> Self {
        Self::new(PaymentAction::Cancel, config, upstream)
    }

    pub fn complete(config: Arc<RelayConfig>, upstream: Arc<U>) -> Self {
        Self::new(PaymentAction::Complete, config, upstream)
    }

    /// Run one invocation to completion. Never fails: every error is
    /// folded into the reply.
    pub async fn handle(&self, request: IncomingRequest) -> ActionReply {
        if request.method == Method::OPTIONS {
            return ActionReply::preflight();
        }

        info!(action = %self.action, method = %request.method, "Payment action invoked");

        match self.execute(request).await {
            Ok(envelope) => ActionReply::ok(envelope),
            Err(err) => {
                debug!(action = %self.action, error = %err, "Payment action rejected");
                err.into()
            }
        }
    }

    async fn execute(&self, request: IncomingRequest) -> Result<ResponseEnvelope, RelayError> {
        if request.method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(RelayError::MissingApiKey {
                key_name: self.config.api_key_name,
            })?;

        let input = validator::validate(self.action, request.body.as_deref())?;
        debug!(
            action = %self.action,
            payment_id = %input.payment_id,
            txid_len = input.txid.as_ref().map_or(0, String::len),
            "Resolved payment action input"
        );

        let result = self
            .upstream
            .forward(self.action, api_key.expose(), &input)
            .await
            .map_err(|e| {
                warn!(action = %self.action, error = %e, "Pi API request failed");
                RelayError::Transport {
                    action: self.action,
                    message: e.to_string(),
                }
            })?;

        info!(
            action = %self.action,
            status_code = result.status_code,
            "Pi API response"
        );

        normalizer::normalize(self.action, result)
    }
}
