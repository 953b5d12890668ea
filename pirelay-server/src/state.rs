//! Application state shared across all request handlers.

use pirelay_core::{ActionPipeline, RelayConfig};
use pirelay_sdk::client::PiClient;
use std::sync::Arc;

/// One pipeline per endpoint, both sharing the same configuration and
/// HTTP client.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub cancel: ActionPipeline<PiClient>,
    pub complete: ActionPipeline<PiClient>,
}

impl AppState {
    /// Create a new AppState with the injected relay configuration and Pi client.
    pub fn new(config: RelayConfig, client: PiClient) -> Self {
        let config = Arc::new(config);
        let client = Arc::new(client);
        Self {
            cancel: ActionPipeline::cancel(config.clone(), client.clone()),
            complete: ActionPipeline::complete(config, client),
        }
    }
}
