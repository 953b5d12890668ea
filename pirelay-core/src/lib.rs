#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod validator;

pub use config::{ApiKey, RelayConfig};
pub use error::RelayError;
pub use normalizer::ActionReply;
pub use pipeline::{ActionPipeline, IncomingRequest, Upstream};
