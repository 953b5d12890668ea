//! Wire types shared by the relay pipeline, the server and the Pi client.

pub mod action;
pub mod envelope;

pub use action::{PaymentAction, PaymentActionInput, UpstreamResult};
pub use envelope::ResponseEnvelope;
