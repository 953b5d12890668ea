//! Shared types for the Pi payment relay.
//!
//! The [`objects`] module holds the caller-facing wire types. The
//! [`client`] module, gated behind the `client` feature, is the typed
//! HTTP client for the upstream Pi Network payments API.

#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
