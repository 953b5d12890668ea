//! Signal handling for graceful shutdown.
//!
//! In-flight relay calls are allowed to finish; axum stops accepting new
//! connections as soon as [`shutdown_signal`] resolves.

use std::future::pending;
use tokio::signal::unix::{SignalKind, signal};

/// Resolves on the first SIGTERM or SIGINT.
///
/// If a handler cannot be installed that signal is simply never observed,
/// the server keeps running on the other one.
pub async fn shutdown_signal() {
    let name = tokio::select! {
        _ = wait_for(SignalKind::terminate(), "SIGTERM") => "SIGTERM",
        _ = wait_for(SignalKind::interrupt(), "SIGINT") => "SIGINT",
    };
    tracing::info!(signal = name, "Shutdown signal received, draining in-flight requests");
}

async fn wait_for(kind: SignalKind, name: &'static str) {
    match signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(signal = name, error = %e, "Failed to install signal handler");
            pending::<()>().await;
        }
    }
}
