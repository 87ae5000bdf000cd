use std::future::Future;
use tracing::{info, warn};

/// Resolves when `signal` fires.
///
/// If the signal cannot be listened for, a warning is logged and the returned
/// future never resolves, so the server keeps running instead of stopping
/// right after start.
pub async fn wait_for<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
