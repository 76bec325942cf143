//! Graceful shutdown with a drain deadline

use std::{future::Future, time::Duration};

use tokio::sync::oneshot;
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection closed on its own
    Drained,
    /// Connections were still open when the deadline passed
    DeadlineElapsed,
}

/// Drive `server` to completion, giving up `deadline` after `signalled` fires
///
/// `signalled` is completed by the graceful shutdown trigger. If it is
/// dropped without firing, only the server future can end the wait.
pub async fn serve_until_drained<F, E>(
    server: F,
    signalled: oneshot::Receiver<()>,
    deadline: Duration,
) -> Result<ShutdownOutcome, E>
where
    F: Future<Output = Result<(), E>>,
{
    tokio::select! {
        result = server => result.map(|()| ShutdownOutcome::Drained),
        () = deadline_after(signalled, deadline) => {
            warn!(?deadline, "Shutdown deadline elapsed, dropping open connections");
            Ok(ShutdownOutcome::DeadlineElapsed)
        }
    }
}

async fn deadline_after(signalled: oneshot::Receiver<()>, deadline: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("⏳ Waiting up to {:?} for connections to close...", deadline);
    tokio::time::sleep(deadline).await;
}
