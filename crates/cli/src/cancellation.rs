//! Ctrl+C handling for long-running commands.
//!
//! Responsibilities:
//! - Provide a cloneable cancellation token that command handlers can await.
//! - Define the `Cancelled` marker error carried through `anyhow::Result`.
//!
//! Does NOT handle:
//! - Deciding when to check for cancellation; handlers race their work
//!   against [`CancellationToken::cancelled`].
//!
//! Invariants:
//! - Once cancelled, the token stays cancelled.

use thiserror::Error;
use tokio::sync::watch;

/// Cancellation token shared across tasks.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    tx: watch::Sender<bool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Cancel the token. Calling it again has no effect.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Cancel this token when the process receives Ctrl+C.
    pub fn cancel_on_ctrl_c(&self) {
        let token = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => token.cancel(),
                Err(e) => tracing::warn!(error = %e, "Failed to listen for Ctrl+C"),
            }
        });
    }
}

/// Marker error for user-driven cancellation.
#[derive(Debug, Clone, Copy, Error)]
#[error("cancelled")]
pub struct Cancelled;

pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
