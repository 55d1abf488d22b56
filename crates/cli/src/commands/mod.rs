//! Command handlers, one module per top-level subcommand.

pub mod admin;
pub mod auth;
pub mod labs;
pub mod notifications;
pub mod profile;
pub mod services;
pub mod theme;

use std::future::Future;

use anyhow::Result;
use selfmade_client::SoftFailure;

use crate::cancellation::{CancellationToken, Cancelled};
use crate::error::ServerRejected;

/// Await a client call unless the user cancels first.
pub(crate) async fn cancellable<T, E>(
    cancel: &CancellationToken,
    fut: impl Future<Output = std::result::Result<T, E>>,
) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    tokio::select! {
        res = fut => Ok(res?),
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

/// Turn a failure reported inside a 200 body into an error.
pub(crate) fn reject_soft_failure(response: &impl SoftFailure) -> Result<()> {
    match response.failure() {
        Some(failure) => Err(ServerRejected(failure).into()),
        None => Ok(()),
    }
}
