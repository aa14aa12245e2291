//! Lifetime of a view and everything it has in flight.

use client::ApiError;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Bounds the async operations of one view.
///
/// [`ViewScope::run`] races an operation against the scope's token. Closing
/// the scope, through [`ViewScope::close`], a [`ScopeHandle`], or by
/// dropping it, makes every pending and future `run` resolve to
/// [`ApiError::Cancelled`].
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

/// Cloneable remote control for a [`ViewScope`], e.g. for a Ctrl-C handler.
#[derive(Debug, Clone)]
pub struct ScopeHandle(CancellationToken);

impl ScopeHandle {
    pub fn close(&self) {
        self.0.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_cancelled()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle(self.token.clone())
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F, T>(&self, op: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.token.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("view closed, dropping operation");
                Err(ApiError::Cancelled)
            }
            result = op => result,
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
