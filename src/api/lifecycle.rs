use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ClientError;

/// Destroyed flag shared by a client and everything it spawned.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    destroyed: std::sync::Arc<watch::Sender<bool>>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            destroyed: std::sync::Arc::new(tx),
        }
    }

    pub fn destroy(&self) {
        self.destroyed.send_replace(true);
    }

    pub fn is_destroyed(&self) -> bool {
        *self.destroyed.borrow()
    }

    /// Resolves once destroyed. Never resolves if the lifecycle is dropped
    /// without being destroyed.
    pub fn destroyed(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.destroyed.subscribe();
        async move {
            let dropped = rx.wait_for(|destroyed| *destroyed).await.is_err();
            if dropped {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// A request running on the runtime.
#[derive(Debug)]
pub struct PendingRequest<T> {
    handle: JoinHandle<Option<Result<T, ClientError>>>,
    lifecycle: Lifecycle,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub(crate) fn spawn<F>(lifecycle: Lifecycle, fut: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let destroyed = lifecycle.destroyed();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = destroyed => None,
                result = fut => Some(result),
            }
        });
        Self { handle, lifecycle }
    }

    /// Wait for the outcome. `None` means the client was destroyed first.
    pub async fn result(self) -> Option<Result<T, ClientError>> {
        let outcome = match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => None,
        };
        if self.lifecycle.is_destroyed() {
            return None;
        }
        outcome
    }

    /// Stop waiting on the transport. The outcome becomes `None`.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Stored success/error handlers for one request.
///
/// Both become no-ops once the owning client is destroyed, however late the
/// response arrives.
pub struct Completion<T> {
    lifecycle: Lifecycle,
    on_success: Box<dyn FnOnce(T) + Send>,
    on_error: Box<dyn FnOnce(ClientError) + Send>,
}

impl<T> Completion<T> {
    pub fn new(
        lifecycle: Lifecycle,
        on_success: impl FnOnce(T) + Send + 'static,
        on_error: impl FnOnce(ClientError) + Send + 'static,
    ) -> Self {
        Self {
            lifecycle,
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    /// Returns whether the success handler ran.
    pub fn succeed(self, data: T) -> bool {
        if self.lifecycle.is_destroyed() {
            return false;
        }
        (self.on_success)(data);
        true
    }

    /// Returns whether the error handler ran.
    pub fn fail(self, err: ClientError) -> bool {
        if self.lifecycle.is_destroyed() {
            return false;
        }
        (self.on_error)(err);
        true
    }
}
