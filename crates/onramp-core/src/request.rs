// ── Request-state cell ──
//
// The one recurring pattern behind every feature that talks to the remote
// API: a single async call published as three observable cells
// (loading / result / error) via `watch` channels.

use std::fmt;
use std::future::Future;

use tokio::sync::watch;
use tracing::warn;

use onramp_api::{Error as ApiError, ErrorKind};

// ── RequestError ────────────────────────────────────────────────────

/// Classified failure stored in a cell's `error` slot.
///
/// Carries the [`ErrorKind`] for logs and tests; `Display` yields only the
/// fixed user-facing message, so raw transport detail never reaches a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    kind: ErrorKind,
    message: &'static str,
}

impl RequestError {
    /// Build directly (views and tests that mock service state).
    pub fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

// ── ResetPolicy ─────────────────────────────────────────────────────

/// What happens to `result` when a new invocation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Keep the last successful payload until a new success overwrites it
    /// (fetch variant: a failed reload shows stale data, not a blank).
    RetainResult,
    /// Clear the payload at invocation start (create variant: `result`
    /// doubles as the success indicator for the in-flight attempt).
    ClearResult,
}

// ── RequestCell ─────────────────────────────────────────────────────

/// Tri-state projection of an in-flight asynchronous operation.
///
/// Each cell is written only by its owning service, through
/// [`drive`](RequestCell::drive). Consumers read snapshots or subscribe via the
/// `watch_*` receivers. Overlapping invocations are last-write-wins: the
/// invocation that settles last determines the final observed state.
pub struct RequestCell<T> {
    loading: watch::Sender<bool>,
    result: watch::Sender<Option<T>>,
    error: watch::Sender<Option<RequestError>>,
    reset: ResetPolicy,
}

impl<T: Clone + Send + Sync + 'static> RequestCell<T> {
    pub fn new(reset: ResetPolicy) -> Self {
        let (loading, _) = watch::channel(false);
        let (result, _) = watch::channel(None);
        let (error, _) = watch::channel(None);

        Self {
            loading,
            result,
            error,
            reset,
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn result(&self) -> Option<T> {
        self.result.borrow().clone()
    }

    pub fn error(&self) -> Option<RequestError> {
        self.error.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn watch_result(&self) -> watch::Receiver<Option<T>> {
        self.result.subscribe()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<RequestError>> {
        self.error.subscribe()
    }

    // ── Invocation ───────────────────────────────────────────────────

    /// Drive one invocation through the cell.
    ///
    /// In order: `loading` goes true, `error` clears (and `result`, under
    /// [`ResetPolicy::ClearResult`]), the operation is awaited, the outcome
    /// lands in exactly one of `result`/`error`, and `loading` goes false.
    /// `loading` is false immediately after the returned future settles.
    ///
    /// On failure the transport error is classified into a [`RequestError`]
    /// carrying `failure` as its user-facing message; the underlying detail
    /// goes to the log only.
    ///
    /// There is no retry and no cancellation of a prior in-flight call; the
    /// future must be polled to completion (the service hub spawns
    /// invocations onto the runtime).
    pub async fn drive<F>(&self, op: F, failure: &'static str)
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.loading.send_modify(|v| *v = true);
        self.error.send_modify(|slot| *slot = None);
        if self.reset == ResetPolicy::ClearResult {
            self.result.send_modify(|slot| *slot = None);
        }

        match op.await {
            Ok(value) => {
                self.result.send_modify(|slot| *slot = Some(value));
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "request failed");
                self.error.send_modify(|slot| {
                    *slot = Some(RequestError {
                        kind: e.kind(),
                        message: failure,
                    });
                });
            }
        }

        self.loading.send_modify(|v| *v = false);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::oneshot;

    use super::*;

    const FAILED: &str = "Something went wrong";

    fn server_error() -> ApiError {
        ApiError::Api {
            status: 500,
            detail: "Internal server error".into(),
        }
    }

    #[tokio::test]
    async fn loading_spans_the_whole_invocation() {
        let cell = Arc::new(RequestCell::new(ResetPolicy::RetainResult));
        assert!(!cell.loading());

        let (tx, rx) = oneshot::channel::<()>();
        let driver = {
            let cell = Arc::clone(&cell);
            tokio::spawn(async move {
                cell.drive(
                    async {
                        rx.await.unwrap();
                        Ok(5)
                    },
                    FAILED,
                )
                .await;
            })
        };

        // Wait until the invocation has started, then observe it mid-flight.
        let mut loading = cell.watch_loading();
        loading.wait_for(|v| *v).await.unwrap();
        assert!(cell.loading());
        assert!(cell.result().is_none());

        tx.send(()).unwrap();
        driver.await.unwrap();

        assert!(!cell.loading());
        assert_eq!(cell.result(), Some(5));
        assert!(cell.error().is_none());
    }

    #[tokio::test]
    async fn failure_sets_classified_error_and_clears_loading() {
        let cell: RequestCell<i32> = RequestCell::new(ResetPolicy::RetainResult);

        cell.drive(async { Err(server_error()) }, FAILED).await;

        let err = cell.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.to_string(), FAILED);
        assert!(!cell.loading());
        assert!(cell.result().is_none());
    }

    #[tokio::test]
    async fn new_invocation_clears_previous_error() {
        let cell = Arc::new(RequestCell::new(ResetPolicy::RetainResult));

        cell.drive(async { Err(server_error()) }, FAILED).await;
        assert!(cell.error().is_some());

        let (tx, rx) = oneshot::channel::<()>();
        let driver = {
            let cell = Arc::clone(&cell);
            tokio::spawn(async move {
                cell.drive(
                    async {
                        rx.await.unwrap();
                        Ok(1)
                    },
                    FAILED,
                )
                .await;
            })
        };

        let mut loading = cell.watch_loading();
        loading.wait_for(|v| *v).await.unwrap();
        assert!(cell.error().is_none(), "error must clear at invocation start");

        tx.send(()).unwrap();
        driver.await.unwrap();
        assert!(cell.error().is_none());
        assert_eq!(cell.result(), Some(1));
    }

    #[tokio::test]
    async fn retain_policy_keeps_result_across_failed_reload() {
        let cell: RequestCell<i32> = RequestCell::new(ResetPolicy::RetainResult);

        cell.drive(async { Ok(7) }, FAILED).await;
        assert_eq!(cell.result(), Some(7));

        cell.drive(async { Err(server_error()) }, FAILED).await;
        assert_eq!(cell.result(), Some(7), "stale result must survive a failure");
        assert!(cell.error().is_some());
    }

    #[tokio::test]
    async fn clear_policy_resets_result_at_invocation_start() {
        let cell = Arc::new(RequestCell::new(ResetPolicy::ClearResult));

        cell.drive(async { Ok(7) }, FAILED).await;
        assert_eq!(cell.result(), Some(7));

        let (tx, rx) = oneshot::channel::<()>();
        let driver = {
            let cell = Arc::clone(&cell);
            tokio::spawn(async move {
                cell.drive(
                    async {
                        rx.await.unwrap();
                        Err(server_error())
                    },
                    FAILED,
                )
                .await;
            })
        };

        let mut loading = cell.watch_loading();
        loading.wait_for(|v| *v).await.unwrap();
        assert!(cell.result().is_none(), "result must clear at invocation start");

        tx.send(()).unwrap();
        driver.await.unwrap();
        assert!(cell.result().is_none());
    }

    #[tokio::test]
    async fn overlapping_invocations_are_last_write_wins() {
        let cell = Arc::new(RequestCell::new(ResetPolicy::RetainResult));

        let (tx_a, rx_a) = oneshot::channel::<()>();
        let (tx_b, rx_b) = oneshot::channel::<()>();

        let driver_a = {
            let cell = Arc::clone(&cell);
            tokio::spawn(async move {
                cell.drive(
                    async {
                        rx_a.await.unwrap();
                        Ok("first-issued")
                    },
                    FAILED,
                )
                .await;
            })
        };
        let driver_b = {
            let cell = Arc::clone(&cell);
            tokio::spawn(async move {
                cell.drive(
                    async {
                        rx_b.await.unwrap();
                        Ok("second-issued")
                    },
                    FAILED,
                )
                .await;
            })
        };

        // Settle the second-issued call first, then the first-issued one.
        tx_b.send(()).unwrap();
        driver_b.await.unwrap();
        assert_eq!(cell.result(), Some("second-issued"));

        tx_a.send(()).unwrap();
        driver_a.await.unwrap();

        // The later settlement wins, regardless of issue order.
        assert_eq!(cell.result(), Some("first-issued"));
        assert!(!cell.loading());
    }
}
