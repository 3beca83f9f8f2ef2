//! Data bridge — connects service watch channels to TUI actions.
//!
//! Runs as a background task: probes API health, subscribes to every
//! feature service's state cells plus the session, and forwards each change
//! as an [`Action`] through the app's channel. Shuts down on cancellation.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use onramp_core::Services;

use crate::action::{Action, Notification};

const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Probe `GET /api/health` and reduce the outcome to a boolean.
async fn check_health(services: &Services) -> bool {
    match services.api().health().await {
        Ok(health) => health.is_ok(),
        Err(e) => {
            warn!(error = %e, "health probe failed");
            false
        }
    }
}

/// Spawn body for the bridge task.
pub async fn run_data_bridge(
    services: Services,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    // Subscribe before pushing initial snapshots so no change is missed.
    let mut reg_loading = services.register().watch_loading();
    let mut reg_created = services.register().watch_created();
    let mut reg_error = services.register().watch_error();
    let mut prof_loading = services.profile().watch_loading();
    let mut prof_user = services.profile().watch_user();
    let mut prof_error = services.profile().watch_error();
    let mut session_user = services.session().watch_current_user();

    // Initial snapshots so screens have state immediately.
    let _ = action_tx.send(Action::SessionChanged(services.session().current_user()));

    let mut healthy = check_health(&services).await;
    let _ = action_tx.send(Action::HealthChecked(healthy));
    if !healthy {
        let _ = action_tx.send(Action::Notify(Notification::warning(
            "Platform API is unreachable",
        )));
    }

    let mut health_interval = tokio::time::interval(HEALTH_POLL_INTERVAL);
    health_interval.reset(); // the first tick already happened above

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = reg_loading.changed() => {
                let v = *reg_loading.borrow_and_update();
                let _ = action_tx.send(Action::RegisterLoading(v));
            }
            Ok(()) = reg_created.changed() => {
                let v = reg_created.borrow_and_update().clone();
                let _ = action_tx.send(Action::RegisterCreated(v));
            }
            Ok(()) = reg_error.changed() => {
                let v = reg_error.borrow_and_update().clone();
                let _ = action_tx.send(Action::RegisterError(v));
            }
            Ok(()) = prof_loading.changed() => {
                let v = *prof_loading.borrow_and_update();
                let _ = action_tx.send(Action::ProfileLoading(v));
            }
            Ok(()) = prof_user.changed() => {
                let v = prof_user.borrow_and_update().clone();
                let _ = action_tx.send(Action::ProfileUpdated(v));
            }
            Ok(()) = prof_error.changed() => {
                let v = prof_error.borrow_and_update().clone();
                let _ = action_tx.send(Action::ProfileError(v));
            }
            Ok(()) = session_user.changed() => {
                let v = session_user.borrow_and_update().clone();
                let _ = action_tx.send(Action::SessionChanged(v));
            }
            _ = health_interval.tick() => {
                let now_healthy = check_health(&services).await;
                let _ = action_tx.send(Action::HealthChecked(now_healthy));
                if healthy && !now_healthy {
                    let _ = action_tx.send(Action::Notify(Notification::error(
                        "Lost connection to the platform API",
                    )));
                } else if !healthy && now_healthy {
                    let _ = action_tx.send(Action::Notify(Notification::success("API reachable")));
                }
                healthy = now_healthy;
            }
        }
    }

    debug!("data bridge shut down");
}
