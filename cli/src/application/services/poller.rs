//! Application service — readiness polling, the core state machine.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits; time is routed through
//! the `Clock` port so tests run on a simulated clock.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{Clock, ProgressReporter, ProvisioningApi};
use crate::domain::config::PollConfig;
use crate::domain::error::ProvisionError;
use crate::domain::resource::{PollObservation, ResourceHandle, ResourceState};

/// Poll timing, resolved from config and flags by the caller.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Time between status checks.
    pub interval: Duration,
    /// Maximum total wait before declaring timeout. The sole authority
    /// terminating the loop.
    pub deadline: Duration,
}

impl From<&PollConfig> for PollSettings {
    fn from(cfg: &PollConfig) -> Self {
        Self {
            interval: Duration::from_secs(cfg.interval_seconds),
            deadline: Duration::from_secs(cfg.deadline_seconds),
        }
    }
}

/// Wait until the instance behind `handle` becomes available.
///
/// Observes status at a fixed interval until a terminal state is reached or
/// the deadline expires. Status reads are idempotent, so transient query
/// failures are logged through the reporter and retried on the next tick —
/// the deadline is the only bound on those retries. The creation call is
/// never re-issued from here.
///
/// On success the handle is `Available` with the endpoint taken from the
/// same observation; state and endpoint become visible together.
///
/// # Errors
///
/// Returns [`ProvisionError::PollTimeout`] when the deadline expires, or
/// [`ProvisionError::ProvisioningFailed`] when the control plane reports a
/// terminal failure for the instance.
pub async fn await_available(
    api: &impl ProvisioningApi,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    handle: &mut ResourceHandle,
    settings: &PollSettings,
) -> Result<()> {
    let started = clock.now();

    loop {
        if clock.now().saturating_sub(started) >= settings.deadline {
            handle.mark_timed_out()?;
            return Err(ProvisionError::PollTimeout {
                identifier: handle.identifier().to_string(),
                deadline_secs: settings.deadline.as_secs(),
            }
            .into());
        }

        match api.describe_instance(handle.identifier()).await {
            Ok(description) => {
                let observation =
                    PollObservation::from_description(description.status, description.endpoint);
                match observation.state {
                    ResourceState::Available => {
                        if let Some(endpoint) = observation.endpoint {
                            handle.mark_available(endpoint)?;
                            reporter.success(&format!(
                                "instance {} is now available",
                                handle.identifier()
                            ));
                            return Ok(());
                        }
                        // Ready status without endpoint data: incomplete
                        // observation, keep polling.
                        handle.note_provisioning()?;
                        reporter.warn("status is available but endpoint is not yet published");
                    }
                    ResourceState::Failed => {
                        handle.mark_failed()?;
                        return Err(ProvisionError::ProvisioningFailed {
                            identifier: handle.identifier().to_string(),
                        }
                        .into());
                    }
                    _ => {
                        handle.note_provisioning()?;
                        reporter.step(&format!("status: {}... (waiting)", description.status));
                    }
                }
            }
            // Reads are safe to retry; the deadline bounds how long we keep
            // trying.
            Err(e) => reporter.warn(&format!("status check failed: {e:#}")),
        }

        clock.sleep(settings.interval).await;
    }
}
