//! Resource lifecycle types: states, handle, poll observations.
//!
//! Pure data and transitions — no I/O, no async. The handle owns the state
//! machine; the poller drives it through the transition methods and the
//! compiler guarantees an endpoint exists exactly when the state is
//! `Available` (the endpoint lives inside that phase).

use dbup_common::Endpoint;
use serde::Serialize;

use crate::domain::error::StateError;

// ── States ────────────────────────────────────────────────────────────────────

/// Lifecycle states of one provisioning attempt.
///
/// Transitions are monotonic: `Requested` is the only initial state, and
/// `Available`, `Failed`, and `TimedOut` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceState {
    Requested,
    Provisioning,
    Available,
    Failed,
    TimedOut,
}

impl ResourceState {
    /// No further transition occurs from a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Available | Self::Failed | Self::TimedOut)
    }
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Requested => "requested",
            Self::Provisioning => "provisioning",
            Self::Available => "available",
            Self::Failed => "failed",
            Self::TimedOut => "timed-out",
        };
        f.write_str(s)
    }
}

// ── Observations ──────────────────────────────────────────────────────────────

/// One status snapshot taken during polling. Never retained beyond the poll
/// iteration that produced it.
#[derive(Debug, Clone)]
pub struct PollObservation {
    pub state: ResourceState,
    pub endpoint: Option<Endpoint>,
}

impl PollObservation {
    /// Map a describe payload onto the state machine's vocabulary.
    ///
    /// Any in-progress or unrecognized status maps to `Provisioning`; only
    /// an explicit terminal-failure status maps to `Failed`.
    #[must_use]
    pub fn from_description(
        status: dbup_common::InstanceStatus,
        endpoint: Option<Endpoint>,
    ) -> Self {
        let state = if status.is_available() {
            ResourceState::Available
        } else if status.is_terminal_failure() {
            ResourceState::Failed
        } else {
            ResourceState::Provisioning
        };
        Self { state, endpoint }
    }
}

// ── Handle ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Phase {
    Requested,
    Provisioning,
    Available(Endpoint),
    Failed,
    TimedOut,
}

/// Identifier plus current state for one provisioning attempt.
///
/// Owned exclusively by the orchestration run that created it. Endpoint
/// metadata exists only in the `Available` phase — absence, not a
/// placeholder, everywhere else.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    identifier: String,
    phase: Phase,
}

impl ResourceHandle {
    /// A freshly created resource starts in `Requested`.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            phase: Phase::Requested,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn state(&self) -> ResourceState {
        match self.phase {
            Phase::Requested => ResourceState::Requested,
            Phase::Provisioning => ResourceState::Provisioning,
            Phase::Available(_) => ResourceState::Available,
            Phase::Failed => ResourceState::Failed,
            Phase::TimedOut => ResourceState::TimedOut,
        }
    }

    /// `Some` exactly when the state is `Available`.
    #[must_use]
    pub fn endpoint(&self) -> Option<&Endpoint> {
        match &self.phase {
            Phase::Available(ep) => Some(ep),
            _ => None,
        }
    }

    /// Record an in-progress observation: `Requested → Provisioning`, or a
    /// no-op repeat of `Provisioning`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the handle is already terminal.
    pub fn note_provisioning(&mut self) -> Result<(), StateError> {
        self.guard_not_terminal()?;
        self.phase = Phase::Provisioning;
        Ok(())
    }

    /// Terminal success: state and endpoint become visible together.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the handle is already terminal.
    pub fn mark_available(&mut self, endpoint: Endpoint) -> Result<(), StateError> {
        self.guard_not_terminal()?;
        self.phase = Phase::Available(endpoint);
        Ok(())
    }

    /// Terminal failure reported by the external system.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the handle is already terminal.
    pub fn mark_failed(&mut self) -> Result<(), StateError> {
        self.guard_not_terminal()?;
        self.phase = Phase::Failed;
        Ok(())
    }

    /// Terminal timeout: the deadline expired before availability.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the handle is already terminal.
    pub fn mark_timed_out(&mut self) -> Result<(), StateError> {
        self.guard_not_terminal()?;
        self.phase = Phase::TimedOut;
        Ok(())
    }

    fn guard_not_terminal(&self) -> Result<(), StateError> {
        let state = self.state();
        if state.is_terminal() {
            return Err(StateError {
                identifier: self.identifier.clone(),
                state,
            });
        }
        Ok(())
    }
}
