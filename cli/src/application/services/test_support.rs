//! Shared test helpers for service tests.
//!
//! Provides a simulated clock, a scripted control-plane stub, and reporters
//! that either discard or record emitted events.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use dbup_common::{
    CreateInstance, CreateReply, Endpoint, Identity, InstanceDescription, InstanceStatus,
};

use crate::application::ports::{Clock, CreateFault, IdentityApi, ProgressReporter, ProvisioningApi};

// ── Simulated clock ───────────────────────────────────────────────────────────

/// Clock whose `sleep` advances simulated time instantly. Tests drive hours
/// of poll behavior in microseconds.
pub struct SimulatedClock {
    now: Cell<Duration>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
        }
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    async fn sleep(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

// ── Scripted control plane ────────────────────────────────────────────────────

/// One scripted answer to a describe call.
#[derive(Clone)]
pub enum Describe {
    Status(InstanceStatus),
    Ready(Endpoint),
    /// Ready status but no endpoint in the payload.
    ReadyNoEndpoint,
    /// Transient query failure.
    Error(&'static str),
}

/// Control-plane stub that answers describe calls from a script, in order.
/// Repeats the last entry once the script is exhausted and counts every
/// call so tests can assert on query traffic.
pub struct ScriptedApi {
    create_result: RefCell<Option<Result<CreateReply, CreateFault>>>,
    script: RefCell<VecDeque<Describe>>,
    pub create_calls: Cell<usize>,
    pub describe_calls: Cell<usize>,
}

impl ScriptedApi {
    pub fn new(script: Vec<Describe>) -> Self {
        Self {
            create_result: RefCell::new(None),
            script: RefCell::new(script.into()),
            create_calls: Cell::new(0),
            describe_calls: Cell::new(0),
        }
    }

    pub fn with_create_ok(identifier: &str, script: Vec<Describe>) -> Self {
        let api = Self::new(script);
        *api.create_result.borrow_mut() = Some(Ok(CreateReply {
            identifier: identifier.to_string(),
            requested_at: None,
        }));
        api
    }

    pub fn with_create_fault(fault: CreateFault) -> Self {
        let api = Self::new(Vec::new());
        *api.create_result.borrow_mut() = Some(Err(fault));
        api
    }
}

impl ProvisioningApi for ScriptedApi {
    async fn create_instance(
        &self,
        _request: &CreateInstance,
    ) -> Result<CreateReply, CreateFault> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.create_result
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(CreateFault::Other(anyhow::anyhow!("create not scripted"))))
    }

    async fn describe_instance(&self, identifier: &str) -> Result<InstanceDescription> {
        self.describe_calls.set(self.describe_calls.get() + 1);
        let mut script = self.script.borrow_mut();
        let step = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        match step {
            Some(Describe::Status(status)) => Ok(InstanceDescription {
                identifier: identifier.to_string(),
                status,
                endpoint: None,
            }),
            Some(Describe::Ready(endpoint)) => Ok(InstanceDescription {
                identifier: identifier.to_string(),
                status: InstanceStatus::Available,
                endpoint: Some(endpoint),
            }),
            Some(Describe::ReadyNoEndpoint) => Ok(InstanceDescription {
                identifier: identifier.to_string(),
                status: InstanceStatus::Available,
                endpoint: None,
            }),
            Some(Describe::Error(msg)) => anyhow::bail!("{msg}"),
            None => anyhow::bail!("describe not scripted"),
        }
    }
}

// ── Identity stubs ────────────────────────────────────────────────────────────

pub struct IdentityOk;

impl IdentityApi for IdentityOk {
    async fn whoami(&self) -> Result<Identity> {
        Ok(Identity {
            account_id: "123456789012".into(),
            principal: "deploy-bot".into(),
        })
    }
}

pub struct IdentityDenied;

impl IdentityApi for IdentityDenied {
    async fn whoami(&self) -> Result<Identity> {
        anyhow::bail!("token expired")
    }
}

/// Identity stub that counts calls so tests can assert no external call
/// happened.
pub struct CountingIdentity {
    pub calls: Cell<usize>,
}

impl CountingIdentity {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl IdentityApi for CountingIdentity {
    async fn whoami(&self) -> Result<Identity> {
        self.calls.set(self.calls.get() + 1);
        Ok(Identity {
            account_id: "123456789012".into(),
            principal: "deploy-bot".into(),
        })
    }
}

// ── Reporters ─────────────────────────────────────────────────────────────────

pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

/// Records every emitted event so tests can assert on them instead of
/// captured text output.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events.borrow().iter().any(|e| e.contains(needle))
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}
