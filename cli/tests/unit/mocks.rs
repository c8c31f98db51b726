//! Shared mock infrastructure for unit tests.
//!
//! Provides a simulated clock, a scripted control plane, identity stubs,
//! and an event-recording reporter so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not every test file uses every mock

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use dbup_cli::application::ports::{
    Clock, CreateFault, IdentityApi, ProgressReporter, ProvisioningApi,
};
use dbup_common::{
    CreateInstance, CreateReply, Endpoint, Identity, InstanceDescription, InstanceStatus,
};

// ── Simulated clock ───────────────────────────────────────────────────────────

/// Clock whose `sleep` advances simulated time instantly.
pub struct SimClock {
    now: Cell<Duration>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
        }
    }
}

impl Clock for SimClock {
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
pub enum Step {
    Status(InstanceStatus),
    Ready(Endpoint),
    Error(&'static str),
}

/// Control plane that answers describe calls from a script, repeating the
/// last entry once the script is exhausted, and counts every call.
pub struct ScriptedControlPlane {
    create_result: RefCell<Option<Result<CreateReply, CreateFault>>>,
    script: RefCell<VecDeque<Step>>,
    pub create_calls: Cell<usize>,
    pub describe_calls: Cell<usize>,
}

impl ScriptedControlPlane {
    pub fn new(create_result: Result<CreateReply, CreateFault>, script: Vec<Step>) -> Self {
        Self {
            create_result: RefCell::new(Some(create_result)),
            script: RefCell::new(script.into()),
            create_calls: Cell::new(0),
            describe_calls: Cell::new(0),
        }
    }

    pub fn created(identifier: &str, script: Vec<Step>) -> Self {
        Self::new(
            Ok(CreateReply {
                identifier: identifier.to_string(),
                requested_at: None,
            }),
            script,
        )
    }
}

impl ProvisioningApi for ScriptedControlPlane {
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
            Some(Step::Status(status)) => Ok(InstanceDescription {
                identifier: identifier.to_string(),
                status,
                endpoint: None,
            }),
            Some(Step::Ready(endpoint)) => Ok(InstanceDescription {
                identifier: identifier.to_string(),
                status: InstanceStatus::Available,
                endpoint: Some(endpoint),
            }),
            Some(Step::Error(msg)) => anyhow::bail!("{msg}"),
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

// ── Event recording ───────────────────────────────────────────────────────────

/// Records every emitted progress event for ordered assertions.
#[derive(Default)]
pub struct EventLog {
    pub events: RefCell<Vec<String>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first event containing `needle`, if any.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.events.borrow().iter().position(|e| e.contains(needle))
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.contains(needle))
            .count()
    }
}

impl ProgressReporter for EventLog {
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

// ── Shared fixtures ───────────────────────────────────────────────────────────

pub fn endpoint() -> Endpoint {
    Endpoint {
        host: "db.example.internal".into(),
        port: 5432,
    }
}
