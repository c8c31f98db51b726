//! Wire types exchanged with the database control-plane API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instance lifecycle status as reported by the control plane.
///
/// The control plane may grow new in-progress statuses over time; anything
/// unrecognized deserializes to [`InstanceStatus::Unknown`] and is treated
/// as in-progress by callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceStatus {
    Creating,
    BackingUp,
    Modifying,
    Available,
    Failed,
    Deleting,
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    /// The instance is ready to accept connections.
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// The control plane gave up on this instance; it will never become
    /// available.
    #[must_use]
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Creating => "creating",
            Self::BackingUp => "backing-up",
            Self::Modifying => "modifying",
            Self::Available => "available",
            Self::Failed => "failed",
            Self::Deleting => "deleting",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Network endpoint of an available instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

/// One status snapshot of an instance, as returned by describe.
///
/// `endpoint` is populated only once the instance is available; in-progress
/// payloads omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDescription {
    pub identifier: String,
    pub status: InstanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
}

/// Creation request body sent to the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstance {
    pub identifier: String,
    pub instance_class: String,
    pub engine: String,
    pub engine_version: String,
    pub username: String,
    pub secret: String,
    pub storage_gb: u32,
    pub storage_type: String,
    pub storage_encrypted: bool,
    pub backup_retention_days: u32,
    pub database: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Acknowledgement returned by a successful create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReply {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
}

/// Caller identity as reported by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: String,
    pub principal: String,
}
