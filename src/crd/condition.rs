//! Status conditions
//!
//! Follows the Kubernetes condition conventions. A resource stores at most
//! one condition per type.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
    Degraded,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionStatus::True => write!(f, "True"),
            ConditionStatus::False => write!(f, "False"),
            ConditionStatus::Unknown => write!(f, "Unknown"),
            ConditionStatus::Degraded => write!(f, "Degraded"),
        }
    }
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

/// Condition type. The operator reports the named variants; any other
/// type found on a stored status is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionType {
    /// Last reconciliation outcome
    Reconciled,
    /// Plugin workload is serving
    Available,
    /// Optional cluster resources were found
    ResourceDiscovery,
    /// Type written by another controller or operator version
    Other(String),
}

impl ConditionType {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionType::Reconciled => "Reconciled",
            ConditionType::Available => "Available",
            ConditionType::ResourceDiscovery => "ResourceDiscovery",
            ConditionType::Other(other) => other,
        }
    }
}

impl From<String> for ConditionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Reconciled" => ConditionType::Reconciled,
            "Available" => ConditionType::Available,
            "ResourceDiscovery" => ConditionType::ResourceDiscovery,
            _ => ConditionType::Other(value),
        }
    }
}

impl From<ConditionType> for String {
    fn from(value: ConditionType) -> Self {
        match value {
            ConditionType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[schemars(with = "String")]
    pub r#type: ConditionType,

    pub status: ConditionStatus,

    /// CamelCase identifier for the last transition
    pub reason: String,

    /// Human readable detail, may be empty
    #[serde(default)]
    pub message: String,

    /// `.metadata.generation` the condition was computed from
    #[serde(default)]
    pub observed_generation: i64,

    #[schemars(with = "String")]
    pub last_transition_time: DateTime<Utc>,
}

impl Condition {
    /// Create a new condition stamped with the current time
    pub fn new(
        r#type: ConditionType,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
        observed_generation: i64,
    ) -> Self {
        Self {
            r#type,
            status,
            reason: reason.into(),
            message: message.into(),
            observed_generation,
            last_transition_time: Utc::now(),
        }
    }

    /// Whether two conditions report the same state.
    ///
    /// Only reason, status, message and observed generation are compared;
    /// the transition time and the type are ignored.
    pub fn is_equivalent(&self, other: &Condition) -> bool {
        self.reason == other.reason
            && self.status == other.status
            && self.message == other.message
            && self.observed_generation == other.observed_generation
    }
}
