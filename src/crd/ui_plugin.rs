//! UIPlugin CRD
//!
//! Declares an observability console plugin. The `type` field selects one
//! of a closed set of plugins; each plugin may carry its own configuration
//! block.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::error::{Error, Result};
use crate::status::{reconcile_condition, ConditionUpdate};

// =============================================================================
// UIPlugin CRD
// =============================================================================

/// UIPlugin defines an observability console plugin.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "observability.openshift.io",
    version = "v1alpha1",
    kind = "UIPlugin",
    plural = "uiplugins",
    status = "UIPluginStatus",
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".spec.type"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct UIPluginSpec {
    /// Type defines the UI plugin
    pub r#type: UIPluginType,

    /// Configuration for the troubleshooting console plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troubleshooting_panel: Option<TroubleshootingPanelConfig>,

    /// Configuration for the distributed tracing console plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributed_tracing: Option<DistributedTracingConfig>,
}

// =============================================================================
// Sub-Types
// =============================================================================

/// Supported console plugins
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum UIPluginType {
    /// Dashboards dynamic plugin
    Dashboards,
    /// Distributed tracing dynamic plugin
    DistributedTracing,
    /// Troubleshooting panel dynamic plugin
    TroubleshootingPanel,
}

impl std::fmt::Display for UIPluginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UIPluginType::Dashboards => write!(f, "Dashboards"),
            UIPluginType::DistributedTracing => write!(f, "DistributedTracing"),
            UIPluginType::TroubleshootingPanel => write!(f, "TroubleshootingPanel"),
        }
    }
}

impl std::str::FromStr for UIPluginType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Dashboards" => Ok(UIPluginType::Dashboards),
            "DistributedTracing" => Ok(UIPluginType::DistributedTracing),
            "TroubleshootingPanel" => Ok(UIPluginType::TroubleshootingPanel),
            other => Err(Error::InvalidSpec(format!("unknown plugin type: {}", other))),
        }
    }
}

/// Options for the troubleshooting panel plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TroubleshootingPanelConfig {
    /// Maximum duration before a query times out, e.g. "30s" or "5m"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timeout: String,

    /// Korrel8r instance the panel connects to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub korrel8r: Option<Korrel8rReference>,
}

/// Reference to a Korrel8r instance. Empty fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Korrel8rReference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// Options for the distributed tracing plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributedTracingConfig {
    /// Maximum duration before a query times out, e.g. "30s" or "5m"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timeout: String,
}

// =============================================================================
// Status
// =============================================================================

/// Observed state of a UIPlugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UIPluginStatus {
    /// Conditions, at most one per type
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// =============================================================================
// Implementations
// =============================================================================

impl UIPluginSpec {
    /// Check the spec for combinations the schema cannot express
    pub fn validate(&self) -> Result<()> {
        match self.r#type {
            UIPluginType::Dashboards => {
                if self.troubleshooting_panel.is_some() || self.distributed_tracing.is_some() {
                    return Err(Error::InvalidSpec(
                        "Dashboards plugin does not accept a configuration block".into(),
                    ));
                }
            }
            UIPluginType::DistributedTracing => {
                if self.troubleshooting_panel.is_some() {
                    return Err(Error::InvalidSpec(
                        "troubleshootingPanel set on a DistributedTracing plugin".into(),
                    ));
                }
            }
            UIPluginType::TroubleshootingPanel => {
                if self.distributed_tracing.is_some() {
                    return Err(Error::InvalidSpec(
                        "distributedTracing set on a TroubleshootingPanel plugin".into(),
                    ));
                }
            }
        }

        let timeout = self
            .troubleshooting_panel
            .as_ref()
            .map(|c| c.timeout.as_str())
            .or_else(|| self.distributed_tracing.as_ref().map(|c| c.timeout.as_str()))
            .unwrap_or_default();

        if !timeout.is_empty() && !is_valid_timeout(timeout) {
            return Err(Error::InvalidSpec(format!(
                "timeout {:?} must be digits followed by 's' or 'm'",
                timeout
            )));
        }

        Ok(())
    }
}

/// Matches `^[0-9]+[sm]$`
fn is_valid_timeout(value: &str) -> bool {
    match value.strip_suffix(['s', 'm']) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

impl UIPlugin {
    /// Plugin name for log labels, "unknown" when unset
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Plugin name, required for anything derived from it
    pub fn required_name(&self) -> Result<&str> {
        self.metadata
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidSpec("metadata.name is required".to_string()))
    }

    /// Current metadata generation, 0 when unset
    pub fn generation(&self) -> i64 {
        self.metadata.generation.unwrap_or(0)
    }

    /// Stored conditions, empty when no status has been written
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}

impl UIPluginStatus {
    /// Merge a condition using the current time. Returns true when the
    /// status changed and must be written back.
    pub fn set_condition(&mut self, condition: Condition) -> bool {
        let ConditionUpdate {
            conditions,
            changed,
        } = reconcile_condition(&self.conditions, condition, chrono::Utc::now());
        self.conditions = conditions;
        changed
    }
}
