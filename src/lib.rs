//! UIPlugin Operator - console plugin descriptor synthesis
//!
//! Derives the deployable bundle for an observability console plugin from a
//! `UIPlugin` custom resource, and decides when the resource's status
//! conditions need to be written back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────────┐     ┌──────────────┐
//! │   UIPlugin   │────▶│    Plugin Descriptor Builder │────▶│  PluginInfo  │──▶ applier
//! │    (spec)    │     │  ┌────────────┐ ┌──────────┐ │     └──────────────┘
//! └──────────────┘     │  │  Config    │ │ LokiStack│ │
//!                      │  │  Encoder   │ │ Discovery│ │
//!                      │  └────────────┘ └──────────┘ │
//!                      └──────────────────────────────┘
//!
//! observed state ──▶ Condition Reconciler ──▶ UIPlugin status
//! ```
//!
//! # Modules
//!
//! - [`crd`]: UIPlugin resource, conditions and console proxy types
//! - [`plugin`]: Descriptor builder, config encoder and gateway discovery
//! - [`status`]: Condition reconciliation
//! - [`domain`]: Cluster lookup ports
//! - [`config`]: Operator configuration and manifest loading
//! - [`error`]: Error types and handling

pub mod config;
pub mod crd;
pub mod domain;
pub mod error;
pub mod plugin;
pub mod status;

// Re-export commonly used types
pub use config::{load_plugin_manifest, OperatorConfig};

pub use crd::{
    Condition, ConditionStatus, ConditionType, ConsolePluginProxy,
    ConsolePluginProxyServiceConfig, ConsolePluginProxyType, DistributedTracingConfig,
    Korrel8rReference, TroubleshootingPanelConfig, UIPlugin, UIPluginSpec, UIPluginStatus,
    UIPluginType,
};

pub use domain::ports::{ServiceLister, ServiceListerRef};

pub use error::{Error, ErrorAction, ErrorKind, Result};

pub use plugin::{
    build_plugin_info, discover_loki_services, encode_plugin_config, find_lokistack_gateway,
    generated_resource_name, KubeServiceLister, PluginConfig, PluginInfo,
};

pub use status::{reconcile_condition, ConditionUpdate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
