//! Plugin descriptor synthesis
//!
//! Turns a [`UIPlugin`] into a [`PluginInfo`]: everything the applier needs
//! to deploy the console plugin (image, arguments, proxies and the generated
//! configuration). Descriptors are rebuilt on every reconciliation and never
//! stored.

pub mod config;
pub mod dashboards;
pub mod discovery;
pub mod distributed_tracing;
pub mod troubleshooting_panel;

pub use config::*;
pub use discovery::*;
pub use troubleshooting_panel::{
    resolve_korrel8r_target, DEFAULT_KORREL8R_NAME, DEFAULT_KORREL8R_NAMESPACE,
};

use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::crd::{ConsolePluginProxy, UIPlugin, UIPluginType};
use crate::error::{Error, Result};

/// Where the plugin container finds its configuration file
pub const PLUGIN_CONFIG_PATH: &str = "/etc/plugin/config/config.yaml";

/// Prefix of every resource generated for a UIPlugin
pub const RESOURCE_NAME_PREFIX: &str = "observability-ui-";

// =============================================================================
// Plugin Info
// =============================================================================

/// Deployable description of a console plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub image: String,
    /// Name of the owning UIPlugin
    pub name: String,
    /// ConsolePlugin resource name
    pub console_name: String,
    pub display_name: String,
    pub resource_namespace: String,
    /// LokiStack identifier to gateway service name
    pub loki_service_names: BTreeMap<String, String>,
    pub extra_args: Vec<String>,
    pub proxies: Vec<ConsolePluginProxy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMap>,
}

impl PluginInfo {
    /// Attach discovered LokiStack gateways
    pub fn with_loki_services(mut self, services: BTreeMap<String, String>) -> Self {
        self.loki_service_names.extend(services);
        self
    }

    /// Contents of the generated config file, if this plugin has one
    pub fn config_payload(&self) -> Option<&str> {
        self.config_map
            .as_ref()
            .and_then(|cm| cm.data.as_ref())
            .and_then(|data| data.get(CONFIG_FILE_KEY))
            .map(String::as_str)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Build the descriptor for `plugin`.
///
/// `name` names the generated resources (see [`generated_resource_name`]),
/// `namespace` is where they are deployed. `features` are passed to the
/// plugin verbatim and in order.
pub fn build_plugin_info(
    plugin: &UIPlugin,
    namespace: &str,
    name: &str,
    image: &str,
    features: &[String],
) -> Result<PluginInfo> {
    let plugin_name = plugin.required_name()?;
    plugin.spec.validate()?;

    debug!(
        plugin = plugin_name,
        plugin_type = %plugin.spec.r#type,
        namespace,
        "Building plugin descriptor"
    );

    let info = match plugin.spec.r#type {
        UIPluginType::Dashboards => dashboards::create_plugin_info(plugin, namespace, name, image),
        UIPluginType::DistributedTracing => {
            distributed_tracing::create_plugin_info(plugin, namespace, name, image, features)?
        }
        UIPluginType::TroubleshootingPanel => {
            troubleshooting_panel::create_plugin_info(plugin, namespace, name, image, features)?
        }
    };

    info!(
        plugin = plugin_name,
        console_name = %info.console_name,
        proxies = info.proxies.len(),
        "Plugin descriptor built"
    );

    Ok(info)
}

/// Name shared by the resources generated for `plugin`
pub fn generated_resource_name(plugin: &UIPlugin) -> Result<String> {
    Ok(format!("{}{}", RESOURCE_NAME_PREFIX, plugin.required_name()?))
}

/// Arguments for plugins that read a config file
fn config_file_args(features: &[String]) -> Vec<String> {
    let mut args = vec![format!("-plugin-config-path={}", PLUGIN_CONFIG_PATH)];
    if !features.is_empty() {
        args.push(format!("-features={}", features.join(",")));
    }
    args
}

/// ConfigMap for a plugin that reads its config from a file. An encoder
/// fault fails the whole descriptor for `plugin`.
fn encoded_config_map<C: PluginConfig>(
    plugin: &UIPlugin,
    name: &str,
    namespace: &str,
    cfg: Option<&C>,
) -> Result<ConfigMap> {
    let payload =
        encode_plugin_config(cfg).map_err(|e| Error::descriptor_build(plugin.name(), e))?;
    Ok(plugin_config_map(name, namespace, payload))
}

/// ConfigMap holding the encoded plugin config under [`CONFIG_FILE_KEY`]
fn plugin_config_map(name: &str, namespace: &str, payload: String) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(CONFIG_FILE_KEY.to_string(), payload)])),
        ..Default::default()
    }
}
