//! Plugin configuration encoder
//!
//! Serializes a plugin's configuration block into the YAML file mounted at
//! [`PLUGIN_CONFIG_PATH`](super::PLUGIN_CONFIG_PATH).

use serde::Serialize;

use crate::crd::{DistributedTracingConfig, TroubleshootingPanelConfig};
use crate::error::Result;

/// Data key of the generated ConfigMap
pub const CONFIG_FILE_KEY: &str = "config.yaml";

/// A configuration block that can be rendered into the plugin config file
pub trait PluginConfig {
    /// Serialized form written to [`CONFIG_FILE_KEY`]
    type File: Serialize;

    /// File contents, `None` when nothing in the block is set
    fn config_file(&self) -> Option<Self::File>;
}

impl PluginConfig for TroubleshootingPanelConfig {
    type File = PluginConfigFile;

    fn config_file(&self) -> Option<PluginConfigFile> {
        PluginConfigFile::with_timeout(&self.timeout)
    }
}

impl PluginConfig for DistributedTracingConfig {
    type File = PluginConfigFile;

    fn config_file(&self) -> Option<PluginConfigFile> {
        PluginConfigFile::with_timeout(&self.timeout)
    }
}

/// Contents of the mounted config file
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct PluginConfigFile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
}

impl PluginConfigFile {
    fn with_timeout(timeout: &str) -> Option<Self> {
        if timeout.is_empty() {
            return None;
        }
        Some(Self {
            timeout: timeout.to_string(),
        })
    }
}

/// Encode a configuration block as YAML.
///
/// Returns an empty string when there is no block or nothing in it is set.
pub fn encode_plugin_config<C: PluginConfig>(cfg: Option<&C>) -> Result<String> {
    match cfg.and_then(C::config_file) {
        Some(file) => Ok(serde_yaml::to_string(&file)?),
        None => Ok(String::new()),
    }
}
