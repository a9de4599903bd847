//! Operator configuration
//!
//! Images and feature flags per plugin type, plus loading UIPlugin manifests
//! from disk.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::crd::{UIPlugin, UIPluginType};
use crate::error::{Error, Result};

/// Namespace the operator deploys plugin resources into by default
pub const DEFAULT_NAMESPACE: &str = "openshift-cluster-observability-operator";

/// Settings shared by every UIPlugin the operator manages
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    /// Namespace for generated resources
    pub namespace: String,
    /// Container image per plugin type
    pub images: BTreeMap<UIPluginType, String>,
    /// Feature flags passed to each plugin type
    pub features: BTreeMap<UIPluginType, Vec<String>>,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            images: BTreeMap::new(),
            features: BTreeMap::new(),
        }
    }
}

impl OperatorConfig {
    /// Image configured for `plugin_type`
    pub fn image_for(&self, plugin_type: UIPluginType) -> Result<&str> {
        self.images
            .get(&plugin_type)
            .map(String::as_str)
            .filter(|image| !image.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!("no image configured for {} plugin", plugin_type))
            })
    }

    /// Feature flags for `plugin_type`, empty when none are configured
    pub fn features_for(&self, plugin_type: UIPluginType) -> &[String] {
        self.features
            .get(&plugin_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Set the image for a plugin type, ignoring empty values
    pub fn with_image(mut self, plugin_type: UIPluginType, image: Option<String>) -> Self {
        if let Some(image) = image.filter(|i| !i.is_empty()) {
            self.images.insert(plugin_type, image);
        }
        self
    }

    /// Set the feature flags for a plugin type
    pub fn with_features(mut self, plugin_type: UIPluginType, features: Vec<String>) -> Self {
        if !features.is_empty() {
            self.features.insert(plugin_type, features);
        }
        self
    }
}

/// Read a UIPlugin manifest (YAML or JSON) from `path`
pub fn load_plugin_manifest(path: impl AsRef<Path>) -> Result<UIPlugin> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let plugin: UIPlugin = serde_yaml::from_str(&raw)
        .map_err(|e| Error::ManifestParse(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), plugin = plugin.name(), "Loaded UIPlugin manifest");
    Ok(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{Condition, ConditionStatus, ConditionType};
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_image_lookup() {
        let config = OperatorConfig::default()
            .with_image(UIPluginType::TroubleshootingPanel, Some("quay.io/tp:v1".into()))
            .with_image(UIPluginType::Dashboards, Some(String::new()));

        assert_eq!(config.image_for(UIPluginType::TroubleshootingPanel).unwrap(), "quay.io/tp:v1");
        assert_matches!(
            config.image_for(UIPluginType::Dashboards),
            Err(Error::Configuration(_))
        );
    }

    #[test]
    fn test_features_lookup() {
        let config = OperatorConfig::default()
            .with_features(UIPluginType::TroubleshootingPanel, vec!["a".into(), "b".into()]);
        assert_eq!(config.features_for(UIPluginType::TroubleshootingPanel), ["a", "b"]);
        assert!(config.features_for(UIPluginType::DistributedTracing).is_empty());
    }

    #[test]
    fn test_load_plugin_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"apiVersion: observability.openshift.io/v1alpha1
kind: UIPlugin
metadata:
  name: troubleshooting-panel
  generation: 2
spec:
  type: TroubleshootingPanel
  troubleshootingPanel:
    timeout: 5m
"#
        )
        .unwrap();

        let plugin = load_plugin_manifest(file.path()).unwrap();
        assert_eq!(plugin.name(), "troubleshooting-panel");
        assert_eq!(plugin.generation(), 2);
        assert_eq!(plugin.spec.r#type, UIPluginType::TroubleshootingPanel);
        assert!(plugin.conditions().is_empty());
    }

    #[test]
    fn test_foreign_conditions_survive_load_and_merge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"apiVersion: observability.openshift.io/v1alpha1
kind: UIPlugin
metadata:
  name: dashboards
  generation: 3
spec:
  type: Dashboards
status:
  conditions:
  - type: Degraded
    status: Degraded
    reason: PodCrashLoop
    message: backend restarting
    observedGeneration: 3
    lastTransitionTime: "2024-01-01T00:00:00Z"
"#
        )
        .unwrap();

        let plugin = load_plugin_manifest(file.path()).unwrap();
        let stored = plugin.conditions();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].r#type, ConditionType::Other("Degraded".into()));
        assert_eq!(stored[0].status, ConditionStatus::Degraded);

        let mut status = plugin.status.clone().unwrap();
        let changed = status.set_condition(Condition::new(
            ConditionType::Reconciled,
            ConditionStatus::True,
            "ReconcileSucceeded",
            "",
            3,
        ));
        assert!(changed);
        assert_eq!(status.conditions.len(), 2);
        assert_eq!(status.conditions[0], stored[0]);
        assert_eq!(status.conditions[1].r#type, ConditionType::Reconciled);
    }

    #[test]
    fn test_load_invalid_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "spec: [not, a, plugin]").unwrap();
        assert_matches!(load_plugin_manifest(file.path()), Err(Error::ManifestParse(_)));

        assert_matches!(
            load_plugin_manifest("/nonexistent/uiplugin.yaml"),
            Err(Error::Io(_))
        );
    }
}
