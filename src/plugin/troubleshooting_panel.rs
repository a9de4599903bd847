//! Troubleshooting panel plugin
//!
//! The panel talks to Korrel8r through a console service proxy and reads an
//! optional query timeout from its config file.

use std::collections::BTreeMap;

use super::{config_file_args, encoded_config_map, PluginInfo};
use crate::crd::{
    ConsolePluginProxy, ConsolePluginProxyServiceConfig, Korrel8rReference, UIPlugin,
};
use crate::error::Result;

pub const CONSOLE_NAME: &str = "troubleshooting-panel-console-plugin";
pub const DISPLAY_NAME: &str = "Troubleshooting Panel Console Plugin";

pub const DEFAULT_KORREL8R_NAME: &str = "korrel8r";
pub const DEFAULT_KORREL8R_NAMESPACE: &str = "korrel8r";
pub const KORREL8R_PROXY_ALIAS: &str = "korrel8r";
pub const KORREL8R_PORT: i32 = 8443;

pub(super) fn create_plugin_info(
    plugin: &UIPlugin,
    namespace: &str,
    name: &str,
    image: &str,
    features: &[String],
) -> Result<PluginInfo> {
    let panel = plugin.spec.troubleshooting_panel.as_ref();

    let config_map = encoded_config_map(plugin, name, namespace, panel)?;
    let korrel8r = resolve_korrel8r_target(panel.and_then(|p| p.korrel8r.as_ref()));

    Ok(PluginInfo {
        image: image.to_string(),
        name: plugin.name().to_string(),
        console_name: CONSOLE_NAME.to_string(),
        display_name: DISPLAY_NAME.to_string(),
        resource_namespace: namespace.to_string(),
        loki_service_names: BTreeMap::new(),
        extra_args: config_file_args(features),
        proxies: vec![ConsolePluginProxy::service(
            KORREL8R_PROXY_ALIAS,
            false,
            korrel8r,
        )],
        config_map: Some(config_map),
    })
}

/// Korrel8r service the panel proxies to. Empty or missing fields resolve
/// to [`DEFAULT_KORREL8R_NAME`] / [`DEFAULT_KORREL8R_NAMESPACE`].
pub fn resolve_korrel8r_target(
    reference: Option<&Korrel8rReference>,
) -> ConsolePluginProxyServiceConfig {
    let name = reference.map(|r| r.name.as_str()).unwrap_or_default();
    let namespace = reference.map(|r| r.namespace.as_str()).unwrap_or_default();

    ConsolePluginProxyServiceConfig {
        name: or_default(name, DEFAULT_KORREL8R_NAME),
        namespace: or_default(namespace, DEFAULT_KORREL8R_NAMESPACE),
        port: KORREL8R_PORT,
    }
}

fn or_default(value: &str, default: &str) -> String {
    let resolved = if value.is_empty() { default } else { value };
    resolved.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{ConsolePluginProxyType, TroubleshootingPanelConfig, UIPluginType};
    use crate::plugin::tests::{plugin, spec};
    use crate::plugin::{build_plugin_info, CONFIG_FILE_KEY};

    fn panel_plugin(config: Option<TroubleshootingPanelConfig>) -> UIPlugin {
        let mut s = spec(UIPluginType::TroubleshootingPanel);
        s.troubleshooting_panel = config;
        plugin("troubleshooting-panel", s)
    }

    fn features(list: &[&str]) -> Vec<String> {
        list.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_config_block() {
        let info = build_plugin_info(
            &panel_plugin(None),
            "openshift-cluster-observability-operator",
            "observability-ui-troubleshooting-panel",
            "quay.io/tp:latest",
            &[],
        )
        .unwrap();

        assert_eq!(info.name, "troubleshooting-panel");
        assert_eq!(info.console_name, CONSOLE_NAME);
        assert_eq!(info.display_name, DISPLAY_NAME);
        assert_eq!(info.image, "quay.io/tp:latest");
        assert!(info.loki_service_names.is_empty());
        assert_eq!(
            info.extra_args,
            vec!["-plugin-config-path=/etc/plugin/config/config.yaml".to_string()]
        );

        assert_eq!(info.proxies.len(), 1);
        let proxy = &info.proxies[0];
        assert_eq!(proxy.r#type, ConsolePluginProxyType::Service);
        assert_eq!(proxy.alias, "korrel8r");
        assert!(!proxy.authorize);
        assert_eq!(
            proxy.service,
            ConsolePluginProxyServiceConfig {
                name: "korrel8r".into(),
                namespace: "korrel8r".into(),
                port: 8443,
            }
        );

        let cm = info.config_map.as_ref().unwrap();
        assert_eq!(cm.metadata.name.as_deref(), Some("observability-ui-troubleshooting-panel"));
        assert_eq!(
            cm.metadata.namespace.as_deref(),
            Some("openshift-cluster-observability-operator")
        );
        assert_eq!(cm.data.as_ref().map(|d| d.len()), Some(1));
        assert_eq!(info.config_payload(), Some(""));
    }

    #[test]
    fn test_korrel8r_override() {
        let info = build_plugin_info(
            &panel_plugin(Some(TroubleshootingPanelConfig {
                timeout: String::new(),
                korrel8r: Some(Korrel8rReference {
                    name: "k".into(),
                    namespace: "ns2".into(),
                }),
            })),
            "ns",
            "cm",
            "img",
            &[],
        )
        .unwrap();

        assert_eq!(
            info.proxies[0].service,
            ConsolePluginProxyServiceConfig {
                name: "k".into(),
                namespace: "ns2".into(),
                port: 8443,
            }
        );
    }

    #[test]
    fn test_partial_override_keeps_other_default() {
        let target = resolve_korrel8r_target(Some(&Korrel8rReference {
            name: String::new(),
            namespace: "observability".into(),
        }));
        assert_eq!(target.name, DEFAULT_KORREL8R_NAME);
        assert_eq!(target.namespace, "observability");
    }

    #[test]
    fn test_features_flag() {
        let p = panel_plugin(None);

        let info = build_plugin_info(&p, "ns", "cm", "img", &features(&["a", "b"])).unwrap();
        assert_eq!(info.extra_args.last().map(String::as_str), Some("-features=a,b"));

        let info = build_plugin_info(&p, "ns", "cm", "img", &[]).unwrap();
        assert!(info.extra_args.iter().all(|a| !a.starts_with("-features=")));
    }

    #[test]
    fn test_timeout_lands_in_config_map() {
        let info = build_plugin_info(
            &panel_plugin(Some(TroubleshootingPanelConfig {
                timeout: "30s".into(),
                korrel8r: None,
            })),
            "ns",
            "cm",
            "img",
            &[],
        )
        .unwrap();

        let data = info.config_map.unwrap().data.unwrap();
        assert_eq!(data.get(CONFIG_FILE_KEY).map(String::as_str), Some("timeout: 30s\n"));
    }
}
