//! Dashboards plugin
//!
//! Serves custom dashboards through its own backend, reached via an
//! authorized proxy to the plugin service.

use std::collections::BTreeMap;

use super::PluginInfo;
use crate::crd::{ConsolePluginProxy, ConsolePluginProxyServiceConfig, UIPlugin};

pub const CONSOLE_NAME: &str = "console-dashboards-plugin";
pub const DISPLAY_NAME: &str = "Console Enhanced Dashboards";

pub const BACKEND_PROXY_ALIAS: &str = "backend";
pub const BACKEND_PORT: i32 = 9443;

pub(super) fn create_plugin_info(
    plugin: &UIPlugin,
    namespace: &str,
    name: &str,
    image: &str,
) -> PluginInfo {
    PluginInfo {
        image: image.to_string(),
        name: plugin.name().to_string(),
        console_name: CONSOLE_NAME.to_string(),
        display_name: DISPLAY_NAME.to_string(),
        resource_namespace: namespace.to_string(),
        loki_service_names: BTreeMap::new(),
        extra_args: Vec::new(),
        proxies: vec![ConsolePluginProxy::service(
            BACKEND_PROXY_ALIAS,
            true,
            ConsolePluginProxyServiceConfig {
                name: name.to_string(),
                namespace: namespace.to_string(),
                port: BACKEND_PORT,
            },
        )],
        config_map: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::UIPluginType;
    use crate::plugin::build_plugin_info;
    use crate::plugin::tests::{plugin, spec};

    #[test]
    fn test_dashboards_descriptor() {
        let p = plugin("dashboards", spec(UIPluginType::Dashboards));
        let features = vec!["ignored".to_string()];
        let name = "observability-ui-dashboards";
        let info = build_plugin_info(&p, "coo", name, "img", &features).unwrap();

        assert_eq!(info.console_name, CONSOLE_NAME);
        assert_eq!(info.display_name, DISPLAY_NAME);
        assert!(info.extra_args.is_empty());
        assert!(info.config_map.is_none());
        assert_eq!(info.config_payload(), None);

        assert_eq!(info.proxies.len(), 1);
        assert_eq!(info.proxies[0].alias, "backend");
        assert!(info.proxies[0].authorize);
        assert_eq!(info.proxies[0].service.name, "observability-ui-dashboards");
        assert_eq!(info.proxies[0].service.namespace, "coo");
        assert_eq!(info.proxies[0].service.port, 9443);
    }
}
