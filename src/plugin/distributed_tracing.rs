//! Distributed tracing plugin

use std::collections::BTreeMap;

use super::{config_file_args, encoded_config_map, PluginInfo};
use crate::crd::UIPlugin;
use crate::error::Result;

pub const CONSOLE_NAME: &str = "distributed-tracing-console-plugin";
pub const DISPLAY_NAME: &str = "Distributed Tracing Console Plugin";

pub(super) fn create_plugin_info(
    plugin: &UIPlugin,
    namespace: &str,
    name: &str,
    image: &str,
    features: &[String],
) -> Result<PluginInfo> {
    let tracing_config = plugin.spec.distributed_tracing.as_ref();
    let config_map = encoded_config_map(plugin, name, namespace, tracing_config)?;

    Ok(PluginInfo {
        image: image.to_string(),
        name: plugin.name().to_string(),
        console_name: CONSOLE_NAME.to_string(),
        display_name: DISPLAY_NAME.to_string(),
        resource_namespace: namespace.to_string(),
        loki_service_names: BTreeMap::new(),
        extra_args: config_file_args(features),
        proxies: Vec::new(),
        config_map: Some(config_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{DistributedTracingConfig, UIPluginType};
    use crate::plugin::build_plugin_info;
    use crate::plugin::tests::{plugin, spec};

    #[test]
    fn test_distributed_tracing_descriptor() {
        let mut s = spec(UIPluginType::DistributedTracing);
        s.distributed_tracing = Some(DistributedTracingConfig {
            timeout: "5m".into(),
        });
        let features = vec!["dt-beta".to_string()];
        let p = plugin("distributed-tracing", s);
        let info = build_plugin_info(&p, "coo", "cm", "img", &features).unwrap();

        assert_eq!(info.console_name, CONSOLE_NAME);
        assert_eq!(info.display_name, DISPLAY_NAME);
        assert!(info.proxies.is_empty());
        assert_eq!(
            info.extra_args,
            vec![
                "-plugin-config-path=/etc/plugin/config/config.yaml".to_string(),
                "-features=dt-beta".to_string(),
            ]
        );
        assert_eq!(info.config_payload(), Some("timeout: 5m\n"));
    }

    #[test]
    fn test_distributed_tracing_without_config() {
        let p = plugin("distributed-tracing", spec(UIPluginType::DistributedTracing));
        let info = build_plugin_info(&p, "coo", "cm", "img", &[]).unwrap();
        assert_eq!(info.config_payload(), Some(""));
        assert_eq!(info.extra_args.len(), 1);
    }
}
