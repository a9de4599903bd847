//! Console plugin proxy types
//!
//! Mirrors the proxy section of `console.openshift.io/v1alpha1` ConsolePlugin,
//! which is not part of k8s-openapi.

use serde::{Deserialize, Serialize};

/// Proxy kind. Only in-cluster services are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsolePluginProxyType {
    Service,
}

/// Route the console forwards plugin requests through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginProxy {
    pub r#type: ConsolePluginProxyType,
    /// Path segment under which the console exposes the proxy
    pub alias: String,
    /// Forward the user's bearer token
    pub authorize: bool,
    pub service: ConsolePluginProxyServiceConfig,
}

/// Target service of a proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolePluginProxyServiceConfig {
    pub name: String,
    pub namespace: String,
    pub port: i32,
}

impl ConsolePluginProxy {
    /// Service proxy to `name.namespace:port`
    pub fn service(
        alias: impl Into<String>,
        authorize: bool,
        service: ConsolePluginProxyServiceConfig,
    ) -> Self {
        Self {
            r#type: ConsolePluginProxyType::Service,
            alias: alias.into(),
            authorize,
            service,
        }
    }
}
