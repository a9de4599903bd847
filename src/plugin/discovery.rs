//! LokiStack gateway discovery
//!
//! Finds the gateway service the LokiStack operator creates for a stack.
//! Gateways are recognised by name and by the `managed-by` label; no other
//! labels are consulted.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams};
use kube::Client;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::ports::ServiceLister;
use crate::error::Result;

pub const GATEWAY_NAME_FRAGMENT: &str = "gateway";
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
pub const LOKISTACK_CONTROLLER: &str = "lokistack-controller";

// =============================================================================
// Kubernetes Adapter
// =============================================================================

/// Lists services through the Kubernetes API
#[derive(Clone)]
pub struct KubeServiceLister {
    client: Client,
}

impl KubeServiceLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceLister for KubeServiceLister {
    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items)
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Name of the LokiStack gateway service in `namespace`.
///
/// Returns `None` when no service qualifies. If several do, the
/// lexicographically smallest name wins so the answer does not depend on
/// listing order.
pub async fn find_lokistack_gateway(
    lister: &dyn ServiceLister,
    namespace: &str,
) -> Result<Option<String>> {
    let services = lister.list_services(namespace).await?;
    let gateway = select_gateway(&services);

    debug!(
        namespace,
        candidates = services.len(),
        gateway = gateway.as_deref().unwrap_or(""),
        "LokiStack gateway lookup"
    );

    Ok(gateway)
}

/// Gateways for each namespace in `namespaces`, keyed by namespace.
/// Namespaces without a gateway are left out.
pub async fn discover_loki_services(
    lister: &dyn ServiceLister,
    namespaces: &[String],
) -> Result<BTreeMap<String, String>> {
    let mut found = BTreeMap::new();
    for namespace in namespaces {
        if let Some(gateway) = find_lokistack_gateway(lister, namespace).await? {
            found.insert(namespace.clone(), gateway);
        }
    }
    info!(requested = namespaces.len(), found = found.len(), "LokiStack discovery finished");
    Ok(found)
}

fn select_gateway(services: &[Service]) -> Option<String> {
    services
        .iter()
        .filter_map(|svc| svc.metadata.name.as_deref().map(|name| (name, svc)))
        .filter(|(name, _)| name.contains(GATEWAY_NAME_FRAGMENT))
        .filter(|(_, svc)| is_managed_by_lokistack(svc))
        .map(|(name, _)| name)
        .min()
        .map(str::to_string)
}

fn is_managed_by_lokistack(service: &Service) -> bool {
    service
        .metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(MANAGED_BY_LABEL))
        .is_some_and(|value| value == LOKISTACK_CONTROLLER)
}
