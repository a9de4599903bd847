//! Domain Ports - cluster lookups used during descriptor synthesis
//!
//! Synthesis only reads from the cluster; writes belong to the applier that
//! consumes the finished descriptor.

use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use std::sync::Arc;

// =============================================================================
// Service Lister Port
// =============================================================================

/// Port for listing services in a namespace
#[async_trait]
pub trait ServiceLister: Send + Sync {
    /// List all services in `namespace`, in the order the cluster returns them
    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>>;
}

pub type ServiceListerRef = Arc<dyn ServiceLister>;
