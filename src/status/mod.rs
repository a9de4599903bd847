//! UIPlugin status handling
//!
//! Builds candidate conditions from reconciliation outcomes and merges them
//! into the stored status.

pub mod conditions;

pub use conditions::*;

use crate::crd::{Condition, ConditionStatus, ConditionType};

pub const REASON_RECONCILE_SUCCEEDED: &str = "ReconcileSucceeded";
pub const REASON_RECONCILE_FAILED: &str = "ReconcileFailed";
pub const REASON_PLUGIN_AVAILABLE: &str = "PluginAvailable";
pub const REASON_PLUGIN_UNAVAILABLE: &str = "PluginUnavailable";
pub const REASON_LOKISTACK_FOUND: &str = "LokiStackFound";
pub const REASON_LOKISTACK_NOT_FOUND: &str = "LokiStackNotFound";

/// `Reconciled` condition for the outcome of a pass
pub fn reconciled_condition<T>(generation: i64, outcome: &crate::Result<T>) -> Condition {
    match outcome {
        Ok(_) => Condition::new(
            ConditionType::Reconciled,
            ConditionStatus::True,
            REASON_RECONCILE_SUCCEEDED,
            "",
            generation,
        ),
        Err(e) => Condition::new(
            ConditionType::Reconciled,
            ConditionStatus::False,
            REASON_RECONCILE_FAILED,
            e.to_string(),
            generation,
        ),
    }
}

/// `Available` condition for the plugin workload
pub fn available_condition(generation: i64, ready: bool) -> Condition {
    let (reason, message) = if ready {
        (REASON_PLUGIN_AVAILABLE, "")
    } else {
        (REASON_PLUGIN_UNAVAILABLE, "plugin deployment has no ready replicas")
    };
    Condition::new(ConditionType::Available, ready.into(), reason, message, generation)
}

/// `ResourceDiscovery` condition after looking for LokiStack gateways
pub fn resource_discovery_condition(generation: i64, gateways_found: usize) -> Condition {
    if gateways_found > 0 {
        Condition::new(
            ConditionType::ResourceDiscovery,
            ConditionStatus::True,
            REASON_LOKISTACK_FOUND,
            format!("found {} LokiStack gateway(s)", gateways_found),
            generation,
        )
    } else {
        Condition::new(
            ConditionType::ResourceDiscovery,
            ConditionStatus::False,
            REASON_LOKISTACK_NOT_FOUND,
            "no LokiStack gateway service found",
            generation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::UIPluginStatus;
    use crate::Error;

    #[test]
    fn test_reconciled_condition() {
        let ok = reconciled_condition(4, &Ok::<_, Error>(()));
        assert_eq!(ok.status, ConditionStatus::True);
        assert_eq!(ok.reason, REASON_RECONCILE_SUCCEEDED);
        assert_eq!(ok.observed_generation, 4);

        let failed = reconciled_condition::<()>(4, &Err(Error::InvalidSpec("bad".into())));
        assert_eq!(failed.status, ConditionStatus::False);
        assert_eq!(failed.reason, REASON_RECONCILE_FAILED);
        assert_eq!(failed.message, "Invalid UIPlugin spec: bad");
    }

    #[test]
    fn test_available_condition() {
        assert_eq!(available_condition(1, true).status, ConditionStatus::True);
        let down = available_condition(1, false);
        assert_eq!(down.status, ConditionStatus::False);
        assert_eq!(down.reason, REASON_PLUGIN_UNAVAILABLE);
    }

    #[test]
    fn test_resource_discovery_condition() {
        assert_eq!(resource_discovery_condition(1, 2).reason, REASON_LOKISTACK_FOUND);
        assert_eq!(resource_discovery_condition(1, 0).status, ConditionStatus::False);
    }

    #[test]
    fn test_status_set_condition_twice() {
        let mut status = UIPluginStatus::default();
        assert!(status.set_condition(reconciled_condition(2, &Ok::<_, Error>(()))));
        assert!(!status.set_condition(reconciled_condition(2, &Ok::<_, Error>(()))));
        assert!(status.set_condition(available_condition(2, true)));
        assert_eq!(status.conditions.len(), 2);
    }
}
