//! Condition reconciliation
//!
//! Decides whether a freshly computed condition changes the stored status.
//! Unchanged conditions are left untouched so repeated reconciliations do
//! not churn `lastTransitionTime` or trigger status writes.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::crd::Condition;

/// Outcome of merging a candidate condition into a stored set
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionUpdate {
    /// Condition set to persist
    pub conditions: Vec<Condition>,
    /// Whether a status write is required
    pub changed: bool,
}

/// Merge `candidate` into `current`.
///
/// A missing type is appended as-is. An equivalent stored condition is kept
/// and no write is requested. A differing one is replaced in place with its
/// transition time set to `now`.
pub fn reconcile_condition(
    current: &[Condition],
    candidate: Condition,
    now: DateTime<Utc>,
) -> ConditionUpdate {
    let mut conditions = current.to_vec();

    match conditions.iter().position(|c| c.r#type == candidate.r#type) {
        None => {
            debug!(condition = %candidate.r#type, status = %candidate.status, "Adding condition");
            conditions.push(candidate);
            ConditionUpdate {
                conditions,
                changed: true,
            }
        }
        Some(idx) if conditions[idx].is_equivalent(&candidate) => ConditionUpdate {
            conditions,
            changed: false,
        },
        Some(idx) => {
            debug!(
                condition = %candidate.r#type,
                from = %conditions[idx].status,
                to = %candidate.status,
                "Condition transitioned"
            );
            conditions[idx] = Condition {
                last_transition_time: now,
                ..candidate
            };
            ConditionUpdate {
                conditions,
                changed: true,
            }
        }
    }
}
