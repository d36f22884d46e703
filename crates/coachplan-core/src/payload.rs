//! JSON shapes exchanged with the backend when a plan is submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Plan;

/// A plan as stored by the backend after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPlanRecord {
    pub id: Uuid,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub plan: Plan,
}

/// Request body for plan creation: the plan itself, camelCased.
pub fn plan_payload_json(plan: &Plan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}
