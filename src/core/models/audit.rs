use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application-wide action log entry.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppLog {
    pub id: String,
    pub action: String,
    pub user_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    #[schema(value_type = String, example = "2026-08-07T20:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

/// Per-group audit trail entry, persisted alongside the group.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupAudit {
    pub id: String,
    pub group_id: String,
    pub action: String,
    pub user_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    #[schema(value_type = String, example = "2026-08-07T20:30:00Z")]
    pub timestamp: DateTime<Utc>,
}
