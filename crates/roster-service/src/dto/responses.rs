//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase keys.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Synchronization
// ============================================================================

/// Outcome of a synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    /// New rows in the active roster
    pub inserted_count: usize,
    /// Rows rewritten in place plus rows moved to the withdrawn roster
    pub updated_count: usize,
    /// Nicknames of new members; withdrawn imports carry a ` (탈퇴)` suffix
    pub inserted_names: Vec<String>,
    /// Records in the remote snapshot
    pub remote_member_total: usize,
}

/// Body returned when a run fails
#[derive(Debug, Clone, Serialize)]
pub struct SyncFailure {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl SyncFailure {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
        }
    }
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member as shown to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub nickname: String,
    pub real_name: String,
    pub role: String,
    pub status: String,
    pub activity_status: String,
    pub join_date: String,
    pub last_visit: String,
    pub leave_date: String,
    pub age: String,
    pub gender: String,
    pub location: String,
    pub workplace: String,
    pub study_area: String,
    pub study_content: String,
    pub study_days: String,
    pub article_count: u32,
    pub intro_text: String,
    pub intro_date: String,
    pub memo: String,
}

#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, Serialize)]
pub struct MemberDetailResponse {
    pub member: MemberResponse,
}

/// Acknowledgement of a write
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
        }
    }
}

// ============================================================================
// Audit Log Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: String,
    pub member_id: String,
    pub action: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
    pub operator_id: String,
}

#[derive(Debug, Serialize)]
pub struct AuditLogListResponse {
    pub logs: Vec<AuditLogResponse>,
}

// ============================================================================
// Statistics Responses
// ============================================================================

/// Histograms over the active roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total: usize,
    pub current: usize,
    pub left: usize,
    pub activity_stats: BTreeMap<String, usize>,
    pub region_stats: BTreeMap<String, usize>,
    pub study_stats: BTreeMap<String, usize>,
    pub monthly_joins: BTreeMap<String, usize>,
    pub day_stats: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsEnvelope {
    pub stats: StatisticsResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
