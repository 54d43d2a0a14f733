//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Enumerated columns (role, status, activity) are accepted either as the
//! stored Korean label or the English name.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Member Requests
// ============================================================================

/// Optional member columns shared by create and update
///
/// Every field left out keeps its current (or default) value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    #[validate(length(max = 64, message = "Real name must be at most 64 characters"))]
    pub real_name: Option<String>,

    pub role: Option<String>,

    pub status: Option<String>,

    pub activity_status: Option<String>,

    #[validate(length(max = 10, message = "Dates use YYYY-MM-DD"))]
    pub join_date: Option<String>,

    #[validate(length(max = 10, message = "Dates use YYYY-MM-DD"))]
    pub last_visit: Option<String>,

    #[validate(length(max = 10, message = "Dates use YYYY-MM-DD"))]
    pub leave_date: Option<String>,

    #[validate(length(max = 32))]
    pub age: Option<String>,

    #[validate(length(max = 16))]
    pub gender: Option<String>,

    #[validate(length(max = 128))]
    pub location: Option<String>,

    #[validate(length(max = 128))]
    pub workplace: Option<String>,

    #[validate(length(max = 128))]
    pub study_area: Option<String>,

    #[validate(length(max = 500))]
    pub study_content: Option<String>,

    #[validate(length(max = 128))]
    pub study_days: Option<String>,

    pub article_count: Option<u32>,

    #[validate(length(max = 2000, message = "Intro text must be at most 2000 characters"))]
    pub intro_text: Option<String>,

    #[validate(length(max = 10, message = "Dates use YYYY-MM-DD"))]
    pub intro_date: Option<String>,

    #[validate(length(max = 2000, message = "Memo must be at most 2000 characters"))]
    pub memo: Option<String>,
}

/// Manual member registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub details: MemberDetails,
}

/// Partial member update; `id` in the body is ignored
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub details: MemberDetails,
}

/// Query filters for listing members
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFilter {
    pub activity_status: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}
