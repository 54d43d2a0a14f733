//! Member entity - one row of the active or withdrawn roster

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{pad_row, MEMBER_COLUMNS};

use super::profile::RemoteProfile;

// ============================================================================
// Enumerations
// ============================================================================

/// Member role inside the community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Staff,
    #[default]
    Member,
}

impl Role {
    /// Label stored in the roster
    pub fn label(self) -> &'static str {
        match self {
            Self::Leader => "모임장",
            Self::Staff => "운영진",
            Self::Member => "일반",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "모임장" | "leader" => Ok(Self::Leader),
            "운영진" | "staff" => Ok(Self::Staff),
            "일반" | "member" => Ok(Self::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Whether the member is still part of the community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Current,
    Withdrawn,
}

impl MembershipStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "현재회원",
            Self::Withdrawn => "탈퇴회원",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "현재회원" | "current" => Ok(Self::Current),
            "탈퇴회원" | "withdrawn" => Ok(Self::Withdrawn),
            other => Err(format!("unknown membership status: {other}")),
        }
    }
}

/// Time-windowed activity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    New,
    Active,
    Normal,
    Inactive,
    Withdrawn,
}

impl ActivityStatus {
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Active,
        Self::Normal,
        Self::Inactive,
        Self::Withdrawn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "신입",
            Self::Active => "활성",
            Self::Normal => "보통",
            Self::Inactive => "비활성",
            Self::Withdrawn => "탈퇴",
        }
    }
}

impl FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "신입" | "new" => Ok(Self::New),
            "활성" | "active" => Ok(Self::Active),
            "보통" | "normal" => Ok(Self::Normal),
            "비활성" | "inactive" => Ok(Self::Inactive),
            "탈퇴" | "withdrawn" => Ok(Self::Withdrawn),
            other => Err(format!("unknown activity status: {other}")),
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Member
// ============================================================================

/// Roster member
///
/// Optional text columns use an empty string for "absent", mirroring the row
/// schema. `id` and `memo` are owned by the roster and never come from the
/// remote snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Member {
    pub id: String,
    pub nickname: String,
    pub real_name: String,
    pub role: Role,
    pub status: MembershipStatus,
    pub activity: ActivityStatus,
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

/// Fields a synchronization update must carry over from the persisted row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreservedFields {
    pub id: String,
    pub memo: String,
}

impl PreservedFields {
    /// Fresh identity for a member the roster has never seen
    pub fn fresh() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            memo: String::new(),
        }
    }

    /// Identity carried by an existing roster member
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            memo: member.memo.clone(),
        }
    }
}

impl Member {
    /// Rebuild a full roster record from remote data and preserved fields
    pub fn build(profile: &RemoteProfile, preserved: PreservedFields) -> Self {
        Self {
            id: preserved.id,
            nickname: profile.nickname.clone(),
            real_name: profile.real_name.clone(),
            role: profile.role,
            status: profile.status,
            activity: profile.activity,
            join_date: profile.join_date.clone(),
            last_visit: profile.last_visit.clone(),
            leave_date: profile.leave_date.clone(),
            age: profile.age.clone(),
            gender: profile.gender.clone(),
            location: profile.location.clone(),
            workplace: profile.workplace.clone(),
            study_area: profile.study_area.clone(),
            study_content: profile.study_content.clone(),
            study_days: profile.study_days.clone(),
            article_count: profile.article_count,
            intro_text: profile.intro_text.clone(),
            intro_date: profile.intro_date.clone(),
            memo: preserved.memo,
        }
    }

    /// Copy of this member rewritten for the withdrawn roster
    pub fn withdrawn_on(&self, today: &str) -> Self {
        Self {
            status: MembershipStatus::Withdrawn,
            activity: ActivityStatus::Withdrawn,
            leave_date: today.to_string(),
            ..self.clone()
        }
    }

    /// Serialize to the fixed 20-column row
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.nickname.clone(),
            self.real_name.clone(),
            self.role.label().to_string(),
            self.status.label().to_string(),
            self.activity.label().to_string(),
            self.join_date.clone(),
            self.last_visit.clone(),
            self.leave_date.clone(),
            self.age.clone(),
            self.gender.clone(),
            self.location.clone(),
            self.workplace.clone(),
            self.study_area.clone(),
            self.study_content.clone(),
            self.study_days.clone(),
            self.article_count.to_string(),
            self.intro_text.clone(),
            self.intro_date.clone(),
            self.memo.clone(),
        ]
    }

    /// Parse a stored row; short rows are padded, unknown labels fall back to defaults
    pub fn from_row(row: &[String]) -> Self {
        let cells = pad_row(row.to_vec(), MEMBER_COLUMNS);
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();

        Self {
            id: next(),
            nickname: next(),
            real_name: next(),
            role: next().parse().unwrap_or_default(),
            status: next().parse().unwrap_or_default(),
            activity: next().parse().unwrap_or_default(),
            join_date: next(),
            last_visit: next(),
            leave_date: next(),
            age: next(),
            gender: next(),
            location: next(),
            workplace: next(),
            study_area: next(),
            study_content: next(),
            study_days: next(),
            article_count: next().trim().parse().unwrap_or(0),
            intro_text: next(),
            intro_date: next(),
            memo: next(),
        }
    }
}
