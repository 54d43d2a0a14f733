//! Audit log entity - append-only record of roster changes

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

use crate::value_objects::{pad_row, AUDIT_COLUMNS};

/// What happened to the member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditAction {
    /// New member inserted by synchronization
    SyncNewMember,
    /// Active member found banned during synchronization and moved
    SyncWithdrawalDetected,
    /// Banned member never seen before, imported straight into the withdrawn roster
    SyncWithdrawnImport,
    ManualRegistration,
    ManualEdit,
    ManualWithdrawal,
    /// Tag written by something else
    Other(String),
}

impl AuditAction {
    pub fn label(&self) -> &str {
        match self {
            Self::SyncNewMember => "초기동기화",
            Self::SyncWithdrawalDetected => "탈퇴(동기화)",
            Self::SyncWithdrawnImport => "탈퇴회원연동",
            Self::ManualRegistration => "가입",
            Self::ManualEdit => "정보 수정",
            Self::ManualWithdrawal => "탈퇴",
            Self::Other(tag) => tag,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "초기동기화" => Self::SyncNewMember,
            "탈퇴(동기화)" => Self::SyncWithdrawalDetected,
            "탈퇴회원연동" => Self::SyncWithdrawnImport,
            "가입" => Self::ManualRegistration,
            "정보 수정" => Self::ManualEdit,
            "탈퇴" => Self::ManualWithdrawal,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AuditAction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Who made the change
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    System,
    Human(String),
}

impl Operator {
    pub const SYSTEM: &'static str = "System";

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | Self::SYSTEM => Self::System,
            other => Self::Human(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::System => Self::SYSTEM,
            Self::Human(id) => id,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: String,
    pub member_id: String,
    pub action: AuditAction,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
    pub operator: Operator,
}

impl AuditLogEntry {
    /// New entry with a fresh id
    pub fn new(
        member_id: impl Into<String>,
        action: AuditAction,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
        operator: Operator,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            member_id: member_id.into(),
            action,
            detail: detail.into(),
            timestamp,
            operator,
        }
    }

    /// Entry authored by the synchronization run
    pub fn system(
        member_id: impl Into<String>,
        action: AuditAction,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(member_id, action, detail, timestamp, Operator::System)
    }

    /// Serialize to the fixed 6-column row
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.member_id.clone(),
            self.action.label().to_string(),
            self.detail.clone(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.operator.to_string(),
        ]
    }

    /// Parse a stored row; unparseable timestamps sort as the Unix epoch
    pub fn from_row(row: &[String]) -> Self {
        let cells = pad_row(row.to_vec(), AUDIT_COLUMNS);
        let timestamp = DateTime::parse_from_rfc3339(cells[4].trim())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH);

        Self {
            id: cells[0].clone(),
            member_id: cells[1].clone(),
            action: AuditAction::from_label(&cells[2]),
            detail: cells[3].clone(),
            timestamp,
            operator: Operator::parse(&cells[5]),
        }
    }
}
