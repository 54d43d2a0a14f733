//! Domain entity to DTO conversions

use roster_core::entities::{AuditLogEntry, Member};

use super::responses::{AuditLogResponse, MemberResponse};

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            role: member.role.label().to_string(),
            status: member.status.label().to_string(),
            activity_status: member.activity.label().to_string(),
            id: member.id,
            nickname: member.nickname,
            real_name: member.real_name,
            join_date: member.join_date,
            last_visit: member.last_visit,
            leave_date: member.leave_date,
            age: member.age,
            gender: member.gender,
            location: member.location,
            workplace: member.workplace,
            study_area: member.study_area,
            study_content: member.study_content,
            study_days: member.study_days,
            article_count: member.article_count,
            intro_text: member.intro_text,
            intro_date: member.intro_date,
            memo: member.memo,
        }
    }
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self::from(member.clone())
    }
}

impl From<AuditLogEntry> for AuditLogResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            action: entry.action.label().to_string(),
            operator_id: entry.operator.to_string(),
            id: entry.id,
            member_id: entry.member_id,
            detail: entry.detail,
            timestamp: entry.timestamp,
        }
    }
}
