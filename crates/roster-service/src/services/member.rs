//! Member service
//!
//! Manual administration of the active roster: listing, lookup, registration,
//! partial edits and withdrawal. Every write appends an audit entry and holds
//! the same guard as synchronization runs.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use tracing::{info, instrument};
use validator::Validate;

use roster_core::entities::{
    ActivityStatus, AuditAction, AuditLogEntry, Member, MembershipStatus, Operator,
    PreservedFields, Role,
};
use roster_core::value_objects::{today_string, RowRange, AUDIT_COLUMNS, MEMBER_COLUMNS};
use roster_core::DomainError;

use crate::dto::{
    CreateMemberRequest, MemberDetails, MemberFilter, MemberResponse, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::roster::LoadedRoster;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List members, reading the withdrawn roster when the filter asks for withdrawn status
    #[instrument(skip(self))]
    pub async fn list_members(&self, filter: MemberFilter) -> ServiceResult<Vec<MemberResponse>> {
        let activity = parse_label::<ActivityStatus>("activityStatus", filter.activity_status.as_deref())?;
        let role = parse_label::<Role>("role", filter.role.as_deref())?;
        let status = parse_label::<MembershipStatus>("status", filter.status.as_deref())?;

        let collections = self.ctx.collections();
        let collection = if status == Some(MembershipStatus::Withdrawn) {
            &collections.withdrawn
        } else {
            &collections.active
        };
        let roster = LoadedRoster::load(self.ctx.store(), collection).await?;

        Ok(roster
            .members()
            .filter(|m| activity.is_none_or(|a| m.activity == a))
            .filter(|m| role.is_none_or(|r| m.role == r))
            .filter(|m| status.is_none_or(|s| m.status == s))
            .map(MemberResponse::from)
            .collect())
    }

    /// Get an active member by id
    #[instrument(skip(self))]
    pub async fn get_member(&self, id: &str) -> ServiceResult<MemberResponse> {
        let roster = self.active_roster().await?;
        let entry = roster
            .by_id(id)
            .ok_or_else(|| ServiceError::not_found("Member", id))?;
        Ok(MemberResponse::from(&entry.member))
    }

    /// Register a member by hand
    #[instrument(skip(self, request), fields(nickname = %request.nickname))]
    pub async fn create_member(
        &self,
        request: CreateMemberRequest,
        operator: Operator,
        now: DateTime<Utc>,
    ) -> ServiceResult<MemberResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let _guard = self.ctx.try_lock_writes()?;

        let nickname = request.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(ServiceError::validation("Nickname must not be blank"));
        }

        let roster = self.active_roster().await?;
        if roster.contains_nickname(&nickname) {
            return Err(DomainError::NicknameTaken(nickname).into());
        }

        let today = today_string(now);
        let mut member = Member {
            id: PreservedFields::fresh().id,
            real_name: nickname.clone(),
            nickname,
            join_date: today.clone(),
            last_visit: today,
            ..Member::default()
        };
        apply_details(&mut member, &request.details)?;

        let collections = self.ctx.collections();
        self.ctx
            .store()
            .append_row(
                &collections.active,
                &RowRange::columns(&collections.active, MEMBER_COLUMNS),
                member.to_row(),
            )
            .await?;

        self.audit(AuditLogEntry::new(
            member.id.clone(),
            AuditAction::ManualRegistration,
            format!("신규 회원 {} 등록", member.nickname),
            now,
            operator,
        ))
        .await?;

        info!(member_id = %member.id, "Member registered");
        Ok(MemberResponse::from(member))
    }

    /// Apply a partial update; absent fields keep their stored values
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        id: &str,
        request: UpdateMemberRequest,
        operator: Operator,
        now: DateTime<Utc>,
    ) -> ServiceResult<MemberResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let _guard = self.ctx.try_lock_writes()?;

        let roster = self.active_roster().await?;
        let entry = roster
            .by_id(id)
            .ok_or_else(|| ServiceError::not_found("Member", id))?;
        let mut member = entry.member.clone();

        let mut changed = Vec::new();
        if let Some(nickname) = &request.nickname {
            let nickname = nickname.trim();
            if nickname.is_empty() {
                return Err(ServiceError::validation("Nickname must not be blank"));
            }
            if nickname != member.nickname && roster.contains_nickname(nickname) {
                return Err(DomainError::NicknameTaken(nickname.to_string()).into());
            }
            member.nickname = nickname.to_string();
            changed.push("nickname");
        }
        changed.extend(apply_details(&mut member, &request.details)?);

        if changed.is_empty() {
            return Err(ServiceError::validation("No fields to update"));
        }

        let range = RowRange::row(roster.collection(), entry.index, MEMBER_COLUMNS);
        self.ctx.store().update_range(&range, member.to_row()).await?;

        self.audit(AuditLogEntry::new(
            member.id.clone(),
            AuditAction::ManualEdit,
            format!("{} 변경됨", changed.join(", ")),
            now,
            operator,
        ))
        .await?;

        info!(member_id = %member.id, fields = changed.len(), "Member updated");
        Ok(MemberResponse::from(member))
    }

    /// Move a member to the withdrawn roster
    #[instrument(skip(self))]
    pub async fn withdraw_member(
        &self,
        id: &str,
        operator: Operator,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        let _guard = self.ctx.try_lock_writes()?;

        let roster = self.active_roster().await?;
        let entry = roster
            .by_id(id)
            .ok_or_else(|| ServiceError::not_found("Member", id))?;
        let moved = entry.member.withdrawn_on(&today_string(now));

        let collections = self.ctx.collections();
        let store = self.ctx.store();
        store
            .append_row(
                &collections.withdrawn,
                &RowRange::columns(&collections.withdrawn, MEMBER_COLUMNS),
                moved.to_row(),
            )
            .await?;

        let collection_id = store
            .resolve_collection_id(roster.collection())
            .await?
            .ok_or_else(|| DomainError::CollectionNotFound(roster.collection().to_string()))?;
        store.delete_row(collection_id, entry.index).await?;

        self.audit(AuditLogEntry::new(
            moved.id.clone(),
            AuditAction::ManualWithdrawal,
            "회원 탈퇴 처리",
            now,
            operator,
        ))
        .await?;

        info!(member_id = %moved.id, "Member withdrawn");
        Ok(())
    }

    async fn active_roster(&self) -> ServiceResult<LoadedRoster> {
        LoadedRoster::load(self.ctx.store(), &self.ctx.collections().active).await
    }

    async fn audit(&self, entry: AuditLogEntry) -> ServiceResult<()> {
        let audit = &self.ctx.collections().audit;
        self.ctx
            .store()
            .append_row(audit, &RowRange::columns(audit, AUDIT_COLUMNS), entry.to_row())
            .await?;
        Ok(())
    }
}

fn parse_label<T: FromStr<Err = String>>(field: &str, value: Option<&str>) -> ServiceResult<Option<T>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| ServiceError::validation(format!("{field}: {e}"))),
    }
}

/// Copy provided columns onto `member`, returning their names in column order
fn apply_details(member: &mut Member, details: &MemberDetails) -> ServiceResult<Vec<&'static str>> {
    let mut changed = Vec::new();

    macro_rules! text {
        ($field:ident, $name:literal) => {
            if let Some(value) = &details.$field {
                member.$field = value.clone();
                changed.push($name);
            }
        };
    }

    text!(real_name, "realName");
    if let Some(role) = parse_label::<Role>("role", details.role.as_deref())? {
        member.role = role;
        changed.push("role");
    }
    if let Some(status) = parse_label::<MembershipStatus>("status", details.status.as_deref())? {
        member.status = status;
        changed.push("status");
    }
    if let Some(activity) =
        parse_label::<ActivityStatus>("activityStatus", details.activity_status.as_deref())?
    {
        member.activity = activity;
        changed.push("activityStatus");
    }
    text!(join_date, "joinDate");
    text!(last_visit, "lastVisit");
    text!(leave_date, "leaveDate");
    text!(age, "age");
    text!(gender, "gender");
    text!(location, "location");
    text!(workplace, "workplace");
    text!(study_area, "studyArea");
    text!(study_content, "studyContent");
    text!(study_days, "studyDays");
    if let Some(count) = details.article_count {
        member.article_count = count;
        changed.push("articleCount");
    }
    text!(intro_text, "introText");
    text!(intro_date, "introDate");
    text!(memo, "memo");

    Ok(changed)
}
