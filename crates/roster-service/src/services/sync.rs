//! Roster synchronization
//!
//! One run pulls the remote member snapshot and the recent articles feed,
//! reconciles them against the active and withdrawn rosters, and writes the
//! differences back:
//!
//! | active roster | withdrawn roster | banned | action                               |
//! |---------------|------------------|--------|--------------------------------------|
//! | yes           | -                | no     | rebuild row in place, keep id + memo |
//! | yes           | -                | yes    | move row to the withdrawn roster     |
//! | no            | no               | yes    | import into the withdrawn roster     |
//! | no            | yes              | yes    | nothing                              |
//! | no            | -                | no     | insert into the active roster        |
//!
//! Writes happen in a fixed order: in-place updates (chunked), withdrawn
//! appends, active deletions from the bottom up, new active rows, audit rows.
//! A failed write step is logged and the remaining steps still run.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, error, info, instrument, warn};

use roster_core::entities::{
    AuditAction, AuditLogEntry, Member, PreservedFields, RemoteMember, RemoteProfile,
};
use roster_core::rules::ActivityClassifier;
use roster_core::traits::Row;
use roster_core::value_objects::{RangeUpdate, RowIndex, RowRange, AUDIT_COLUMNS, MEMBER_COLUMNS};
use roster_core::DomainError;

use crate::dto::SyncResult;

use super::attribution::{Attribution, IntroAttributor};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::harvester::ArticleHarvester;
use super::roster::LoadedRoster;

/// An active row leaving the roster
#[derive(Debug, Clone)]
pub struct PlannedMove {
    pub index: RowIndex,
    /// Withdrawn copy to append; `None` when one is already there
    pub copy: Option<Row>,
    pub audit: Row,
}

/// A row appended to a roster together with its audit entry
#[derive(Debug, Clone)]
pub struct PlannedRow {
    pub row: Row,
    pub audit: Row,
    /// Entry for the reported names list
    pub name: String,
    /// Position of the record in the snapshot
    pub position: usize,
}

/// Writes decided by one reconciliation pass
#[derive(Debug, Default)]
pub struct SyncPlan {
    /// In-place rewrites of active rows whose content changed
    pub updates: Vec<RangeUpdate>,
    pub moves: Vec<PlannedMove>,
    /// Banned members seen for the first time, straight into the withdrawn roster
    pub imports: Vec<PlannedRow>,
    /// New members for the active roster
    pub inserts: Vec<PlannedRow>,
    /// Active rows already up to date
    pub unchanged: usize,
}

impl SyncPlan {
    /// Decide every write for a snapshot; performs no I/O
    pub fn build(
        remote: &[RemoteMember],
        attribution: &Attribution,
        active: &LoadedRoster,
        withdrawn: &LoadedRoster,
        now: DateTime<Utc>,
    ) -> Self {
        let classifier = ActivityClassifier::new(now);
        let mut plan = Self::default();
        let mut seen = HashSet::new();

        for (position, record) in remote.iter().enumerate() {
            let Some(profile) = RemoteProfile::assemble(
                record,
                attribution.intro(&record.member_id),
                attribution.article_count(&record.member_id),
                &classifier,
            ) else {
                debug!(member_id = %record.member_id, "Skipping record without a display name");
                continue;
            };

            let nickname = profile.nickname.clone();
            if !seen.insert(nickname.clone()) {
                warn!(nickname = %nickname, "Nickname appears twice in snapshot, keeping the first");
                continue;
            }

            match active.by_nickname(&nickname) {
                Some(entry) if profile.banned => {
                    let moved = Member::build(&profile, PreservedFields::from_member(&entry.member));
                    // a previous run may have copied the row but failed to delete it
                    let copy = if withdrawn.contains_nickname(&nickname) {
                        debug!(nickname = %nickname, "Withdrawn copy exists, deleting the active row only");
                        None
                    } else {
                        Some(moved.to_row())
                    };
                    plan.moves.push(PlannedMove {
                        index: entry.index,
                        copy,
                        audit: AuditLogEntry::system(
                            moved.id.clone(),
                            AuditAction::SyncWithdrawalDetected,
                            format!("동기화 중 탈퇴 감지: [{nickname}] 탈퇴 처리 및 데이터 이동"),
                            now,
                        )
                        .to_row(),
                    });
                }
                Some(entry) => {
                    let rebuilt =
                        Member::build(&profile, PreservedFields::from_member(&entry.member)).to_row();
                    if rebuilt == entry.row {
                        plan.unchanged += 1;
                    } else {
                        let range = RowRange::row(active.collection(), entry.index, MEMBER_COLUMNS);
                        plan.updates.push(RangeUpdate::new(range, rebuilt));
                    }
                }
                None if profile.banned => {
                    if withdrawn.contains_nickname(&nickname) {
                        continue;
                    }
                    let member = Member::build(&profile, PreservedFields::fresh());
                    plan.imports.push(PlannedRow {
                        audit: AuditLogEntry::system(
                            member.id.clone(),
                            AuditAction::SyncWithdrawnImport,
                            format!("소모임 앱 연동: [{nickname}] 동기화 시 신규 탈퇴회원으로 정보 수집"),
                            now,
                        )
                        .to_row(),
                        row: member.to_row(),
                        name: format!("{nickname} (탈퇴)"),
                        position,
                    });
                }
                None => {
                    let member = Member::build(&profile, PreservedFields::fresh());
                    plan.inserts.push(PlannedRow {
                        audit: AuditLogEntry::system(
                            member.id.clone(),
                            AuditAction::SyncNewMember,
                            format!("소모임 앱 연동: [{nickname}] 신규/데이터 동기화"),
                            now,
                        )
                        .to_row(),
                        row: member.to_row(),
                        name: nickname,
                        position,
                    });
                }
            }
        }

        plan
    }
}

/// Row indices in the order they must be deleted: highest first, no repeats
pub fn deletion_order(mut indices: Vec<RowIndex>) -> Vec<RowIndex> {
    indices.sort_unstable_by(|a, b| b.cmp(a));
    indices.dedup();
    indices
}

/// Synchronization service
pub struct SyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SyncService<'a> {
    /// Create a new SyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run a synchronization against the current time
    pub async fn run(&self) -> ServiceResult<SyncResult> {
        self.run_at(Utc::now()).await
    }

    /// Run a synchronization with `now` as the reference instant
    ///
    /// Fails when another run or manual write is in progress, when the
    /// snapshot cannot be fetched, or when a roster cannot be read. Failed
    /// writes are logged and only lower the reported counts.
    #[instrument(skip(self))]
    pub async fn run_at(&self, now: DateTime<Utc>) -> ServiceResult<SyncResult> {
        let _guard = self.ctx.try_lock_writes()?;

        let snapshot = self.ctx.member_source().fetch_members().await?;
        info!(
            count = snapshot.members.len(),
            raw_total = snapshot.raw_total,
            "Remote snapshot fetched"
        );

        let harvest = ArticleHarvester::new(self.ctx.article_feed(), self.ctx.sync_config().max_pages)
            .harvest()
            .await;
        let attribution = IntroAttributor::attribute(&harvest.articles);
        debug!(intros = attribution.intro_count(), "Articles attributed");

        let collections = self.ctx.collections();
        let active = LoadedRoster::load(self.ctx.store(), &collections.active).await?;
        let withdrawn = LoadedRoster::load(self.ctx.store(), &collections.withdrawn).await?;

        let plan = SyncPlan::build(&snapshot.members, &attribution, &active, &withdrawn, now);
        info!(
            updates = plan.updates.len(),
            unchanged = plan.unchanged,
            moves = plan.moves.len(),
            imports = plan.imports.len(),
            inserts = plan.inserts.len(),
            "Reconciliation planned"
        );

        let result = self.apply(plan, snapshot.raw_total).await;
        info!(
            inserted = result.inserted_count,
            updated = result.updated_count,
            "Synchronization finished"
        );
        Ok(result)
    }

    /// Write a plan step by step
    ///
    /// A failed step is logged and skipped. Rows are only deleted from the
    /// active roster once their withdrawn copy exists, and audit entries are
    /// written only for the writes that landed, so a later run repairs what
    /// this one missed.
    async fn apply(&self, plan: SyncPlan, remote_total: usize) -> SyncResult {
        let store = self.ctx.store();
        let collections = self.ctx.collections();
        let chunk_size = self.ctx.sync_config().update_chunk_size.max(1);
        let mut updated = 0;
        let mut inserted = 0;
        let mut names = Vec::new();
        let mut audit = Vec::new();

        for (i, chunk) in plan.updates.chunks(chunk_size).enumerate() {
            match store.batch_update(chunk.to_vec()).await {
                Ok(()) => updated += chunk.len(),
                Err(e) => {
                    error!(chunk = i + 1, size = chunk.len(), error = %e, "Batch update failed, continuing");
                }
            }
        }

        let copies: Vec<Row> = plan
            .moves
            .iter()
            .filter_map(|m| m.copy.clone())
            .chain(plan.imports.iter().map(|r| r.row.clone()))
            .collect();
        let copies_written = if copies.is_empty() {
            true
        } else {
            let range = RowRange::columns(&collections.withdrawn, MEMBER_COLUMNS);
            match store.append_rows(&collections.withdrawn, &range, copies).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Withdrawn roster append failed, keeping active rows");
                    false
                }
            }
        };

        if copies_written {
            for import in plan.imports {
                names.push((import.position, import.name));
                audit.push(import.audit);
            }
        }

        let mut pending: BTreeMap<RowIndex, Row> = plan
            .moves
            .into_iter()
            .filter(|m| copies_written || m.copy.is_none())
            .map(|m| (m.index, m.audit))
            .collect();
        if !pending.is_empty() {
            match self.active_collection_id().await {
                Ok(collection_id) => {
                    for index in deletion_order(pending.keys().copied().collect()) {
                        match store.delete_row(collection_id, index).await {
                            Ok(()) => {
                                updated += 1;
                                audit.extend(pending.remove(&index));
                            }
                            Err(e) => {
                                error!(row = index.row_number(), error = %e, "Active row delete failed, continuing");
                            }
                        }
                    }
                }
                Err(e) => error!(error = %e, "Active roster id unavailable, skipping deletions"),
            }
        }

        if !plan.inserts.is_empty() {
            let rows = plan.inserts.iter().map(|r| r.row.clone()).collect();
            let range = RowRange::columns(&collections.active, MEMBER_COLUMNS);
            match store.append_rows(&collections.active, &range, rows).await {
                Ok(()) => {
                    inserted = plan.inserts.len();
                    for insert in plan.inserts {
                        names.push((insert.position, insert.name));
                        audit.push(insert.audit);
                    }
                }
                Err(e) => error!(count = plan.inserts.len(), error = %e, "Active roster append failed"),
            }
        }

        if !audit.is_empty() {
            let range = RowRange::columns(&collections.audit, AUDIT_COLUMNS);
            let count = audit.len();
            if let Err(e) = store.append_rows(&collections.audit, &range, audit).await {
                error!(count, error = %e, "Audit log append failed");
            }
        }

        names.sort_by_key(|(position, _)| *position);
        SyncResult {
            success: true,
            inserted_count: inserted,
            updated_count: updated,
            inserted_names: names.into_iter().map(|(_, name)| name).collect(),
            remote_member_total: remote_total,
        }
    }

    async fn active_collection_id(&self) -> ServiceResult<i64> {
        let name = &self.ctx.collections().active;
        let id = self
            .ctx
            .store()
            .resolve_collection_id(name)
            .await?
            .ok_or_else(|| DomainError::CollectionNotFound(name.clone()))?;
        Ok(id)
    }
}
