//! Audit log service

use tracing::instrument;

use roster_core::entities::AuditLogEntry;
use roster_core::value_objects::{RowRange, AUDIT_COLUMNS};

use crate::dto::AuditLogResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Audit log service
pub struct AuditLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every entry with an id, newest first
    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> ServiceResult<Vec<AuditLogResponse>> {
        let collection = &self.ctx.collections().audit;
        let rows = self
            .ctx
            .store()
            .read_rows(collection, &RowRange::columns(collection, AUDIT_COLUMNS))
            .await?;

        let mut entries: Vec<AuditLogEntry> = rows
            .iter()
            .skip(1)
            .map(|row| AuditLogEntry::from_row(row))
            .filter(|entry| !entry.id.is_empty())
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(entries.into_iter().map(AuditLogResponse::from).collect())
    }
}
