//! # roster-service
//!
//! Application layer: the synchronization engine (article harvesting, intro
//! attribution, roster reconciliation), manual member administration, the
//! audit log and roster statistics.

pub mod dto;
pub mod services;

pub use dto::SyncResult;
pub use services::{
    ArticleHarvester, AuditLogService, IntroAttributor, MemberService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StatisticsService, SyncService,
};
