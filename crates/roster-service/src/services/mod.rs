//! Business logic services
//!
//! This module contains the synchronization engine and the roster use cases
//! exposed over HTTP.

pub mod attribution;
pub mod audit_log;
pub mod context;
pub mod error;
pub mod harvester;
pub mod member;
pub mod roster;
pub mod statistics;
pub mod sync;

#[cfg(test)]
mod testing;

// Re-export all services for convenience
pub use attribution::{Attribution, IntroAttributor};
pub use audit_log::AuditLogService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use harvester::{ArticleHarvester, Harvest, HarvestStop};
pub use member::MemberService;
pub use roster::{LoadedRoster, RosterEntry};
pub use statistics::StatisticsService;
pub use sync::{SyncPlan, SyncService};
