//! # roster-core
//!
//! Domain layer containing member and audit entities, value objects for the
//! positional row schema, the intro/activity rules, and the ports implemented by
//! the persistence and remote-platform adapters.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod rules;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityStatus, ArticlePage, AuditAction, AuditLogEntry, Cursor, IntroField, IntroFields,
    Member, MembershipStatus, Operator, ParsedIntro, PreservedFields, RawArticle, RemoteMember,
    RemoteProfile, Role,
};
pub use error::DomainError;
pub use rules::{has_intro_label, looks_like_intro, parse_intro, ActivityClassifier};
pub use traits::{ArticleFeed, MemberSource, RepoResult, Row, RowStore};
pub use value_objects::{EpochSeconds, RangeUpdate, RowIndex, RowRange};
