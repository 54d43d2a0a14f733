//! Domain entities - core business objects

mod article;
mod audit_log;
mod intro;
mod member;
mod profile;
mod remote;

pub use article::{ArticlePage, Cursor, RawArticle, JOIN_POST_CATEGORY};
pub use audit_log::{AuditAction, AuditLogEntry, Operator};
pub use intro::{IntroField, IntroFields, ParsedIntro};
pub use member::{ActivityStatus, Member, MembershipStatus, PreservedFields, Role};
pub use profile::RemoteProfile;
pub use remote::{MemberSnapshot, RemoteMember};
