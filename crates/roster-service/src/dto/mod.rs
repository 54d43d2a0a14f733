//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateMemberRequest, MemberDetails, MemberFilter, UpdateMemberRequest};

pub use responses::{
    AuditLogListResponse, AuditLogResponse, HealthResponse, MemberDetailResponse,
    MemberListResponse, MemberResponse, MutationResponse, StatisticsEnvelope, StatisticsResponse,
    SyncFailure, SyncResult,
};
