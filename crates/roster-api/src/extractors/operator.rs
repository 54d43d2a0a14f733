//! Operator extractor
//!
//! Manual edits are attributed to whoever the client names in `X-Operator-Id`.
//! A missing or blank header means the system itself.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use roster_core::entities::Operator;

use crate::response::ApiError;

/// Header carrying the acting operator
pub const OPERATOR_HEADER: &str = "x-operator-id";

/// Operator attributed in audit entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorId(pub Operator);

impl OperatorId {
    fn from_parts(parts: &Parts) -> Result<Self, ApiError> {
        let Some(value) = parts.headers.get(OPERATOR_HEADER) else {
            return Ok(Self(Operator::System));
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::InvalidHeader(OPERATOR_HEADER))?;
        Ok(Self(Operator::parse(value)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OperatorId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)
    }
}
