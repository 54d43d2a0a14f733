//! Axum extractors for request handling

mod operator;
mod query;
mod validated;

pub use operator::{OperatorId, OPERATOR_HEADER};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
