//! Ports implemented by infrastructure adapters

mod ports;

pub use ports::{ArticleFeed, MemberSource, RepoResult, Row, RowStore};
