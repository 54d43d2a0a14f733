//! Integration test utilities for the roster server
//!
//! Boots the API against an in-memory row store and a mock platform.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
