//! Route handlers

pub mod health;
pub mod logs;
pub mod members;
pub mod statistics;
pub mod sync;
