//! Database models

mod row;

pub use row::{CollectionModel, RowModel};
