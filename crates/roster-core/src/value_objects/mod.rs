//! Value objects - immutable types that represent domain concepts

pub mod lenient;
mod row;
mod timestamp;

pub use row::{
    column_letter, pad_row, RangeUpdate, RowIndex, RowRange, AUDIT_COLUMNS, AUDIT_HEADER,
    MEMBER_COLUMNS, MEMBER_HEADER,
};
pub use timestamp::{date_string, today_string, EpochSeconds, DATE_FORMAT, PLATFORM_EPOCH_SHIFT};
