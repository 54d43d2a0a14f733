//! Row addressing for the positional row store
//!
//! Collections are addressed in A1 notation. Row 1 is always the header row, so
//! the first data row is row number 2 and sits at 0-based index 1.

use std::fmt;

/// Number of columns in a member roster row (A..T)
pub const MEMBER_COLUMNS: usize = 20;

/// Number of columns in an audit log row (A..F)
pub const AUDIT_COLUMNS: usize = 6;

/// Header row written when a roster collection is created
pub const MEMBER_HEADER: [&str; MEMBER_COLUMNS] = [
    "ID", "닉네임", "실명", "역할", "회원상태", "활동상태", "가입일", "최근방문", "탈퇴일", "나이",
    "성별", "지역", "직장", "공부분야", "공부내용", "공부요일", "게시글수", "자기소개", "소개작성일", "메모",
];

/// Header row of the audit log collection
pub const AUDIT_HEADER: [&str; AUDIT_COLUMNS] = ["ID", "회원ID", "활동", "상세", "시각", "처리자"];

/// 0-based row position inside a collection (header = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(usize);

impl RowIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// 1-based A1 row number
    #[inline]
    pub const fn row_number(self) -> usize {
        self.0 + 1
    }

    /// Whether this index points at the header row
    #[inline]
    pub const fn is_header(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A1 range inside a named collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowRange {
    collection: String,
    width: usize,
    row_number: Option<usize>,
}

impl RowRange {
    /// Whole-column range, e.g. `members!A:T`
    pub fn columns(collection: impl Into<String>, width: usize) -> Self {
        Self {
            collection: collection.into(),
            width,
            row_number: None,
        }
    }

    /// Single-row range, e.g. `members!A5:T5`
    pub fn row(collection: impl Into<String>, index: RowIndex, width: usize) -> Self {
        Self {
            collection: collection.into(),
            width,
            row_number: Some(index.row_number()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Target index for single-row ranges
    pub fn index(&self) -> Option<RowIndex> {
        self.row_number.map(|n| RowIndex::new(n - 1))
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = column_letter(self.width);
        match self.row_number {
            Some(n) => write!(f, "{}!A{n}:{last}{n}", self.collection),
            None => write!(f, "{}!A:{last}", self.collection),
        }
    }
}

/// A single-row write inside a batch update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUpdate {
    pub range: RowRange,
    pub row: Vec<String>,
}

impl RangeUpdate {
    pub fn new(range: RowRange, row: Vec<String>) -> Self {
        Self { range, row }
    }
}

/// Column letter for a 1-based column count (1 => A, 20 => T)
pub fn column_letter(width: usize) -> char {
    let offset = width.clamp(1, 26) - 1;
    char::from(b'A' + offset as u8)
}

/// Pad or truncate a row to exactly `width` cells
///
/// Stores drop trailing empty cells, so rows read back are often short.
pub fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}
