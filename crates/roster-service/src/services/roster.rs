//! Persisted roster snapshot with stable row positions

use std::collections::HashMap;
use tracing::{instrument, warn};

use roster_core::entities::Member;
use roster_core::traits::{Row, RowStore};
use roster_core::value_objects::{pad_row, RowIndex, RowRange, MEMBER_COLUMNS};

use super::error::ServiceResult;

/// One data row of a roster
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub index: RowIndex,
    /// Stored cells padded to the full row width
    pub row: Row,
    pub member: Member,
}

/// A roster collection read once, keyed by nickname
///
/// Row indices are those at load time. Callers that delete rows must apply
/// the deletions from the highest index down.
#[derive(Debug, Clone)]
pub struct LoadedRoster {
    collection: String,
    entries: Vec<RosterEntry>,
    by_nickname: HashMap<String, usize>,
}

impl LoadedRoster {
    #[instrument(skip(store))]
    pub async fn load(store: &dyn RowStore, collection: &str) -> ServiceResult<Self> {
        let range = RowRange::columns(collection, MEMBER_COLUMNS);
        let rows = store.read_rows(collection, &range).await?;
        Ok(Self::from_rows(collection, rows))
    }

    /// Build from raw rows; index 0 is the header and is skipped
    pub fn from_rows(collection: &str, rows: Vec<Row>) -> Self {
        let mut entries = Vec::with_capacity(rows.len().saturating_sub(1));
        let mut by_nickname = HashMap::new();

        for (i, row) in rows.into_iter().enumerate().skip(1) {
            let row = pad_row(row, MEMBER_COLUMNS);
            let member = Member::from_row(&row);
            if member.nickname.is_empty() && member.id.is_empty() {
                continue;
            }

            if !member.nickname.is_empty() {
                if by_nickname.contains_key(&member.nickname) {
                    warn!(collection, nickname = %member.nickname, row = i + 1, "Duplicate nickname, keeping the first row");
                } else {
                    by_nickname.insert(member.nickname.clone(), entries.len());
                }
            }

            entries.push(RosterEntry {
                index: RowIndex::new(i),
                row,
                member,
            });
        }

        Self {
            collection: collection.to_string(),
            entries,
            by_nickname,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn by_nickname(&self, nickname: &str) -> Option<&RosterEntry> {
        self.by_nickname.get(nickname).map(|&i| &self.entries[i])
    }

    pub fn contains_nickname(&self, nickname: &str) -> bool {
        self.by_nickname.contains_key(nickname)
    }

    /// Lookup by member id; rows without an id never match
    pub fn by_id(&self, id: &str) -> Option<&RosterEntry> {
        if id.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.member.id == id)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Members that carry an id, in row order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.entries
            .iter()
            .map(|e| &e.member)
            .filter(|m| !m.id.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
