//! Remote snapshot record as decoded from the platform payloads

use serde::{Deserialize, Serialize};

use crate::value_objects::lenient;

/// One entry of the platform's `members` array
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteMember {
    /// Platform member id, also the author id on articles
    #[serde(rename = "mid", default, deserialize_with = "lenient::string")]
    pub member_id: String,

    /// Display name, the cross-run matching key
    #[serde(rename = "mn", default, deserialize_with = "lenient::string")]
    pub nickname: String,

    #[serde(rename = "i_m", default, deserialize_with = "lenient::string")]
    pub manager_flag: String,

    /// Raw join timestamp (may be shifted, see `EpochSeconds`)
    #[serde(rename = "j_t", default, deserialize_with = "lenient::int")]
    pub joined_at: i64,

    /// Raw last-visit timestamp
    #[serde(rename = "v_t", default, deserialize_with = "lenient::int")]
    pub visited_at: i64,

    #[serde(rename = "ban", default, deserialize_with = "lenient::string")]
    pub ban_flag: String,
}

impl RemoteMember {
    #[inline]
    pub fn is_banned(&self) -> bool {
        self.ban_flag == "Y"
    }

    #[inline]
    pub fn is_staff(&self) -> bool {
        self.manager_flag == "Y"
    }

    /// Display name usable as a roster key
    pub fn display_name(&self) -> Option<&str> {
        let name = self.nickname.as_str();
        (!name.trim().is_empty()).then_some(name)
    }
}

/// Decoded member snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub members: Vec<RemoteMember>,
    /// Records in the remote payload, including ones that failed to decode
    pub raw_total: usize,
}

impl MemberSnapshot {
    pub fn new(members: Vec<RemoteMember>, raw_total: usize) -> Self {
        Self { members, raw_total }
    }
}

impl From<Vec<RemoteMember>> for MemberSnapshot {
    fn from(members: Vec<RemoteMember>) -> Self {
        let raw_total = members.len();
        Self { members, raw_total }
    }
}
