//! Time-windowed activity classification

use chrono::{DateTime, Utc};

use crate::entities::ActivityStatus;
use crate::value_objects::EpochSeconds;

const DAY_SECS: i64 = 86_400;

/// Joined or visited within this many seconds counts as "new"/"active"
pub const ACTIVE_WINDOW_SECS: i64 = 7 * DAY_SECS;

/// Visited within this many seconds counts as "normal"
pub const NORMAL_WINDOW_SECS: i64 = 30 * DAY_SECS;

/// Classifies members against a fixed reference instant
///
/// One classifier is created per synchronization run so every member is
/// judged against the same "now".
#[derive(Debug, Clone, Copy)]
pub struct ActivityClassifier {
    now: DateTime<Utc>,
}

impl ActivityClassifier {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Classify one member
    ///
    /// A banned member is always `Withdrawn`. Otherwise the first matching
    /// rule wins: recent join, recent visit, visit within a month, inactive.
    /// A missing timestamp never matches a window.
    pub fn classify(
        &self,
        joined: Option<EpochSeconds>,
        visited: Option<EpochSeconds>,
        banned: bool,
    ) -> ActivityStatus {
        if banned {
            return ActivityStatus::Withdrawn;
        }

        let join_age = self.age(joined);
        let visit_age = self.age(visited);

        if join_age.is_some_and(|age| age <= ACTIVE_WINDOW_SECS) {
            ActivityStatus::New
        } else if visit_age.is_some_and(|age| age <= ACTIVE_WINDOW_SECS) {
            ActivityStatus::Active
        } else if visit_age.is_some_and(|age| age <= NORMAL_WINDOW_SECS) {
            ActivityStatus::Normal
        } else {
            ActivityStatus::Inactive
        }
    }

    // None stands for infinite age
    fn age(&self, ts: Option<EpochSeconds>) -> Option<i64> {
        ts.map(|ts| ts.age_at(self.now))
    }
}
