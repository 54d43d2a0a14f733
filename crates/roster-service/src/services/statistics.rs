//! Roster statistics
//!
//! Histograms cover current members of the active roster only; the totals
//! count every row that carries an id.

use std::collections::BTreeMap;
use tracing::instrument;

use roster_core::entities::{ActivityStatus, Member, MembershipStatus};

use crate::dto::StatisticsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::roster::LoadedRoster;

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];
const EVERY_DAY: &str = "매일";
const OTHER_DAYS: &str = "기타";

/// Statistics service
pub struct StatisticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatisticsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn statistics(&self) -> ServiceResult<StatisticsResponse> {
        let roster = LoadedRoster::load(self.ctx.store(), &self.ctx.collections().active).await?;
        Ok(summarize(roster.members()))
    }
}

/// Build every histogram in one pass
pub fn summarize<'m>(members: impl IntoIterator<Item = &'m Member>) -> StatisticsResponse {
    let mut stats = StatisticsResponse {
        activity_stats: ActivityStatus::ALL
            .iter()
            .map(|a| (a.label().to_string(), 0))
            .collect(),
        day_stats: WEEKDAYS
            .iter()
            .chain([EVERY_DAY, OTHER_DAYS].iter())
            .map(|d| ((*d).to_string(), 0))
            .collect(),
        ..StatisticsResponse::default()
    };

    for member in members {
        stats.total += 1;
        match member.status {
            MembershipStatus::Current => stats.current += 1,
            MembershipStatus::Withdrawn => {
                stats.left += 1;
                continue;
            }
        }

        bump(&mut stats.activity_stats, member.activity.label());

        if let Some(region) = member.location.split_whitespace().next() {
            bump(&mut stats.region_stats, region);
        }

        for topic in member
            .study_content
            .split([',', '/', '&'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            bump(&mut stats.study_stats, topic);
        }

        if let Some(month) = member.join_date.get(..7) {
            bump(&mut stats.monthly_joins, month);
        }

        for day in study_day_buckets(&member.study_days) {
            bump(&mut stats.day_stats, day);
        }
    }

    stats
}

/// Weekday buckets a free-text availability string falls into
///
/// `요일` suffixes and the `일` inside `매일`/`평일` are not read as Sunday.
pub fn study_day_buckets(text: &str) -> Vec<&'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut buckets = Vec::new();
    if text.contains('매') {
        buckets.push(EVERY_DAY);
    }

    let scan = text
        .replace(EVERY_DAY, "")
        .replace("요일", "")
        .replace("평일", "");
    buckets.extend(WEEKDAYS.iter().copied().filter(|d| scan.contains(d)));

    if text.contains("평일") {
        buckets.extend_from_slice(&WEEKDAYS[..5]);
    }
    if text.contains("주말") {
        buckets.extend_from_slice(&WEEKDAYS[5..]);
    }

    if buckets.is_empty() {
        buckets.push(OTHER_DAYS);
    }
    buckets
}

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}
