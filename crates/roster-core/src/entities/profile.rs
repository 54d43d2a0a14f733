//! Remote profile - the remote-sourced half of a roster row
//!
//! Everything in a profile comes from the snapshot, the harvested articles and
//! the rules applied to them. Identity and memo are deliberately absent; they
//! are supplied separately through `PreservedFields` when the row is built.

use crate::rules::ActivityClassifier;
use crate::value_objects::{date_string, today_string, EpochSeconds};

use super::intro::{IntroField, ParsedIntro};
use super::member::{ActivityStatus, MembershipStatus, Role};
use super::remote::RemoteMember;

/// Remote-sourced fields of a roster row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfile {
    pub nickname: String,
    pub real_name: String,
    pub role: Role,
    pub status: MembershipStatus,
    pub activity: ActivityStatus,
    pub banned: bool,
    pub join_date: String,
    pub last_visit: String,
    pub leave_date: String,
    pub age: String,
    pub gender: String,
    pub location: String,
    pub workplace: String,
    pub study_area: String,
    pub study_content: String,
    pub study_days: String,
    pub article_count: u32,
    pub intro_text: String,
    pub intro_date: String,
}

impl RemoteProfile {
    /// Assemble a profile; `None` when the record has no usable display name
    pub fn assemble(
        remote: &RemoteMember,
        intro: Option<&ParsedIntro>,
        article_count: u32,
        classifier: &ActivityClassifier,
    ) -> Option<Self> {
        let nickname = remote.display_name()?.to_string();
        let banned = remote.is_banned();
        let empty = ParsedIntro::default();
        let intro = intro.unwrap_or(&empty);
        let field = |f: IntroField| intro.field(f).to_string();

        let real_name = match intro.field(IntroField::RealName) {
            "" => nickname.clone(),
            name => name.to_string(),
        };

        Some(Self {
            real_name,
            role: if remote.is_staff() { Role::Staff } else { Role::Member },
            status: if banned {
                MembershipStatus::Withdrawn
            } else {
                MembershipStatus::Current
            },
            activity: classifier.classify(
                EpochSeconds::normalize(remote.joined_at),
                EpochSeconds::normalize(remote.visited_at),
                banned,
            ),
            banned,
            join_date: date_string(remote.joined_at),
            last_visit: date_string(remote.visited_at),
            leave_date: if banned {
                today_string(classifier.now())
            } else {
                String::new()
            },
            age: field(IntroField::Age),
            gender: field(IntroField::Gender),
            location: field(IntroField::Location),
            workplace: field(IntroField::Workplace),
            study_area: field(IntroField::StudyArea),
            study_content: field(IntroField::StudyContent),
            study_days: field(IntroField::StudyDays),
            article_count,
            intro_text: intro.excerpt.clone(),
            intro_date: intro.posted_on.clone(),
            nickname,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Member, PreservedFields};
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn remote(nickname: &str) -> RemoteMember {
        RemoteMember {
            member_id: "m1".to_string(),
            nickname: nickname.to_string(),
            joined_at: 1_600_000_000,
            visited_at: 1_700_000_000 - 3 * 86_400,
            ..Default::default()
        }
    }

    #[test]
    fn test_real_name_falls_back_to_nickname() {
        let classifier = ActivityClassifier::new(now());
        let profile = RemoteProfile::assemble(&remote("별빛"), None, 0, &classifier).unwrap();
        assert_eq!(profile.real_name, "별빛");
        assert_eq!(profile.activity, ActivityStatus::Active);
        assert_eq!(profile.status, MembershipStatus::Current);
        assert!(profile.leave_date.is_empty());
    }

    #[test]
    fn test_intro_fields_flow_into_profile() {
        let classifier = ActivityClassifier::new(now());
        let mut intro = ParsedIntro {
            excerpt: "이름: 홍길동".to_string(),
            posted_on: "2023-01-01".to_string(),
            ..Default::default()
        };
        intro.fields.insert(IntroField::RealName, "홍길동".to_string());
        intro.fields.insert(IntroField::StudyDays, "주말".to_string());

        let profile = RemoteProfile::assemble(&remote("별빛"), Some(&intro), 3, &classifier).unwrap();
        assert_eq!(profile.real_name, "홍길동");
        assert_eq!(profile.study_days, "주말");
        assert_eq!(profile.article_count, 3);
        assert_eq!(profile.intro_date, "2023-01-01");
    }

    #[test]
    fn test_banned_profile() {
        let classifier = ActivityClassifier::new(now());
        let mut member = remote("별빛");
        member.ban_flag = "Y".to_string();

        let profile = RemoteProfile::assemble(&member, None, 0, &classifier).unwrap();
        assert!(profile.banned);
        assert_eq!(profile.activity, ActivityStatus::Withdrawn);
        assert_eq!(profile.status, MembershipStatus::Withdrawn);
        assert_eq!(profile.leave_date, "2023-11-14");
    }

    #[test]
    fn test_nameless_record_is_skipped() {
        let classifier = ActivityClassifier::new(now());
        assert!(RemoteProfile::assemble(&remote(""), None, 0, &classifier).is_none());
    }

    #[test]
    fn test_build_preserves_identity() {
        let classifier = ActivityClassifier::new(now());
        let profile = RemoteProfile::assemble(&remote("별빛"), None, 0, &classifier).unwrap();
        let preserved = PreservedFields {
            id: "keep-me".to_string(),
            memo: "private note".to_string(),
        };

        let member = Member::build(&profile, preserved);
        assert_eq!(member.id, "keep-me");
        assert_eq!(member.memo, "private note");
        assert_eq!(member.nickname, "별빛");
    }
}
