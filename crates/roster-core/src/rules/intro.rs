//! Self-introduction text parsing
//!
//! Introduction posts follow a loose "label: value" template. Each field has
//! one anchored pattern capturing to the end of the line. A captured value is
//! discarded when it contains the label keyword of a different field, which
//! happens when a member leaves a template line blank and the pattern runs
//! into the next label.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::{IntroField, IntroFields};

/// Maximum characters of title + body kept as the intro excerpt
pub const INTRO_EXCERPT_CHARS: usize = 500;

/// Title fragments that mark a greeting or join post
const GREETING_TITLE_KEYWORDS: [&str; 5] = ["가입", "인사", "안녕", "반가", "소개"];

/// Label keywords of every field, used by the contamination check
const LABEL_KEYWORDS: [&str; 7] = ["이름", "나이", "성별", "사는", "근무지", "공부", "요일"];

/// Study-days lines longer than this are not taken as a value
const STUDY_DAYS_MAX_CHARS: usize = 50;

struct FieldPattern {
    field: IntroField,
    regex: Regex,
    /// Label keywords that legitimately appear in this field's own label
    native: &'static [&'static str],
}

fn field_pattern(field: IntroField, pattern: &str, native: &'static [&'static str]) -> FieldPattern {
    FieldPattern {
        field,
        regex: Regex::new(pattern).expect("intro field pattern is valid"),
        native,
    }
}

static FIELD_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        field_pattern(IntroField::RealName, r"이름\s*[:：][^\S\n]*([^\n]+)", &["이름"]),
        field_pattern(IntroField::Age, r"나이\s*[:：][^\S\n]*([^\n]+)", &["나이"]),
        field_pattern(IntroField::Gender, r"성별\s*[:：][^\S\n]*([^\n]+)", &["성별"]),
        field_pattern(IntroField::Location, r"사는\s*곳\s*[:：][^\S\n]*([^\n]+)", &["사는"]),
        field_pattern(IntroField::Workplace, r"근무지\s*[:：=][^\S\n]*([^\n]+)", &["근무지"]),
        field_pattern(IntroField::StudyArea, r"공부.*지역\s*[:：][^\S\n]*([^\n]+)", &["공부"]),
        field_pattern(IntroField::StudyContent, r"공부\s*내용\s*[:：][^\S\n]*([^\n]+)", &["공부"]),
    ]
});

/// Bare label detectors, one per field pattern
static LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"이름\s*[:：]",
        r"나이\s*[:：]",
        r"성별\s*[:：]",
        r"사는\s*곳\s*[:：]",
        r"근무지\s*[:：=]",
        r"공부.*지역\s*[:：]",
        r"공부\s*내용\s*[:：]",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("intro label pattern is valid"))
    .collect()
});

static STUDY_DAYS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)공부\s*(?:가능)?\s*요일").expect("study days label is valid"));

static INLINE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:：]\s*(.+)").expect("inline value pattern is valid"));

static EXAMPLE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?\s*ex\s*:").expect("placeholder pattern is valid"));

/// Extract every recognizable field from an introduction text
///
/// Fields that are absent or fail validation are simply missing from the map.
pub fn parse_intro(text: &str) -> IntroFields {
    let mut fields = IntroFields::new();
    if text.is_empty() {
        return fields;
    }

    for pattern in FIELD_PATTERNS.iter() {
        let Some(value) = pattern
            .regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        else {
            continue;
        };

        if value.is_empty() || is_contaminated(value, pattern.native) {
            continue;
        }
        fields.insert(pattern.field, value.to_string());
    }

    if let Some(days) = find_study_days(text) {
        fields.insert(IntroField::StudyDays, days);
    }

    fields
}

/// True when any field label appears in the text
pub fn has_intro_label(text: &str) -> bool {
    LABEL_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Decide whether an article is an introduction post
pub fn looks_like_intro(title: &str, text: &str, is_join_post: bool) -> bool {
    is_join_post
        || has_intro_label(text)
        || GREETING_TITLE_KEYWORDS.iter().any(|kw| title.contains(kw))
}

fn is_contaminated(value: &str, native: &[&str]) -> bool {
    LABEL_KEYWORDS
        .iter()
        .any(|kw| !native.contains(kw) && value.contains(kw))
}

// Inline value on the label line first, else the next usable line.
fn find_study_days(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        if !STUDY_DAYS_LABEL.is_match(line) {
            continue;
        }

        let inline = INLINE_VALUE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty());
        if let Some(value) = inline {
            if !EXAMPLE_PLACEHOLDER.is_match(value) && !value.contains("해당 요일") {
                return Some(value.to_string());
            }
        }

        if let Some(next) = lines.get(i + 1).map(|l| l.trim()) {
            if !next.is_empty()
                && !next.starts_with('ㅡ')
                && !next.starts_with('-')
                && next.chars().count() < STUDY_DAYS_MAX_CHARS
            {
                return Some(next.to_string());
            }
        }
    }

    None
}
