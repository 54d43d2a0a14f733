//! Business rules applied to remote data before reconciliation

mod activity;
mod intro;

pub use activity::{ActivityClassifier, ACTIVE_WINDOW_SECS, NORMAL_WINDOW_SECS};
pub use intro::{has_intro_label, looks_like_intro, parse_intro, INTRO_EXCERPT_CHARS};
