//! Binding harvested articles to their authors

use std::collections::HashMap;
use tracing::debug;

use roster_core::entities::{ParsedIntro, RawArticle};
use roster_core::rules::{looks_like_intro, parse_intro, INTRO_EXCERPT_CHARS};
use roster_core::value_objects::date_string;

/// Per-author article counts and introductions
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    counts: HashMap<String, u32>,
    intros: HashMap<String, ParsedIntro>,
}

impl Attribution {
    /// Articles written by `author_id` among the harvested ones
    pub fn article_count(&self, author_id: &str) -> u32 {
        self.counts.get(author_id).copied().unwrap_or(0)
    }

    /// Introduction bound to `author_id`, if any
    pub fn intro(&self, author_id: &str) -> Option<&ParsedIntro> {
        self.intros.get(author_id)
    }

    /// Authors with a bound introduction
    pub fn intro_count(&self) -> usize {
        self.intros.len()
    }
}

/// Counts articles per author and keeps each author's first introduction
///
/// Articles are taken in feed order, so "first" means the first one the feed
/// returned, not the oldest by post time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroAttributor;

impl IntroAttributor {
    pub fn attribute(articles: &[RawArticle]) -> Attribution {
        let mut attribution = Attribution::default();

        for article in articles {
            let author = article.author_id.trim();
            if author.is_empty() {
                continue;
            }

            *attribution.counts.entry(author.to_string()).or_insert(0) += 1;

            if attribution.intros.contains_key(author) {
                continue;
            }

            let text = article.full_text();
            if !looks_like_intro(&article.title, &text, article.is_join_post()) {
                continue;
            }

            debug!(author = %author, "Introduction bound");
            attribution.intros.insert(
                author.to_string(),
                ParsedIntro {
                    fields: parse_intro(&text),
                    excerpt: text.chars().take(INTRO_EXCERPT_CHARS).collect(),
                    posted_on: date_string(article.posted_at),
                },
            );
        }

        attribution
    }
}
