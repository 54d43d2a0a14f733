//! Board articles and the paginated feed page that carries them

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::lenient;

/// Category tag the platform puts on join posts
pub const JOIN_POST_CATEGORY: &str = "J";

/// Raw board article as returned by the articles feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawArticle {
    /// Author's platform member id
    #[serde(rename = "wid", default, deserialize_with = "lenient::string")]
    pub author_id: String,

    /// Raw post timestamp (may be shifted)
    #[serde(rename = "ot", default, deserialize_with = "lenient::int")]
    pub posted_at: i64,

    #[serde(rename = "at", default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(rename = "c", default, deserialize_with = "lenient::string")]
    pub body: String,

    #[serde(rename = "cat", default, deserialize_with = "lenient::string")]
    pub category: String,
}

impl RawArticle {
    #[inline]
    pub fn is_join_post(&self) -> bool {
        self.category == JOIN_POST_CATEGORY
    }

    /// Title and body joined the way intro parsing expects them
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Opaque pagination token
///
/// Kept as raw JSON so the token goes back to the platform with the exact
/// type it arrived with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cursor(Value);

impl Cursor {
    /// Wrap a token; falsy values (`null`, `""`, `0`, `false`) are not cursors
    pub fn from_value(value: Value) -> Option<Self> {
        let usable = match &value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::Array(_) | Value::Object(_) => true,
        };
        usable.then_some(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// One page of the articles feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    #[serde(rename = "cs", default, deserialize_with = "lenient::null_as_default")]
    pub articles: Vec<RawArticle>,

    #[serde(rename = "eof", default, deserialize_with = "lenient::string")]
    pub eof_flag: String,

    #[serde(rename = "s_t", default)]
    pub next_cursor: Option<Value>,
}

impl ArticlePage {
    #[inline]
    pub fn is_end_of_feed(&self) -> bool {
        self.eof_flag == "Y"
    }

    /// Cursor for the next request: the explicit token, else the last article's timestamp
    pub fn derive_cursor(&self) -> Option<Cursor> {
        self.next_cursor
            .clone()
            .and_then(Cursor::from_value)
            .or_else(|| {
                self.articles
                    .last()
                    .and_then(|a| Cursor::from_value(Value::from(a.posted_at)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_page() {
        let page: ArticlePage = serde_json::from_value(json!({
            "cs": [
                {"wid": 7, "ot": 1_700_000_000, "at": "가입인사", "c": "안녕하세요", "cat": "J"},
                {"wid": "8", "ot": "1700000100", "at": null, "c": "본문"}
            ],
            "eof": "N",
            "s_t": "abc"
        }))
        .unwrap();

        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.articles[0].author_id, "7");
        assert!(page.articles[0].is_join_post());
        assert_eq!(page.articles[1].posted_at, 1_700_000_100);
        assert!(page.articles[1].title.is_empty());
        assert!(!page.is_end_of_feed());
        assert_eq!(page.derive_cursor().unwrap().as_value(), &json!("abc"));
    }

    #[test]
    fn test_null_article_list() {
        let page: ArticlePage = serde_json::from_value(json!({"cs": null, "eof": "Y"})).unwrap();
        assert!(page.articles.is_empty());
        assert!(page.is_end_of_feed());
        assert!(page.derive_cursor().is_none());
    }

    #[test]
    fn test_cursor_falls_back_to_last_article() {
        let page: ArticlePage = serde_json::from_value(json!({
            "cs": [{"wid": "1", "ot": 10}, {"wid": "2", "ot": 20}],
            "s_t": ""
        }))
        .unwrap();
        assert_eq!(page.derive_cursor().unwrap().as_value(), &json!(20));
    }

    #[test]
    fn test_falsy_cursors() {
        assert!(Cursor::from_value(json!(null)).is_none());
        assert!(Cursor::from_value(json!(0)).is_none());
        assert!(Cursor::from_value(json!("")).is_none());
        assert!(Cursor::from_value(json!(false)).is_none());
        assert!(Cursor::from_value(json!(5)).is_some());
    }
}
