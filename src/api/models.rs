//! Wire model for saved bookmarks

use serde::{Deserialize, Deserializer, Serialize};

/// A saved bookmark ("raindrop") as returned by the search endpoint
///
/// Articles are built fresh from every response and never mutated; the whole
/// list is replaced on the next successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier within one result set
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    /// Bookmark title
    #[serde(default)]
    pub title: String,
    /// Bookmarked URL
    #[serde(default)]
    pub link: String,
    /// Bookmark category (link, article, image, ...), passed through untouched
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Tags in the order the API returned them
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source domain of the link
    #[serde(default)]
    pub domain: String,
}

impl Article {
    /// Create an article with the given identity and link
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            kind: "link".to_string(),
            tags: Vec::new(),
            domain: String::new(),
        }
    }

    /// Set tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set source domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

/// Body of a search response
///
/// `items` stays optional so an absent field can be told apart from an
/// empty result.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<Article>>,
}

/// The live API sends numeric ids; older payloads used strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Uint(n) => n.to_string(),
    })
}
