//! Display model for the result list

use crate::api::Article;

/// Build the tag subtitle shown under an article title
///
/// Tags are folded left-to-right by prepending, so the output lists them in
/// reverse and ends with a separator: `["a", "b"]` becomes `"#b, #a, "`.
/// Existing users know the list in this shape, so it is kept as is.
#[must_use]
pub fn tag_subtitle(tags: &[String]) -> String {
    tags.iter()
        .fold(String::new(), |subtitle, tag| format!("#{tag}, {subtitle}"))
}

/// One row of the result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    /// Article identifier, used as the row key
    pub id: String,
    /// Main line
    pub title: String,
    /// Tag summary
    pub subtitle: String,
    /// Right-aligned label (source domain)
    pub accessory: String,
    /// Target of the default action
    pub link: String,
    /// Tags in API order, for per-tag actions
    pub tags: Vec<String>,
}

impl ArticleRow {
    /// Project one article into a row
    #[must_use]
    pub fn from_article(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            subtitle: tag_subtitle(&article.tags),
            accessory: article.domain.clone(),
            link: article.link.clone(),
            tags: article.tags.clone(),
        }
    }

    /// Project a result list, one row per article in server order
    #[must_use]
    pub fn from_articles(articles: &[Article]) -> Vec<Self> {
        articles.iter().map(Self::from_article).collect()
    }
}
