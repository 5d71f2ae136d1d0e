//! Search over one or all collections.
//!
//! A query is either numeric, matched exactly against identifiers, or
//! textual, matched as a case-insensitive substring of the article text.
//! The two policies are exclusive: a numeric query that matches no identifier
//! returns nothing, even if some text contains the digits.

use futures::future::join_all;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::CollectionCatalog;
use crate::repository::ArticleRepository;
use crate::source::TabularSource;
use crate::types::Article;

/// A classified search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Exact identifier match.
    Identifier(String),

    /// Substring match; holds the folded needle.
    Text(String),
}

impl SearchQuery {
    /// Classify a raw query. Returns `None` for blank input.
    ///
    /// # Examples
    /// ```
    /// use vademecum_reader::search::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse(" 5 "), Some(SearchQuery::Identifier("5".into())));
    /// assert_eq!(SearchQuery::parse("Saúde"), Some(SearchQuery::Text("saúde".into())));
    /// assert_eq!(SearchQuery::parse("   "), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if is_numeric(trimmed) {
            Some(Self::Identifier(trimmed.to_string()))
        } else {
            Some(Self::Text(fold(trimmed)))
        }
    }

    #[must_use]
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Self::Identifier(identifier) => article.identifier == *identifier,
            Self::Text(needle) => fold(&article.text).contains(needle.as_str()),
        }
    }

    /// Keep the matching articles, preserving order.
    #[must_use]
    pub fn filter(&self, articles: Vec<Article>) -> Vec<Article> {
        articles.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Whether the query reads as a finite number ("5", "5.0", "1e3").
fn is_numeric(query: &str) -> bool {
    query.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Canonical form for case-insensitive comparison.
fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

pub struct SearchEngine<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: TabularSource + ?Sized> SearchEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Search one collection, or every catalog collection when `collection`
    /// is `None`.
    ///
    /// Cross-collection results are concatenated in catalog order. A blank
    /// query returns nothing without touching the source.
    pub async fn search(&self, query: &str, collection: Option<&str>) -> Vec<Article> {
        let Some(query) = SearchQuery::parse(query) else {
            return Vec::new();
        };

        let repository = ArticleRepository::new(self.source);

        let results = match collection {
            Some(name) => query.filter(repository.list(Some(name)).await),
            None => {
                let names = CollectionCatalog::new(self.source).names().await;
                let listings =
                    join_all(names.iter().map(|name| repository.list(Some(name.as_str())))).await;
                listings
                    .into_iter()
                    .flat_map(|articles| query.filter(articles))
                    .collect()
            }
        };

        tracing::debug!(
            query = ?query,
            collection = ?collection,
            results = results.len(),
            "Search finished"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use pretty_assertions::assert_eq;

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_collection(
                "Constituição Federal",
                &[
                    ("", "TÍTULO II"),
                    ("5", "Lorem"),
                    ("6", "Direito à saúde e 5 outros"),
                    ("15", "Texto 5"),
                ],
            )
            .with_collection(
                "Código Civil",
                &[("5", "A menoridade cessa aos dezoito anos"), ("186", "Ato ilícito")],
            )
    }

    fn ids(articles: &[Article]) -> Vec<(&str, &str)> {
        articles
            .iter()
            .map(|a| (a.collection.as_str(), a.identifier.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_classification() {
        assert_eq!(SearchQuery::parse("5"), Some(SearchQuery::Identifier("5".into())));
        assert_eq!(SearchQuery::parse("1e3"), Some(SearchQuery::Identifier("1e3".into())));
        assert_eq!(SearchQuery::parse("5-A"), Some(SearchQuery::Text("5-a".into())));
        assert_eq!(SearchQuery::parse("inf"), Some(SearchQuery::Text("inf".into())));
        assert_eq!(SearchQuery::parse("NaN"), Some(SearchQuery::Text("nan".into())));
        assert_eq!(SearchQuery::parse(""), None);
    }

    #[test]
    fn test_fold_normalizes_composition() {
        // "saúde" written with a combining acute accent
        let decomposed = "sau\u{0301}de";
        assert_eq!(fold(decomposed), fold("SAÚDE"));
    }

    #[tokio::test]
    async fn test_numeric_query_is_exact() {
        let source = source();
        let engine = SearchEngine::new(&source);
        let results = engine.search("5", Some("Constituição Federal")).await;
        assert_eq!(ids(&results), vec![("Constituição Federal", "5")]);
        assert_eq!(results[0].text, "Lorem");
    }

    #[tokio::test]
    async fn test_numeric_query_without_match_is_empty() {
        let source = source();
        let engine = SearchEngine::new(&source);
        assert!(engine.search("99", Some("Constituição Federal")).await.is_empty());
    }

    #[tokio::test]
    async fn test_text_query_ignores_case() {
        let source = source();
        let engine = SearchEngine::new(&source);
        for query in ["saúde", "SAÚDE", "Saúde", "sau\u{0301}de"] {
            let results = engine.search(query, Some("Constituição Federal")).await;
            assert_eq!(ids(&results), vec![("Constituição Federal", "6")], "query {query}");
        }
    }

    #[tokio::test]
    async fn test_text_query_matches_headings() {
        let source = source();
        let engine = SearchEngine::new(&source);
        let results = engine.search("título", Some("Constituição Federal")).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_heading());
    }

    #[tokio::test]
    async fn test_cross_collection_in_catalog_order() {
        let source = source();
        let engine = SearchEngine::new(&source);
        let results = engine.search("5", None).await;
        assert_eq!(
            ids(&results),
            vec![("Constituição Federal", "5"), ("Código Civil", "5")]
        );
    }

    #[tokio::test]
    async fn test_cross_collection_text() {
        let source = source();
        let engine = SearchEngine::new(&source);
        let results = engine.search("ato", None).await;
        assert_eq!(ids(&results), vec![("Código Civil", "186")]);
    }

    #[tokio::test]
    async fn test_empty_query() {
        let source = source().unavailable();
        let engine = SearchEngine::new(&source);
        assert!(engine.search("", None).await.is_empty());
        assert!(engine.search("  ", Some("Código Civil")).await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_source_degrades() {
        let source = source().unavailable();
        let engine = SearchEngine::new(&source);
        assert!(engine.search("5", None).await.is_empty());
        assert!(engine.search("saúde", Some("Constituição Federal")).await.is_empty());
    }
}
