//! Article repository: normalized listings of a single collection.
//!
//! Every operation works on exactly one collection. Omitting the collection
//! selects the source's unscoped default range, whose articles are labelled
//! [`DEFAULT_COLLECTION`](crate::config::DEFAULT_COLLECTION). Results are never
//! merged across collections here; that is what [`crate::search`] is for.

use crate::error::Result;
use crate::normalizer::normalize_rows;
use crate::source::TabularSource;
use crate::types::{collection_label, Article};

pub struct ArticleRepository<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: TabularSource + ?Sized> ArticleRepository<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// All rows of a collection in source order, headings included.
    ///
    /// Degrades to an empty list when the source fails.
    pub async fn list(&self, collection: Option<&str>) -> Vec<Article> {
        self.try_list(collection).await.unwrap_or_else(|e| {
            tracing::warn!(collection = ?collection, error = %e, "Could not load articles");
            Vec::new()
        })
    }

    pub async fn try_list(&self, collection: Option<&str>) -> Result<Vec<Article>> {
        let columns = self.source.fetch_columns(collection).await?;
        Ok(normalize_rows(
            &columns.identifiers,
            &columns.texts,
            collection_label(collection),
        ))
    }

    /// Look up an article by exact identifier. First match wins.
    ///
    /// Returns `None` when the identifier is unknown or the source fails.
    pub async fn get(&self, identifier: &str, collection: Option<&str>) -> Option<Article> {
        find_article(self.list(collection).await, identifier)
    }

    pub async fn try_get(
        &self,
        identifier: &str,
        collection: Option<&str>,
    ) -> Result<Option<Article>> {
        Ok(find_article(self.try_list(collection).await?, identifier))
    }

    /// Identifiers of a collection in source order, headings excluded.
    pub async fn all_identifiers(&self, collection: Option<&str>) -> Vec<String> {
        identifiers_of(self.list(collection).await)
    }

    pub async fn try_all_identifiers(&self, collection: Option<&str>) -> Result<Vec<String>> {
        Ok(identifiers_of(self.try_list(collection).await?))
    }
}

fn find_article(articles: Vec<Article>, identifier: &str) -> Option<Article> {
    if identifier.is_empty() {
        return None;
    }
    articles.into_iter().find(|a| a.identifier == identifier)
}

fn identifiers_of(articles: Vec<Article>) -> Vec<String> {
    articles
        .into_iter()
        .filter(Article::has_identifier)
        .map(|a| a.identifier)
        .collect()
}
