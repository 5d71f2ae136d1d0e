//! Visibility policy for cross-references.

use crate::error::Result;
use crate::relations::RelationStore;
use crate::repository::ArticleRepository;
use crate::source::TabularSource;
use crate::types::{Article, CrossReference};

/// A cross-reference together with its target article, if it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub reference: CrossReference,
    pub target: Option<Article>,
}

pub struct CrossReferenceResolver<'a, R: ?Sized> {
    store: &'a R,
}

impl<'a, R: RelationStore + ?Sized> CrossReferenceResolver<'a, R> {
    pub fn new(store: &'a R) -> Self {
        Self { store }
    }

    /// Relations declared from `identifier`, in declaration order.
    ///
    /// With a collection, only relations that are unscoped or scoped to that
    /// collection are kept. Unknown identifiers and store failures yield an
    /// empty list.
    pub async fn resolve(&self, identifier: &str, collection: Option<&str>) -> Vec<CrossReference> {
        self.try_resolve(identifier, collection)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    identifier,
                    collection = ?collection,
                    error = %e,
                    "Could not load cross-references"
                );
                Vec::new()
            })
    }

    pub async fn try_resolve(
        &self,
        identifier: &str,
        collection: Option<&str>,
    ) -> Result<Vec<CrossReference>> {
        let relations = self.store.fetch_relations(identifier, collection).await?;
        Ok(relations
            .into_iter()
            .filter(|r| r.from == identifier)
            .filter(|r| collection.is_none_or(|name| r.visible_in(name)))
            .collect())
    }

    /// Resolve relations and look up each target article.
    ///
    /// Targets are looked up in the relation's own collection, falling back
    /// to the requested one. A missing target is `None`, not an error.
    pub async fn resolve_with_targets<S: TabularSource + ?Sized>(
        &self,
        identifier: &str,
        collection: Option<&str>,
        repository: &ArticleRepository<'_, S>,
    ) -> Vec<ResolvedReference> {
        let mut resolved = Vec::new();
        for reference in self.resolve(identifier, collection).await {
            let scope = reference.collection.as_deref().or(collection);
            let target = repository.get(&reference.to, scope).await;
            resolved.push(ResolvedReference { reference, target });
        }
        resolved
    }
}
