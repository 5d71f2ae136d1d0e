//! Cross-references between articles.
//!
//! A [`RelationStore`] fetches raw relations; the [`CrossReferenceResolver`]
//! applies the visibility policy on top of whatever store backs it.
//! Relations are directed: a relation 5 → 14 says nothing about 14 → 5 unless
//! that entry is declared too.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::CrossReference;

pub mod resolver;
pub mod static_table;

pub use resolver::{CrossReferenceResolver, ResolvedReference};
pub use static_table::StaticRelationStore;

/// Storage for cross-references.
#[async_trait]
pub trait RelationStore: Send + Sync {
    /// Relations declared from `identifier`.
    ///
    /// The collection is a hint; stores may return relations of other
    /// collections, the resolver filters them.
    async fn fetch_relations(
        &self,
        identifier: &str,
        collection: Option<&str>,
    ) -> Result<Vec<CrossReference>>;

    /// Persist a new relation after the existing ones.
    async fn save(&self, reference: CrossReference) -> Result<()>;
}
