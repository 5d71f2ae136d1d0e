//! Memoizing decorator for a [`TabularSource`].
//!
//! Entries are immutable snapshots until invalidated. Failed fetches are
//! never stored, so the next call retries the upstream source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::source::{Columns, TabularSource};

/// Cache key for a collection; `None` is the unscoped default range.
type CollectionKey = Option<String>;

pub struct CachingSource<S> {
    inner: S,
    names: RwLock<Option<Vec<String>>>,
    columns: RwLock<HashMap<CollectionKey, Columns>>,
}

impl<S: TabularSource> CachingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            names: RwLock::new(None),
            columns: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached entry.
    pub async fn invalidate(&self) {
        *self.names.write().await = None;
        self.columns.write().await.clear();
        tracing::debug!("Invalidated source cache");
    }

    /// Drop the cached columns of one collection.
    pub async fn invalidate_collection(&self, collection: Option<&str>) {
        self.columns
            .write()
            .await
            .remove(&collection.map(str::to_string));
        tracing::debug!(collection = ?collection, "Invalidated cached collection");
    }
}

#[async_trait]
impl<S: TabularSource> TabularSource for CachingSource<S> {
    async fn fetch_collection_names(&self) -> Result<Vec<String>> {
        if let Some(names) = self.names.read().await.as_ref() {
            return Ok(names.clone());
        }
        let names = self.inner.fetch_collection_names().await?;
        *self.names.write().await = Some(names.clone());
        Ok(names)
    }

    async fn fetch_columns(&self, collection: Option<&str>) -> Result<Columns> {
        let key: CollectionKey = collection.map(str::to_string);
        if let Some(columns) = self.columns.read().await.get(&key) {
            return Ok(columns.clone());
        }
        let columns = self.inner.fetch_columns(collection).await?;
        self.columns.write().await.insert(key, columns.clone());
        Ok(columns)
    }
}
