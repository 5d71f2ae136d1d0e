//! Tabular sources of legal-code data.
//!
//! A source exposes named collections (spreadsheet tabs), each with an
//! identifier column and a text column aligned row for row. Sources only
//! fetch raw cells; classification happens in [`crate::normalizer`].
//!
//! - [`sheets::SheetsSource`]: Google Sheets values API
//! - [`memory::InMemorySource`]: fixed columns, for tests and demos

use async_trait::async_trait;

use crate::error::Result;

pub mod memory;
pub mod sheets;

pub use memory::InMemorySource;
pub use sheets::SheetsSource;

/// Raw cells of one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub identifiers: Vec<String>,
    pub texts: Vec<String>,
}

impl Columns {
    pub fn new(identifiers: Vec<String>, texts: Vec<String>) -> Self {
        Self { identifiers, texts }
    }

    /// Number of rows, i.e. the length of the longer column.
    pub fn row_count(&self) -> usize {
        self.identifiers.len().max(self.texts.len())
    }
}

/// Read-only access to a tabular data source.
#[async_trait]
pub trait TabularSource: Send + Sync {
    /// Names of all collections, in source order.
    async fn fetch_collection_names(&self) -> Result<Vec<String>>;

    /// Both columns of one collection.
    ///
    /// `None` reads the source's unscoped default range.
    async fn fetch_columns(&self, collection: Option<&str>) -> Result<Columns>;
}

#[async_trait]
impl<T: TabularSource + ?Sized> TabularSource for std::sync::Arc<T> {
    async fn fetch_collection_names(&self) -> Result<Vec<String>> {
        (**self).fetch_collection_names().await
    }

    async fn fetch_columns(&self, collection: Option<&str>) -> Result<Columns> {
        (**self).fetch_columns(collection).await
    }
}
