//! Vade Mecum Reader - Legal-code articles from spreadsheet sources.
//!
//! This crate reads legal codes kept as two-column spreadsheets (article
//! number, article text; one tab per legal area), normalizes the rows into
//! articles and offers lookup, search, cross-references and previous/next
//! navigation on top.
//!
//! # Example
//!
//! ```
//! use vademecum_reader::source::InMemorySource;
//! use vademecum_reader::{ArticleRepository, SearchEngine};
//!
//! # tokio_test_block_on(async {
//! let source = InMemorySource::new().with_collection(
//!     "Constituição Federal",
//!     &[("", "TÍTULO II"), ("6", "São direitos sociais a educação, a saúde...")],
//! );
//!
//! let repository = ArticleRepository::new(&source);
//! let article = repository.get("6", Some("Constituição Federal")).await.unwrap();
//! assert!(!article.is_heading());
//!
//! let results = SearchEngine::new(&source).search("SAÚDE", None).await;
//! assert_eq!(results.len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, environment configuration and Sheets URLs
//! - [`types`]: Core data types (Article, RowKind, CrossReference, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client with retries
//! - [`source`]: Tabular sources (Google Sheets, in-memory)
//! - [`cache`]: Invalidatable memoizing source
//! - [`normalizer`]: Raw columns into classified articles
//! - [`catalog`]: Collection names
//! - [`repository`]: Per-collection listing and lookup
//! - [`search`]: Identifier and text search across collections
//! - [`relations`]: Relation stores and the cross-reference resolver
//! - [`navigation`]: Previous/next over a collection
//! - [`reading`]: Favorites, notes, tags and history (outside the core)
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod normalizer;
pub mod reading;
pub mod relations;
pub mod repository;
pub mod search;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use cache::CachingSource;
pub use catalog::CollectionCatalog;
pub use error::{ReaderError, Result};
pub use navigation::{next, Navigator};
pub use relations::{CrossReferenceResolver, RelationStore, StaticRelationStore};
pub use repository::ArticleRepository;
pub use search::{SearchEngine, SearchQuery};
pub use source::{Columns, TabularSource};
pub use types::{Article, CrossReference, Direction, RelationType, RowKind};
