//! Reading aids: favorites, notes, tags and reading history.
//!
//! This layer sits beside the core, not inside it. The core modules never
//! touch a [`KeyValueStore`]; front ends inject one here.
//!
//! Every key is namespaced by kind, and per-article keys also by collection
//! and identifier, so article "5" of one legal area never shares notes with
//! article "5" of another:
//!
//! ```text
//! vademecum:favorites
//! vademecum:history
//! vademecum:note:{collection}:{identifier}
//! vademecum:tags:{collection}:{identifier}
//! ```
//!
//! Collection and identifier segments are form-urlencoded, so a `:` inside a
//! name cannot produce a colliding key.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::config::HISTORY_LIMIT;
use crate::error::Result;
use crate::types::Article;

pub mod store;

pub use store::{InMemoryKeyValueStore, JsonFileStore, KeyValueStore};

const KEY_PREFIX: &str = "vademecum";

/// Kind of stored reading aid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AidKind {
    Favorites,
    History,
    Note,
    Tags,
}

impl AidKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::History => "history",
            Self::Note => "note",
            Self::Tags => "tags",
        }
    }
}

/// The (collection, identifier) key of an article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    pub collection: String,
    pub identifier: String,
}

impl ArticleRef {
    pub fn new(collection: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            identifier: identifier.into(),
        }
    }
}

impl From<&Article> for ArticleRef {
    fn from(article: &Article) -> Self {
        Self::new(&article.collection, &article.identifier)
    }
}

/// One entry of the reading history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub article: ArticleRef,
    pub read_at: DateTime<Utc>,
}

/// Key for a list-valued aid.
#[must_use]
pub fn list_key(kind: AidKind) -> String {
    format!("{KEY_PREFIX}:{}", kind.as_str())
}

/// Key for a per-article aid.
///
/// # Examples
/// ```
/// use vademecum_reader::reading::{article_key, AidKind, ArticleRef};
///
/// let key = article_key(AidKind::Note, &ArticleRef::new("Código Penal", "121"));
/// assert_eq!(key, "vademecum:note:C%C3%B3digo+Penal:121");
/// ```
#[must_use]
pub fn article_key(kind: AidKind, article: &ArticleRef) -> String {
    format!(
        "{KEY_PREFIX}:{}:{}:{}",
        kind.as_str(),
        encode_segment(&article.collection),
        encode_segment(&article.identifier)
    )
}

fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// Favorites, notes, tags and history over an injected store.
pub struct ReadingAids<K> {
    store: K,
}

impl<K: KeyValueStore> ReadingAids<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> K {
        self.store
    }

    // Favorites

    pub fn favorites(&self) -> Result<Vec<ArticleRef>> {
        self.read_json(&list_key(AidKind::Favorites))
    }

    pub fn is_favorite(&self, article: &ArticleRef) -> Result<bool> {
        Ok(self.favorites()?.contains(article))
    }

    /// Add a favorite. Adding an existing favorite is a no-op.
    pub fn add_favorite(&mut self, article: ArticleRef) -> Result<()> {
        let mut favorites = self.favorites()?;
        if !favorites.contains(&article) {
            favorites.push(article);
            self.write_json(&list_key(AidKind::Favorites), &favorites)?;
        }
        Ok(())
    }

    pub fn remove_favorite(&mut self, article: &ArticleRef) -> Result<()> {
        let mut favorites = self.favorites()?;
        favorites.retain(|f| f != article);
        self.write_json(&list_key(AidKind::Favorites), &favorites)
    }

    /// Flip the favorite state. Returns whether the article is now a favorite.
    pub fn toggle_favorite(&mut self, article: ArticleRef) -> Result<bool> {
        if self.is_favorite(&article)? {
            self.remove_favorite(&article)?;
            Ok(false)
        } else {
            self.add_favorite(article)?;
            Ok(true)
        }
    }

    // Notes

    /// The note of an article; an empty note reads as `None`.
    pub fn note(&self, article: &ArticleRef) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&article_key(AidKind::Note, article))?
            .filter(|note| !note.is_empty()))
    }

    /// Replace the note of an article. An empty text clears it.
    pub fn save_note(&mut self, article: &ArticleRef, text: &str) -> Result<()> {
        self.store.set(&article_key(AidKind::Note, article), text)
    }

    // Tags

    pub fn tags(&self, article: &ArticleRef) -> Result<Vec<String>> {
        self.read_json(&article_key(AidKind::Tags, article))
    }

    /// Add a trimmed tag. Blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, article: &ArticleRef, tag: &str) -> Result<()> {
        let tag = tag.trim();
        let mut tags = self.tags(article)?;
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            return Ok(());
        }
        tags.push(tag.to_string());
        self.write_json(&article_key(AidKind::Tags, article), &tags)
    }

    pub fn remove_tag(&mut self, article: &ArticleRef, tag: &str) -> Result<()> {
        let mut tags = self.tags(article)?;
        tags.retain(|t| t != tag.trim());
        self.write_json(&article_key(AidKind::Tags, article), &tags)
    }

    // History

    /// Reading history, most recent first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.read_json(&list_key(AidKind::History))
    }

    /// The `limit` most recently read articles.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut history = self.history()?;
        history.truncate(limit);
        Ok(history)
    }

    pub fn record_read(&mut self, article: ArticleRef) -> Result<()> {
        self.record_read_at(article, Utc::now())
    }

    /// Move `article` to the front of the history, keeping at most
    /// [`HISTORY_LIMIT`] entries.
    pub fn record_read_at(&mut self, article: ArticleRef, read_at: DateTime<Utc>) -> Result<()> {
        let mut history = self.history()?;
        history.retain(|entry| entry.article != article);
        history.insert(0, HistoryEntry { article, read_at });
        history.truncate(HISTORY_LIMIT);
        self.write_json(&list_key(AidKind::History), &history)
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(T::default()),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}
