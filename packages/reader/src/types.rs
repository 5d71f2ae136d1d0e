//! Core data types for the reader.
//!
//! These types represent articles of a legal code, the typed relations
//! between them, and the small enums the navigation and search layers use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_COLLECTION;

/// Classification of a source row, decided once during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Text without identifier: a section divider such as "TÍTULO II".
    Heading,

    /// Identifier and text: a regular provision.
    Article,

    /// Identifier without text. Kept so it stays reachable by identifier.
    Orphan,
}

impl RowKind {
    /// Classify a pair of already trimmed cells.
    ///
    /// Returns `None` when both cells are empty; such rows are never
    /// materialized.
    #[must_use]
    pub fn classify(identifier: &str, text: &str) -> Option<Self> {
        match (identifier.is_empty(), text.is_empty()) {
            (true, true) => None,
            (true, false) => Some(Self::Heading),
            (false, false) => Some(Self::Article),
            (false, true) => Some(Self::Orphan),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Article => "article",
            Self::Orphan => "orphan",
        }
    }
}

/// A single normalized row of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article identifier (e.g., "5", "121-A"). Empty for headings.
    pub identifier: String,

    /// Provision or heading text. Empty for orphans.
    pub text: String,

    /// Name of the collection the row was read from.
    pub collection: String,

    /// Row class.
    pub kind: RowKind,
}

impl Article {
    /// Build an article from raw cells.
    ///
    /// Cells are classified on their trimmed values and the identifier is
    /// stored trimmed. Provision text is stored as the source wrote it,
    /// unless it is blank. Returns `None` for rows where both cells are
    /// empty.
    #[must_use]
    pub fn from_cells(identifier: &str, text: &str, collection: &str) -> Option<Self> {
        let identifier = identifier.trim();
        let kind = RowKind::classify(identifier, text.trim())?;
        let text = if text.trim().is_empty() { "" } else { text };
        Some(Self {
            identifier: identifier.to_string(),
            text: text.to_string(),
            collection: collection.to_string(),
            kind,
        })
    }

    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.kind == RowKind::Heading
    }

    /// Whether the article can be addressed by identifier.
    #[must_use]
    pub fn has_identifier(&self) -> bool {
        !self.identifier.is_empty()
    }
}

/// Closed set of relation types between articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Related,
    Complementary,
    Revoked,
    Amended,
}

impl RelationType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Related => "related",
            Self::Complementary => "complementary",
            Self::Revoked => "revoked",
            Self::Amended => "amended",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "related" => Ok(Self::Related),
            "complementary" => Ok(Self::Complementary),
            "revoked" => Ok(Self::Revoked),
            "amended" => Ok(Self::Amended),
            other => Err(format!("unknown relation type: '{other}'")),
        }
    }
}

/// A directed, typed relation from one article to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub from: String,
    pub to: String,

    #[serde(rename = "type")]
    pub relation: RelationType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Collection the relation belongs to. Unset means it applies to all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl CrossReference {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation: RelationType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation,
            description: None,
            collection: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Whether the relation is visible when reading `collection`.
    ///
    /// Unscoped relations are visible everywhere; scoped ones only in their
    /// own collection.
    #[must_use]
    pub fn visible_in(&self, collection: &str) -> bool {
        self.collection.as_deref().is_none_or(|own| own == collection)
    }
}

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Resolve an optional collection argument to the name used on records.
#[must_use]
pub fn collection_label(collection: Option<&str>) -> &str {
    collection.unwrap_or(DEFAULT_COLLECTION)
}
