//! In-memory source with fixed columns.
//!
//! Besides the builder used in tests, a source can be loaded from a YAML file
//! so the reader works offline:
//!
//! ```yaml
//! default:
//!   - ["1", "Artigo padrão"]
//! collections:
//!   - name: Constituição Federal
//!     rows:
//!       - ["", "TÍTULO I"]
//!       - ["5", "Todos são iguais perante a lei"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ReaderError, Result};
use crate::source::{Columns, TabularSource};

#[derive(Deserialize)]
struct SourceFile {
    #[serde(default)]
    default: Vec<Row>,
    #[serde(default)]
    collections: Vec<CollectionEntry>,
}

#[derive(Deserialize)]
struct CollectionEntry {
    name: String,
    #[serde(default)]
    rows: Vec<Row>,
}

/// A row as written in a source file. Short rows are padded with empty cells.
#[derive(Deserialize)]
struct Row(Vec<String>);

impl Row {
    fn cell(&self, index: usize) -> String {
        self.0.get(index).cloned().unwrap_or_default()
    }
}

fn file_rows_to_columns(rows: &[Row]) -> Columns {
    Columns::new(
        rows.iter().map(|r| r.cell(0)).collect(),
        rows.iter().map(|r| r.cell(1)).collect(),
    )
}

/// Source serving fixed columns from memory.
///
/// Collections keep insertion order. The unscoped default range is whatever
/// was registered with [`InMemorySource::with_default`], or empty.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    names: Vec<String>,
    collections: HashMap<String, Columns>,
    default: Columns,
    unavailable: bool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection from `(identifier, text)` rows.
    pub fn with_collection(mut self, name: &str, rows: &[(&str, &str)]) -> Self {
        if !self.collections.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.collections.insert(name.to_string(), rows_to_columns(rows));
        self
    }

    /// Add a collection from raw columns of possibly different lengths.
    pub fn with_columns(mut self, name: &str, columns: Columns) -> Self {
        if !self.collections.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.collections.insert(name.to_string(), columns);
        self
    }

    /// Set the rows returned for the unscoped default range.
    pub fn with_default(mut self, rows: &[(&str, &str)]) -> Self {
        self.default = rows_to_columns(rows);
        self
    }

    /// Parse a YAML source file.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: SourceFile = serde_yaml_ng::from_str(yaml)?;
        let mut source = Self::new();
        source.default = file_rows_to_columns(&file.default);
        for entry in file.collections {
            source = source.with_columns(&entry.name, file_rows_to_columns(&entry.rows));
        }
        Ok(source)
    }

    /// Load a YAML source file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Make every fetch fail as if the source were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(ReaderError::Source {
                status: 503,
                body: "source unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn rows_to_columns(rows: &[(&str, &str)]) -> Columns {
    let (identifiers, texts) = rows
        .iter()
        .map(|(id, text)| ((*id).to_string(), (*text).to_string()))
        .unzip();
    Columns::new(identifiers, texts)
}

#[async_trait]
impl TabularSource for InMemorySource {
    async fn fetch_collection_names(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.names.clone())
    }

    async fn fetch_columns(&self, collection: Option<&str>) -> Result<Columns> {
        self.check_available()?;
        match collection {
            Some(name) => Ok(self.collections.get(name).cloned().unwrap_or_default()),
            None => Ok(self.default.clone()),
        }
    }
}
