//! Relation store backed by an in-memory table.
//!
//! Tables load from YAML:
//!
//! ```yaml
//! relations:
//!   - from: "5"
//!     to: "7"
//!     type: related
//!     description: Direitos relacionados
//!     collection: Constituição Federal
//! ```

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::relations::RelationStore;
use crate::types::{CrossReference, RelationType};

/// Collection of the built-in table.
const CONSTITUTION: &str = "Constituição Federal";

#[derive(Debug, Default, Serialize, Deserialize)]
struct RelationTable {
    #[serde(default)]
    relations: Vec<CrossReference>,
}

/// Relation store holding every relation in declaration order.
#[derive(Debug, Default)]
pub struct StaticRelationStore {
    relations: RwLock<Vec<CrossReference>>,
}

impl StaticRelationStore {
    pub fn new(relations: Vec<CrossReference>) -> Self {
        Self {
            relations: RwLock::new(relations),
        }
    }

    /// Parse a YAML relation table.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let table: RelationTable = serde_yaml_ng::from_str(yaml)?;
        Ok(Self::new(table.relations))
    }

    /// Load a YAML relation table from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let store = Self::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), "Loaded relation table");
        Ok(store)
    }

    /// Serialize the current table back to YAML.
    pub async fn to_yaml(&self) -> Result<String> {
        let table = RelationTable {
            relations: self.relations.read().await.clone(),
        };
        Ok(serde_yaml_ng::to_string(&table)?)
    }

    /// Built-in table for the Federal Constitution.
    pub fn builtin() -> Self {
        let relation = |from: &str, to: &str, relation: RelationType, description: &str| {
            CrossReference::new(from, to, relation)
                .with_description(description)
                .in_collection(CONSTITUTION)
        };

        Self::new(vec![
            relation(
                "5",
                "7",
                RelationType::Related,
                "Direitos relacionados aos citados neste artigo",
            ),
            relation(
                "5",
                "14",
                RelationType::Complementary,
                "Complementa os direitos previstos neste artigo",
            ),
            relation(
                "6",
                "196",
                RelationType::Related,
                "Direito à saúde tratado em detalhes",
            ),
            relation(
                "8",
                "9",
                RelationType::Complementary,
                "Direitos trabalhistas complementares",
            ),
            relation(
                "10",
                "11",
                RelationType::Related,
                "Normas relacionadas a representação coletiva",
            ),
            relation(
                "14",
                "5",
                RelationType::Related,
                "Relacionado aos direitos fundamentais",
            ),
        ])
    }

    pub async fn len(&self) -> usize {
        self.relations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.relations.read().await.is_empty()
    }
}

#[async_trait]
impl RelationStore for StaticRelationStore {
    async fn fetch_relations(
        &self,
        identifier: &str,
        _collection: Option<&str>,
    ) -> Result<Vec<CrossReference>> {
        Ok(self
            .relations
            .read()
            .await
            .iter()
            .filter(|r| r.from == identifier)
            .cloned()
            .collect())
    }

    async fn save(&self, reference: CrossReference) -> Result<()> {
        tracing::debug!(from = %reference.from, to = %reference.to, "Saving cross-reference");
        self.relations.write().await.push(reference);
        Ok(())
    }
}
