//! Collection catalog: the legal areas a source offers.

use crate::error::Result;
use crate::source::TabularSource;

/// Enumerates collection names from a source.
pub struct CollectionCatalog<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: TabularSource + ?Sized> CollectionCatalog<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Distinct collection names in source order.
    ///
    /// A failing source yields an empty list; the failure is logged.
    pub async fn names(&self) -> Vec<String> {
        match self.try_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load collection names");
                Vec::new()
            }
        }
    }

    /// Like [`names`](Self::names), but reports source failures.
    pub async fn try_names(&self) -> Result<Vec<String>> {
        let raw = self.source.fetch_collection_names().await?;
        Ok(distinct_names(raw))
    }
}

/// Drop blank names and keep the first occurrence of duplicates.
///
/// Names are kept verbatim, padding included, because the source addresses
/// collections by their exact name.
fn distinct_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        if name.trim().is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_distinct_names() {
        let raw = vec![
            "Constituição Federal".to_string(),
            " ".to_string(),
            "Código Penal".to_string(),
            "Constituição Federal".to_string(),
        ];
        assert_eq!(
            distinct_names(raw),
            vec!["Constituição Federal", "Código Penal"]
        );
    }

    #[tokio::test]
    async fn test_names_from_source() {
        let source = InMemorySource::new()
            .with_collection("Constituição Federal", &[])
            .with_collection("Código Civil", &[]);
        let catalog = CollectionCatalog::new(&source);
        assert_eq!(
            catalog.names().await,
            vec!["Constituição Federal", "Código Civil"]
        );
    }

    #[tokio::test]
    async fn test_padded_names_stay_addressable() {
        let source = InMemorySource::new()
            .with_collection("Penal ", &[("5", "Lorem")])
            .with_collection("Penal", &[("5", "Ipsum")]);
        let names = CollectionCatalog::new(&source).names().await;
        assert_eq!(names, vec!["Penal ", "Penal"]);

        let results = crate::search::SearchEngine::new(&source)
            .search("5", None)
            .await;
        let texts: Vec<&str> = results.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["Lorem", "Ipsum"]);
    }

    #[tokio::test]
    async fn test_failing_source_yields_empty() {
        let source = InMemorySource::new()
            .with_collection("Penal", &[])
            .unavailable();
        let catalog = CollectionCatalog::new(&source);
        assert!(catalog.names().await.is_empty());
        assert!(catalog.try_names().await.is_err());
    }
}
