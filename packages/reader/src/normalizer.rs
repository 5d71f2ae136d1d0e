//! Row normalization: two raw, index-aligned columns into ordered articles.

use crate::types::Article;

/// Normalize parallel identifier and text columns into articles.
///
/// Iterates over the longer of the two columns; a missing cell on either side
/// is treated as empty. Rows where both cells are empty (after trimming) are
/// dropped, everything else is kept in source order and classified once as
/// heading, article or orphan.
///
/// # Arguments
/// * `identifiers` - Cells of the identifier column
/// * `texts` - Cells of the text column
/// * `collection` - Name recorded on every emitted article
///
/// # Examples
/// ```
/// use vademecum_reader::normalizer::normalize_rows;
/// use vademecum_reader::types::RowKind;
///
/// let ids = vec!["".to_string(), "1".to_string(), "2".to_string()];
/// let texts = vec!["TÍTULO I".to_string(), "Texto".to_string()];
/// let articles = normalize_rows(&ids, &texts, "Penal");
///
/// let kinds: Vec<RowKind> = articles.iter().map(|a| a.kind).collect();
/// assert_eq!(kinds, vec![RowKind::Heading, RowKind::Article, RowKind::Orphan]);
/// ```
pub fn normalize_rows<S: AsRef<str>>(
    identifiers: &[S],
    texts: &[S],
    collection: &str,
) -> Vec<Article> {
    let row_count = identifiers.len().max(texts.len());
    let mut articles = Vec::with_capacity(row_count);

    for index in 0..row_count {
        let identifier = identifiers.get(index).map_or("", AsRef::as_ref);
        let text = texts.get(index).map_or("", AsRef::as_ref);

        if let Some(article) = Article::from_cells(identifier, text, collection) {
            articles.push(article);
        }
    }

    tracing::debug!(
        collection,
        rows = row_count,
        articles = articles.len(),
        "Normalized rows"
    );
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowKind;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_preserves_row_order() {
        let ids = cells(&["1", "2", "3"]);
        let texts = cells(&["um", "dois", "três"]);
        let articles = normalize_rows(&ids, &texts, "Penal");
        let order: Vec<&str> = articles.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        assert!(articles.iter().all(|a| a.collection == "Penal"));
    }

    #[test]
    fn test_drops_fully_empty_rows() {
        let ids = cells(&["1", "", "", "2"]);
        let texts = cells(&["um", "", " ", "dois"]);
        let articles = normalize_rows(&ids, &texts, "Penal");
        assert_eq!(articles.len(), 2);
        assert!(articles
            .iter()
            .all(|a| !(a.identifier.is_empty() && a.text.is_empty())));
    }

    #[test]
    fn test_longer_identifier_column_yields_orphans() {
        let ids = cells(&["1", "2", "3"]);
        let texts = cells(&["um"]);
        let articles = normalize_rows(&ids, &texts, "Penal");
        let kinds: Vec<RowKind> = articles.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![RowKind::Article, RowKind::Orphan, RowKind::Orphan]);
    }

    #[test]
    fn test_longer_text_column_yields_headings() {
        let ids = cells(&[]);
        let texts = cells(&["PARTE GERAL", "TÍTULO I"]);
        let articles = normalize_rows(&ids, &texts, "Penal");
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(Article::is_heading));
    }

    #[test]
    fn test_heading_flag_matches_cells() {
        let ids = cells(&["", "1", "2", ""]);
        let texts = cells(&["TÍTULO I", "um", "", ""]);
        for article in normalize_rows(&ids, &texts, "Penal") {
            assert_eq!(
                article.is_heading(),
                !article.text.is_empty() && article.identifier.is_empty()
            );
        }
    }

    #[test]
    fn test_empty_columns() {
        let empty: Vec<String> = Vec::new();
        assert!(normalize_rows(&empty, &empty, "Penal").is_empty());
    }
}
