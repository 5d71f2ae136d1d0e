//! Google Sheets backed source.
//!
//! Each tab of the spreadsheet is a collection. Column A holds article
//! identifiers, column B the article text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::{SheetsConfig, IDENTIFIER_COLUMN, TEXT_COLUMN};
use crate::error::Result;
use crate::http::{create_client, download_bytes};
use crate::source::{Columns, TabularSource};

#[derive(Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

/// Source reading a spreadsheet through the Sheets v4 REST API.
pub struct SheetsSource {
    client: Client,
    config: SheetsConfig,
}

impl SheetsSource {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let client = create_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    async fn fetch_column(&self, collection: Option<&str>, column: &str) -> Result<Vec<String>> {
        let url = self.config.values_url(collection, column)?;
        tracing::debug!(collection = ?collection, column, "Fetching column");
        let bytes = download_bytes(&self.client, &url).await?;
        parse_column(&bytes)
    }
}

#[async_trait]
impl TabularSource for SheetsSource {
    async fn fetch_collection_names(&self) -> Result<Vec<String>> {
        let url = self.config.metadata_url()?;
        tracing::debug!(spreadsheet_id = %self.config.spreadsheet_id, "Fetching sheet names");
        let bytes = download_bytes(&self.client, &url).await?;
        parse_sheet_names(&bytes)
    }

    async fn fetch_columns(&self, collection: Option<&str>) -> Result<Columns> {
        let (identifiers, texts) = tokio::try_join!(
            self.fetch_column(collection, IDENTIFIER_COLUMN),
            self.fetch_column(collection, TEXT_COLUMN),
        )?;
        Ok(Columns::new(identifiers, texts))
    }
}

/// Extract tab titles from a spreadsheet metadata response.
pub fn parse_sheet_names(body: &[u8]) -> Result<Vec<String>> {
    let response: SpreadsheetResponse = serde_json::from_slice(body)?;
    Ok(response
        .sheets
        .into_iter()
        .map(|sheet| sheet.properties.title)
        .collect())
}

/// Extract the first cell of every row from a values response.
///
/// Rows keep their position even when empty, so the result stays aligned
/// with the other column. A response without `values` is an empty column.
pub fn parse_column(body: &[u8]) -> Result<Vec<String>> {
    let range: ValueRange = serde_json::from_slice(body)?;
    Ok(range
        .values
        .iter()
        .map(|row| row.first().map(cell_to_string).unwrap_or_default())
        .collect())
}

fn cell_to_string(cell: &JsonValue) -> String {
    match cell {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_sheet_names() {
        let body = r#"{
            "spreadsheetId": "abc",
            "sheets": [
                {"properties": {"sheetId": 0, "title": "Constituição Federal"}},
                {"properties": {"sheetId": 1, "title": "Código Penal"}}
            ]
        }"#;
        assert_eq!(
            parse_sheet_names(body.as_bytes()).unwrap(),
            vec!["Constituição Federal", "Código Penal"]
        );
    }

    #[test]
    fn test_parse_sheet_names_without_sheets() {
        assert!(parse_sheet_names(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_column_keeps_alignment() {
        let body = br#"{"range": "A1:A4", "majorDimension": "ROWS",
            "values": [["1"], [], ["3"], [4]]}"#;
        assert_eq!(parse_column(body).unwrap(), vec!["1", "", "3", "4"]);
    }

    #[test]
    fn test_parse_column_without_values() {
        let body = br#"{"range": "A1:A1000", "majorDimension": "ROWS"}"#;
        assert!(parse_column(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_column_rejects_garbage() {
        assert!(parse_column(b"<html>quota</html>").is_err());
    }
}
