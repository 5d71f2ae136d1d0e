//! Configuration constants, environment loading and URL building for the
//! spreadsheet source.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{ReaderError, Result};

/// Base URL for the Google Sheets API.
pub const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";

/// HTTP timeout in seconds.
///
/// A timed-out fetch is treated exactly like an empty source.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Column holding article identifiers.
pub const IDENTIFIER_COLUMN: &str = "A:A";

/// Column holding article text.
pub const TEXT_COLUMN: &str = "B:B";

/// Collection name given to articles read from the unscoped default range.
pub const DEFAULT_COLLECTION: &str = "default";

/// Width used when wrapping article text in the terminal.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Maximum number of entries kept in the reading history.
pub const HISTORY_LIMIT: usize = 20;

/// Spreadsheet ID pattern.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPREADSHEET_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{20,100}$").expect("valid regex"));

/// Validate a spreadsheet identifier.
///
/// # Examples
/// ```
/// use vademecum_reader::config::validate_spreadsheet_id;
///
/// assert!(validate_spreadsheet_id("1rctu_xg4P0KkMWKbzu7-mgJp-HjCu-cT8DZqNAzln-s").is_ok());
/// assert!(validate_spreadsheet_id("not/an id").is_err());
/// ```
pub fn validate_spreadsheet_id(id: &str) -> Result<()> {
    if SPREADSHEET_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(ReaderError::InvalidSpreadsheetId(id.to_string()))
    }
}

/// Connection settings for the Google Sheets source.
///
/// `Debug` is implemented by hand so the API key never ends up in logs.
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            api_key: api_key.into(),
            base_url: SHEETS_API_BASE_URL.to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }

    /// Load settings from `VADEMECUM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let spreadsheet_id = std::env::var("VADEMECUM_SPREADSHEET_ID")
            .map_err(|_| ReaderError::Config("VADEMECUM_SPREADSHEET_ID not set".into()))?;
        validate_spreadsheet_id(&spreadsheet_id)?;

        let api_key = std::env::var("VADEMECUM_API_KEY")
            .map_err(|_| ReaderError::Config("VADEMECUM_API_KEY not set".into()))?;

        let base_url = std::env::var("VADEMECUM_SHEETS_BASE_URL")
            .unwrap_or_else(|_| SHEETS_API_BASE_URL.into());

        let timeout_secs = std::env::var("VADEMECUM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        Ok(Self {
            spreadsheet_id,
            api_key,
            base_url,
            timeout_secs,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// URL of the spreadsheet metadata, which lists the tabs.
    pub fn metadata_url(&self) -> Result<Url> {
        self.build_url(&[])
    }

    /// URL of one column of one collection.
    ///
    /// Without a collection the range carries no tab prefix, which the API
    /// resolves to the first tab of the spreadsheet.
    ///
    /// # Arguments
    /// * `collection` - Tab name, or `None` for the unscoped default range
    /// * `column` - A1 column range, e.g. [`IDENTIFIER_COLUMN`]
    pub fn values_url(&self, collection: Option<&str>, column: &str) -> Result<Url> {
        let range = a1_range(collection, column);
        self.build_url(&["values", &range])
    }

    fn build_url(&self, tail: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ReaderError::Config(format!("base URL cannot be a base: {}", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
                .extend(tail);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

/// Build an A1 range, quoting the tab name when one is given.
///
/// # Examples
/// ```
/// use vademecum_reader::config::a1_range;
///
/// assert_eq!(a1_range(None, "A:A"), "A:A");
/// assert_eq!(a1_range(Some("Código Civil"), "B:B"), "'Código Civil'!B:B");
/// assert_eq!(a1_range(Some("D'Lei"), "A:A"), "'D''Lei'!A:A");
/// ```
pub fn a1_range(collection: Option<&str>, column: &str) -> String {
    match collection {
        Some(name) => format!("'{}'!{column}", name.replace('\'', "''")),
        None => column.to_string(),
    }
}
