//! HTTP client wrapper for reading from the spreadsheet API.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::{ReaderError, Result};

/// User agent string identifying this reader.
const USER_AGENT: &str = concat!("vademecum-reader/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
const MAX_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// The timeout is the only cancellation mechanism for a fetch.
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Outcome of a single request.
enum Attempt {
    Body(Vec<u8>),
    /// Worth retrying: a 5xx status, a refused connection or a timeout.
    Transient(String),
}

/// Backoff before retry number `retry` (1-based): 500ms, then 1s.
fn backoff(retry: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS << (retry - 1))
}

/// Fetch a response body, retrying transient failures with exponential
/// backoff.
///
/// Any other non-success status fails at once with
/// [`ReaderError::Source`]; when every attempt is transient the result is
/// [`ReaderError::RetriesExhausted`].
pub async fn download_bytes(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let mut last_failure = String::from("no attempt made");

    for attempt in 1..=MAX_ATTEMPTS {
        if attempt > 1 {
            tokio::time::sleep(backoff(attempt - 1)).await;
        }

        match fetch_once(client, url).await? {
            Attempt::Body(bytes) => return Ok(bytes),
            Attempt::Transient(reason) => {
                tracing::warn!(
                    url = %redacted(url),
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    reason = %reason,
                    "Transient source failure"
                );
                last_failure = reason;
            }
        }
    }

    Err(ReaderError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
        message: last_failure,
    })
}

async fn fetch_once(client: &Client, url: &Url) -> Result<Attempt> {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) if e.is_connect() || e.is_timeout() => {
            return Ok(Attempt::Transient(e.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let status = response.status();
    if status.is_server_error() {
        return Ok(Attempt::Transient(format!("status {status}")));
    }
    if !status.is_success() {
        return Err(ReaderError::Source {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    Ok(Attempt::Body(response.bytes().await?.to_vec()))
}

/// The URL without its query, so the API key stays out of logs.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client(5).is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(500));
        assert_eq!(backoff(2), Duration::from_millis(1000));
    }

    #[test]
    fn test_redacted_drops_key() {
        let url =
            Url::parse("https://sheets.googleapis.com/v4/spreadsheets/abc?key=secret").unwrap();
        assert_eq!(redacted(&url), "https://sheets.googleapis.com/v4/spreadsheets/abc");
    }
}
