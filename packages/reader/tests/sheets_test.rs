//! End-to-end tests for the Google Sheets source against a mock server.

use pretty_assertions::assert_eq;
use vademecum_reader::config::SheetsConfig;
use vademecum_reader::source::SheetsSource;
use vademecum_reader::{
    ArticleRepository, CachingSource, CollectionCatalog, Direction, Navigator, ReaderError,
    RowKind, SearchEngine, TabularSource,
};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPREADSHEET_ID: &str = "1rctu_xg4P0KkMWKbzu7-mgJp-HjCu-cT8DZqNAzln-s";
const API_KEY: &str = "test-key";

fn source_for(server: &MockServer) -> SheetsSource {
    let config = SheetsConfig::new(SPREADSHEET_ID, API_KEY)
        .with_base_url(server.uri())
        .with_timeout_secs(5);
    SheetsSource::new(config).unwrap()
}

fn column(cells: &[&str]) -> serde_json::Value {
    let rows: Vec<Vec<&str>> = cells
        .iter()
        .map(|c| if c.is_empty() { vec![] } else { vec![*c] })
        .collect();
    serde_json::json!({ "range": "A1:A100", "majorDimension": "ROWS", "values": rows })
}

async fn mount_column(server: &MockServer, pattern: &str, cells: &[&str]) {
    Mock::given(method("GET"))
        .and(path_regex(pattern))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(column(cells)))
        .mount(server)
        .await;
}

async fn mount_sheet_names(server: &MockServer, names: &[&str]) {
    let sheets: Vec<serde_json::Value> = names
        .iter()
        .map(|name| serde_json::json!({ "properties": { "title": name } }))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}")))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "spreadsheetId": SPREADSHEET_ID,
            "sheets": sheets,
        })))
        .mount(server)
        .await;
}

/// Two tabs, "Penal" and "Civil", both containing an article 5.
async fn mount_two_collections(server: &MockServer) {
    mount_sheet_names(server, &["Penal", "Civil"]).await;
    mount_column(server, r"/values/.*Penal.*A:A$", &["", "1", "5", "", "8"]).await;
    mount_column(
        server,
        r"/values/.*Penal.*B:B$",
        &["PARTE GERAL", "Não há crime sem lei anterior", "Lorem", "", "Saúde pública"],
    )
    .await;
    mount_column(server, r"/values/.*Civil.*A:A$", &["5", "6"]).await;
    mount_column(server, r"/values/.*Civil.*B:B$", &["A SAÚDE do menor", "Capacidade"]).await;
}

#[tokio::test]
async fn test_catalog_reads_sheet_names() {
    let server = MockServer::start().await;
    mount_sheet_names(&server, &["Penal", "Civil", "Penal"]).await;

    let source = source_for(&server);
    let names = CollectionCatalog::new(&source).names().await;
    assert_eq!(names, vec!["Penal", "Civil"]);
}

#[tokio::test]
async fn test_repository_normalizes_columns() {
    let server = MockServer::start().await;
    mount_two_collections(&server).await;

    let source = source_for(&server);
    let repository = ArticleRepository::new(&source);
    let articles = repository.list(Some("Penal")).await;

    let kinds: Vec<RowKind> = articles.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![RowKind::Heading, RowKind::Article, RowKind::Article, RowKind::Article]
    );
    assert!(articles.iter().all(|a| a.collection == "Penal"));
    assert_eq!(
        repository.all_identifiers(Some("Penal")).await,
        vec!["1", "5", "8"]
    );
}

#[tokio::test]
async fn test_unscoped_range_uses_default_label() {
    let server = MockServer::start().await;
    mount_column(&server, r"/values/A:A$", &["1"]).await;
    mount_column(&server, r"/values/B:B$", &["Primeiro artigo"]).await;

    let source = source_for(&server);
    let article = ArticleRepository::new(&source).get("1", None).await.unwrap();
    assert_eq!(article.collection, "default");
    assert_eq!(article.text, "Primeiro artigo");
}

#[tokio::test]
async fn test_search_across_collections_in_catalog_order() {
    let server = MockServer::start().await;
    mount_two_collections(&server).await;

    let source = source_for(&server);
    let engine = SearchEngine::new(&source);

    let by_number: Vec<(String, String)> = engine
        .search("5", None)
        .await
        .into_iter()
        .map(|a| (a.collection, a.text))
        .collect();
    assert_eq!(
        by_number,
        vec![
            ("Penal".to_string(), "Lorem".to_string()),
            ("Civil".to_string(), "A SAÚDE do menor".to_string()),
        ]
    );

    let by_text: Vec<String> = engine
        .search("saúde", None)
        .await
        .into_iter()
        .map(|a| format!("{}:{}", a.collection, a.identifier))
        .collect();
    assert_eq!(by_text, vec!["Penal:8", "Civil:5"]);
}

#[tokio::test]
async fn test_navigation_over_fetched_identifiers() {
    let server = MockServer::start().await;
    mount_two_collections(&server).await;

    let source = source_for(&server);
    let navigator = Navigator::new(&source);
    assert_eq!(navigator.step("8", Some("Penal"), Direction::Next).await, "1");
    assert_eq!(navigator.step("1", Some("Penal"), Direction::Previous).await, "8");
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    mount_sheet_names(&server, &["Penal"]).await;

    Mock::given(method("GET"))
        .and(path_regex(r"/values/.*Penal.*A:A$"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_column(&server, r"/values/.*Penal.*A:A$", &["1"]).await;
    mount_column(&server, r"/values/.*Penal.*B:B$", &["Texto"]).await;

    let source = source_for(&server);
    let articles = ArticleRepository::new(&source)
        .try_list(Some("Penal"))
        .await
        .unwrap();
    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn test_client_error_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let repository = ArticleRepository::new(&source);

    assert!(repository.list(Some("Penal")).await.is_empty());
    assert!(repository.get("5", Some("Penal")).await.is_none());
    assert!(CollectionCatalog::new(&source).names().await.is_empty());
    assert!(SearchEngine::new(&source).search("5", None).await.is_empty());

    match repository.try_list(Some("Penal")).await {
        Err(ReaderError::Source { status, body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, "API key not valid");
        }
        other => panic!("expected source error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cache_serves_until_invalidated() {
    let server = MockServer::start().await;
    mount_sheet_names(&server, &["Penal"]).await;

    let source = CachingSource::new(source_for(&server));
    assert_eq!(source.fetch_collection_names().await.unwrap(), vec!["Penal"]);
    assert_eq!(source.fetch_collection_names().await.unwrap(), vec!["Penal"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    source.invalidate().await;
    source.fetch_collection_names().await.unwrap();
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}
