//! Integration tests for arXiv MCP
//!
//! These tests drive the search pipeline end to end, against the mock source
//! and against the real client talking to a local mock HTTP server.

use arxiv_mcp::mcp::{McpServer, ToolRegistry, SEARCH_TOOL_NAME};
use arxiv_mcp::models::SearchCriteria;
use arxiv_mcp::search::{search, SearchError};
use arxiv_mcp::sources::mock::make_record;
use arxiv_mcp::sources::{ArxivApi, ArxivClient, MockSource, SourceError};
use arxiv_mcp::utils::HttpClient;
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title>arXiv Query</title>
  <id>http://arxiv.org/api/abc</id>
  <entry>
    <id>http://arxiv.org/abs/2305.01234v1</id>
    <updated>2023-05-03T17:00:00Z</updated>
    <published>2023-05-02T17:00:00Z</published>
    <title>Quantum   Walks on
      Graphs</title>
    <summary>
      We analyse quantum walks.
    </summary>
    <author>
      <name>Jane Doe</name>
    </author>
    <arxiv:comment>10 pages</arxiv:comment>
    <link href="http://arxiv.org/abs/2305.01234v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2305.01234v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="quant-ph" scheme="http://arxiv.org/schemas/atom"/>
    <category term="quant-ph" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

fn client_for(server: &mockito::ServerGuard) -> ArxivClient {
    let http = Arc::new(HttpClient::new().unwrap());
    ArxivClient::with_client(http, &format!("{}/api/query", server.url())).unwrap()
}

#[tokio::test]
async fn test_client_sends_composed_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "search_query".into(),
                "ti:quantum submittedDate:[202301010000 TO 202312310000]".into(),
            ),
            Matcher::UrlEncoded("start".into(), "0".into()),
            Matcher::UrlEncoded("max_results".into(), "3".into()),
            Matcher::UrlEncoded("sortBy".into(), "relevance".into()),
            Matcher::UrlEncoded("sortOrder".into(), "descending".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let criteria = SearchCriteria::new()
        .title("quantum")
        .submitted_since("2023-01-01")
        .submitted_before("2023-12-31")
        .max_results(3)
        .return_fields(["id", "title", "summary", "pdf_url"]);

    let results = search(&client, &criteria).await.unwrap();
    mock.assert_async().await;

    assert_eq!(results.len(), 1);
    let entry = &results.entries[0];
    assert_eq!(entry.id.as_deref(), Some("2305.01234v1"));
    assert_eq!(entry.title.as_deref(), Some("Quantum Walks on Graphs"));
    assert_eq!(entry.summary.as_deref(), Some("We analyse quantum walks."));
    assert_eq!(entry.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2305.01234v1"));
    assert!(entry.authors.is_none());
    assert!(entry.comment.is_none());
}

#[tokio::test]
async fn test_client_id_list_only() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id_list".into(), "2305.01234,2301.00001".into()),
            Matcher::UrlEncoded("max_results".into(), "20".into()),
        ]))
        .with_status(200)
        .with_body(FEED)
        .create_async()
        .await;

    let client = client_for(&server);
    let criteria = SearchCriteria::new().id_list(["2305.01234", "2301.00001"]);
    let results = search(&client, &criteria).await.unwrap();
    mock.assert_async().await;

    // No return fields: every attribute is present
    let entry = &results.entries[0];
    assert!(entry.published.is_some());
    assert_eq!(entry.comment.as_deref(), Some("10 pages"));
    assert_eq!(
        entry.primary_category.as_ref().map(|c| c.term.as_str()),
        Some("quant-ph")
    );
    assert_eq!(
        entry.abstract_url.as_deref(),
        Some("http://arxiv.org/abs/2305.01234v1")
    );
}

#[tokio::test]
async fn test_client_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = search(&client, &SearchCriteria::new().all("electron"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Upstream(SourceError::Api(_))));
}

#[tokio::test]
async fn test_client_error_entry() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#max_results_must_be_non-negative</id>
    <title>Error</title>
    <summary>max_results must be non-negative</summary>
  </entry>
</feed>"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .search("all:x", &Default::default())
        .await
        .unwrap_err();
    match err {
        SourceError::Api(msg) => assert_eq!(msg, "max_results must be non-negative"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_date_never_reaches_upstream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = search(&client, &SearchCriteria::new().submitted_since("2023/01/01"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Query(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tool_registry_end_to_end() {
    let source = Arc::new(MockSource::with_records(vec![
        make_record("2401.00001v1", "One"),
        make_record("2401.00002v1", "Two"),
        make_record("2401.00003v1", "Three"),
    ]));
    let registry = ToolRegistry::from_source(source.clone());

    let result = registry
        .execute(
            SEARCH_TOOL_NAME,
            json!({
                "author": "Doe",
                "subject_category": "cs.AI",
                "max": 2,
                "return_fields": ["ID", "title", "nonsense"]
            }),
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({
            "entries": [
                { "id": "2401.00001v1", "title": "One" },
                { "id": "2401.00002v1", "title": "Two" }
            ]
        })
    );
    let calls = source.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "au:Doe cat:cs.AI");
    assert_eq!(calls[0].params.max_results, 2);
}

#[test]
fn test_mcp_server_creation() {
    let source: Arc<dyn ArxivApi> = Arc::new(MockSource::new());
    let server = McpServer::new(source);
    assert!(server.is_ok());
}
