//! SekhaClient integration tests against a mocked memory controller

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sekha_cli::error::{error_kind, SekhaError};
use sekha_cli::service::Conversation;

mod common;
use common::{client_for, conversation_json, mount_search, temp_file};

#[tokio::test]
async fn test_list_labels_aggregates_search_results() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![
            conversation_json("c1", "Work", &[]),
            conversation_json("c2", "Work", &[]),
            conversation_json("c3", "Personal", &[]),
        ],
    )
    .await;

    let labels = client_for(&server).list_labels().await.unwrap();

    let summary: Vec<(&str, usize)> = labels.iter().map(|l| (l.name.as_str(), l.count)).collect();
    assert_eq!(summary, vec![("Personal", 1), ("Work", 2)]);
}

#[tokio::test]
async fn test_list_labels_issues_match_all_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .and(body_json(json!({"query": "", "limit": 1000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).list_labels().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_markdown_contains_conversation() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![
            conversation_json(
                "conv-1",
                "Project:AI",
                &[("user", "Hello"), ("assistant", "Hi there")],
            ),
            conversation_json("conv-2", "Other", &[("user", "ignored")]),
        ],
    )
    .await;

    let content = client_for(&server)
        .export("Project:AI", "markdown")
        .await
        .unwrap();

    assert!(content.contains("# Project:AI"));
    assert!(content.contains("**Created:** 2024-01-01T00:00:00Z"));
    assert!(content.contains("**ID:** conv-1"));
    assert!(content.contains("**User:** Hello"));
    assert!(content.contains("**Assistant:** Hi there"));
    assert!(content.contains("---"));
    assert!(!content.contains("ignored"));
}

#[tokio::test]
async fn test_export_json_round_trips_matches() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![
            conversation_json("conv-1", "Work", &[("user", "a")]),
            conversation_json("conv-2", "Personal", &[("user", "b")]),
            conversation_json("conv-3", "Work", &[("user", "c")]),
        ],
    )
    .await;

    let content = client_for(&server).export("Work", "json").await.unwrap();
    let exported: Vec<Conversation> = serde_json::from_str(&content).unwrap();

    let ids: Vec<&str> = exported.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["conv-1", "conv-3"]);
}

#[tokio::test]
async fn test_export_unknown_label_is_empty() {
    let server = MockServer::start().await;
    mount_search(&server, vec![conversation_json("conv-1", "Work", &[])]).await;

    let client = client_for(&server);

    assert_eq!(client.export("Nope", "markdown").await.unwrap(), "");
    assert_eq!(client.export("Nope", "json").await.unwrap(), "[]");
}

#[tokio::test]
async fn test_export_unsupported_format_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).export("Work", "xml").await.unwrap_err();

    assert!(matches!(error_kind(&err), Some(SekhaError::Validation(_))));
    assert!(err.to_string().contains("Unsupported format: xml"));
}

#[tokio::test]
async fn test_store_conversation_creates_remotely() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/conversations"))
        .and(body_json(json!({
            "label": "Imported",
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "conv-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, file) = temp_file(
        "conv.json",
        r#"{"messages": [{"role": "user", "content": "Hello"}, {"role": "assistant", "content": "Hi"}]}"#,
    );

    let stored = client_for(&server)
        .store_conversation(&file, "Imported")
        .await
        .unwrap();

    assert_eq!(stored.id, "conv-123");
    assert_eq!(stored.label, "Imported");
}

#[tokio::test]
async fn test_store_without_messages_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "never"})))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, file) = temp_file("empty.json", r#"{"messages": []}"#);
    let err = client_for(&server)
        .store_conversation(&file, "Test")
        .await
        .unwrap_err();

    assert!(matches!(error_kind(&err), Some(SekhaError::Validation(_))));
    assert!(err.to_string().contains("No messages found"));
}

#[tokio::test]
async fn test_store_invalid_json_is_serialization_error() {
    let server = MockServer::start().await;
    let (_dir, file) = temp_file("broken.json", "{ not json");

    let err = client_for(&server)
        .store_conversation(&file, "Test")
        .await
        .unwrap_err();

    assert!(matches!(
        error_kind(&err),
        Some(SekhaError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_unlabeled_result_is_counted_but_not_exported() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![
            json!({"id": "c1", "preview": "p", "importance": 0.2}),
            conversation_json("c2", "Work", &[]),
        ],
    )
    .await;

    let client = client_for(&server);

    let labels = client.list_labels().await.unwrap();
    let summary: Vec<(&str, usize)> = labels.iter().map(|l| (l.name.as_str(), l.count)).collect();
    assert_eq!(summary, vec![("Unknown", 1), ("Work", 1)]);

    assert_eq!(client.export("Unknown", "json").await.unwrap(), "[]");
}

#[tokio::test]
async fn test_export_json_passes_unknown_fields_through() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![json!({"id": "c1", "label": "Work", "preview": "p", "importance": 0.2})],
    )
    .await;

    let content = client_for(&server).export("Work", "json").await.unwrap();
    let exported: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        exported,
        json!([{"id": "c1", "label": "Work", "preview": "p", "importance": 0.2}])
    );
}

#[tokio::test]
async fn test_store_null_messages_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "never"})))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, file) = temp_file("null.json", r#"{"messages": null}"#);
    let err = client_for(&server)
        .store_conversation(&file, "Test")
        .await
        .unwrap_err();

    assert!(matches!(error_kind(&err), Some(SekhaError::Validation(_))));
}
