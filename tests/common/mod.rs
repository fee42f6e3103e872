use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sekha_cli::SekhaClient;

pub const API_KEY: &str = "sk-test-valid-key-1234567890";

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> SekhaClient {
    SekhaClient::connect(&server.uri(), API_KEY).expect("failed to connect client")
}

#[allow(dead_code)]
pub fn conversation_json(id: &str, label: &str, messages: &[(&str, &str)]) -> Value {
    json!({
        "id": id,
        "label": label,
        "created_at": "2024-01-01T00:00:00Z",
        "messages": messages
            .iter()
            .map(|(role, content)| json!({"role": role, "content": content}))
            .collect::<Vec<_>>(),
    })
}

/// Mount a `POST /api/v1/query` mock returning `results`
#[allow(dead_code)]
pub async fn mount_search(server: &MockServer, results: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// Mount a `GET /api/v1/prune/suggestions` mock returning `(id, reason)` pairs
#[allow(dead_code)]
pub async fn mount_suggestions(server: &MockServer, suggestions: &[(&str, &str)]) {
    let body: Vec<Value> = suggestions
        .iter()
        .map(|(id, reason)| json!({"id": id, "reason": reason}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/prune/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "suggestions": body })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let file_path = temp_dir.path().join(name);
    fs::write(&file_path, contents).expect("failed to write file");
    (temp_dir, file_path)
}
