//! End-to-end tests for a complete run
//!
//! Wiremock servers stand in for Ollama and OpenMemory. A counting memory
//! client is used where the assertion is about which operations were invoked.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use memprobe_engine::config::RunConfiguration;
use memprobe_engine::handlers::{execute, handle_run, Outcome, RunOptions};
use memprobe_engine::memory::OpenMemoryClient;
use memprobe_engine::probe::ReadinessProber;
use sdk::errors::EngineError;
use sdk::memory_client::{ClientAvailability, MemoryClient, MemoryError, Result};
use sdk::types::{AddOptions, MemoryMessage, SearchOptions, SearchResults};

#[derive(Clone, Default)]
struct CountingClient {
    searches: Arc<AtomicUsize>,
    adds: Arc<AtomicUsize>,
    fail_search: bool,
}

#[async_trait]
impl MemoryClient for CountingClient {
    fn name(&self) -> &str {
        "counting"
    }

    async fn search(&self, _query: &str, _options: &SearchOptions) -> Result<SearchResults> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(MemoryError::Status {
                status: 500,
                body: "vector store offline".to_string(),
            });
        }
        Ok(SearchResults(json!({"results": []})))
    }

    async fn add(
        &self,
        _messages: &[MemoryMessage],
        _options: &AddOptions,
    ) -> Result<serde_json::Value> {
        assert_eq!(
            self.searches.load(Ordering::SeqCst),
            1,
            "add must follow a search"
        );
        self.adds.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"message": "ok"}))
    }
}

async fn service(probe_status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(probe_status))
        .mount(&server)
        .await;
    server
}

fn config_for(ollama: &MockServer, openmemory: &MockServer) -> RunConfiguration {
    RunConfiguration {
        memory_service_url: openmemory.uri(),
        llm_service_url: ollama.uri(),
        ..RunConfiguration::default()
    }
}

#[tokio::test]
async fn test_full_run_succeeds_against_openmemory() {
    let ollama = service(200).await;
    let openmemory = service(200).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"memory": "Likes spicy food"}]
        })))
        .expect(1)
        .mount(&openmemory)
        .await;
    Mock::given(method("POST"))
        .and(path("/memories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&openmemory)
        .await;

    let config = config_for(&ollama, &openmemory);
    let outcome = handle_run(
        &config,
        &RunOptions::default(),
        &ReadinessProber::default(),
        OpenMemoryClient::load(&config),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, Outcome::Success));
    assert_eq!(outcome.exit_code(), 0);

    let paths: Vec<String> = openmemory
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(paths, vec!["GET /", "POST /search", "POST /memories"]);
}

#[tokio::test]
async fn test_llm_probe_500_halts_before_memory_operations() {
    let ollama = service(500).await;
    let openmemory = service(200).await;
    let client = CountingClient::default();

    let outcome = handle_run(
        &config_for(&ollama, &openmemory),
        &RunOptions::default(),
        &ReadinessProber::default(),
        ClientAvailability::Loaded(Box::new(client.clone())),
    )
    .await
    .unwrap();

    match &outcome {
        Outcome::Failed(EngineError::Unreachable(names)) => {
            assert_eq!(names, &vec!["Ollama".to_string()])
        }
        other => panic!("Expected Unreachable, got: {:?}", other),
    }
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(client.searches.load(Ordering::SeqCst), 0);
    assert_eq!(client.adds.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_memory_server_sends_no_memory_requests() {
    let ollama = service(200).await;
    let openmemory = service(503).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&openmemory)
        .await;

    let config = config_for(&ollama, &openmemory);
    let outcome = handle_run(
        &config,
        &RunOptions::default(),
        &ReadinessProber::default(),
        OpenMemoryClient::load(&config),
    )
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(EngineError::Unreachable(_))
    ));
}

#[tokio::test]
async fn test_search_error_skips_add() {
    let ollama = service(200).await;
    let openmemory = service(200).await;
    let client = CountingClient {
        fail_search: true,
        ..CountingClient::default()
    };

    let outcome = handle_run(
        &config_for(&ollama, &openmemory),
        &RunOptions::default(),
        &ReadinessProber::default(),
        ClientAvailability::Loaded(Box::new(client.clone())),
    )
    .await
    .unwrap();

    match &outcome {
        Outcome::Failed(EngineError::MemoryOperation(msg)) => {
            assert!(msg.contains("vector store offline"))
        }
        other => panic!("Expected MemoryOperation, got: {:?}", other),
    }
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(client.searches.load(Ordering::SeqCst), 1);
    assert_eq!(client.adds.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_server_side_search_failure_never_reaches_add_endpoint() {
    let ollama = service(200).await;
    let openmemory = service(200).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&openmemory)
        .await;
    Mock::given(method("POST"))
        .and(path("/memories"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&openmemory)
        .await;

    let config = config_for(&ollama, &openmemory);
    let outcome = handle_run(
        &config,
        &RunOptions::default(),
        &ReadinessProber::default(),
        OpenMemoryClient::load(&config),
    )
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(EngineError::MemoryOperation(_))
    ));
}

#[tokio::test]
async fn test_counting_client_success_exits_zero() {
    let ollama = service(200).await;
    let openmemory = service(200).await;
    let client = CountingClient::default();

    let outcome = handle_run(
        &config_for(&ollama, &openmemory),
        &RunOptions::default(),
        &ReadinessProber::default(),
        ClientAvailability::Loaded(Box::new(client.clone())),
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(client.searches.load(Ordering::SeqCst), 1);
    assert_eq!(client.adds.load(Ordering::SeqCst), 1);
}

struct PanickingClient;

#[async_trait]
impl MemoryClient for PanickingClient {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn search(&self, _query: &str, _options: &SearchOptions) -> Result<SearchResults> {
        panic!("failed printing to stdout: Broken pipe (os error 32)");
    }

    async fn add(
        &self,
        _messages: &[MemoryMessage],
        _options: &AddOptions,
    ) -> Result<serde_json::Value> {
        Ok(json!({}))
    }
}

#[tokio::test]
async fn test_panic_during_run_exits_one() {
    let ollama = service(200).await;
    let openmemory = service(200).await;

    let code = execute(
        config_for(&ollama, &openmemory),
        RunOptions::default(),
        ReadinessProber::default(),
        ClientAvailability::Loaded(Box::new(PanickingClient)),
    )
    .await;

    assert_eq!(code, 1);
}

#[tokio::test]
async fn test_execute_success_exits_zero() {
    let ollama = service(200).await;
    let openmemory = service(200).await;
    let client = CountingClient::default();

    let code = execute(
        config_for(&ollama, &openmemory),
        RunOptions::default(),
        ReadinessProber::default(),
        ClientAvailability::Loaded(Box::new(client.clone())),
    )
    .await;

    assert_eq!(code, 0);
    assert_eq!(client.adds.load(Ordering::SeqCst), 1);
}
