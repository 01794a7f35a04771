//! OpenMemory client
//!
//! This module implements the `MemoryClient` trait for an OpenMemory (mem0)
//! REST server, typically at http://localhost:8765.
//!
//! Endpoints used:
//! - `POST /search` with `{query, user_id, limit}`
//! - `POST /memories` with `{messages, user_id}`
//! - `POST /configure` with the mem0 config document (opt-in)
//!
//! The HTTP client keeps reqwest's default timeouts.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use sdk::memory_client::{ClientAvailability, MemoryClient, MemoryError, Result};
use sdk::types::{AddOptions, MemoryMessage, SearchOptions, SearchResults};

use crate::config::RunConfiguration;

/// LLM settings the memory service uses to extract memories
#[derive(Debug, Clone, PartialEq, Serialize)]
struct LlmSettings {
    /// Model name (e.g., "mixtral:8x7b")
    model: String,

    /// Sampling temperature, serialized as `null` when NaN
    temperature: f64,

    /// Generation bound, `null` when unparsed
    max_tokens: Option<i64>,

    /// Ollama runtime the memory service should call
    ollama_base_url: String,
}

/// OpenMemory client bound to one run configuration
#[derive(Debug, Clone)]
pub struct OpenMemoryClient {
    /// Base URL for the OpenMemory API
    base_url: Url,

    /// LLM settings pushed by `configure`
    llm: LlmSettings,

    /// HTTP client for API requests
    client: Client,
}

impl OpenMemoryClient {
    /// Create a client bound to `config`. No network I/O happens here.
    ///
    /// Fails when the memory-service URL is not an absolute http(s) URL or
    /// the HTTP client cannot be built.
    pub fn new(config: &RunConfiguration) -> std::result::Result<Self, String> {
        let mut base_url = Url::parse(&config.memory_service_url).map_err(|e| {
            format!(
                "invalid memory service URL '{}': {}",
                config.memory_service_url, e
            )
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(format!(
                "unsupported scheme '{}' in memory service URL",
                base_url.scheme()
            ));
        }
        // Endpoints are joined relative to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url,
            llm: LlmSettings {
                model: config.model_name.clone(),
                temperature: config.temperature,
                max_tokens: config.max_tokens,
                ollama_base_url: config.llm_service_url.clone(),
            },
            client,
        })
    }

    /// Startup capability check
    pub fn load(config: &RunConfiguration) -> ClientAvailability {
        match Self::new(config) {
            Ok(client) => {
                tracing::debug!(base_url = %client.base_url, "OpenMemory client loaded");
                ClientAvailability::Loaded(Box::new(client))
            }
            Err(reason) => {
                tracing::debug!(%reason, "OpenMemory client unavailable");
                ClientAvailability::Unavailable(reason)
            }
        }
    }

    /// The mem0 configuration document for this client
    pub fn config_document(&self) -> serde_json::Value {
        serde_json::json!({
            "llm": {
                "provider": "ollama",
                "config": self.llm,
            }
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| MemoryError::Request(format!("cannot build URL for {}: {}", path, e)))
    }

    /// POST `body` to `path` and decode the JSON reply
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "OpenMemory request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MemoryError::Timeout
                } else if e.is_connect() {
                    MemoryError::Connection(format!(
                        "Cannot connect to OpenMemory at {}. Is the server running?",
                        self.base_url
                    ))
                } else {
                    MemoryError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MemoryError::Decode(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| MemoryError::Decode(e.to_string()))
    }
}

/// `POST /search` body
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    user_id: &'a str,
    limit: usize,
}

/// `POST /memories` body
#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    messages: &'a [MemoryMessage],
    user_id: &'a str,
}

#[async_trait]
impl MemoryClient for OpenMemoryClient {
    fn name(&self) -> &str {
        "openmemory"
    }

    async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResults> {
        let request = SearchRequest {
            query,
            user_id: &options.user_id,
            limit: options.limit,
        };
        self.post("search", &request).await.map(SearchResults)
    }

    async fn add(
        &self,
        messages: &[MemoryMessage],
        options: &AddOptions,
    ) -> Result<serde_json::Value> {
        let request = AddRequest {
            messages,
            user_id: &options.user_id,
        };
        self.post("memories", &request).await
    }

    async fn configure(&self) -> Result<serde_json::Value> {
        let document = self.config_document();
        self.post("configure", &document).await
    }
}
