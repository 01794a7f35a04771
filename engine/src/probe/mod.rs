//! Readiness Prober
//!
//! Issues one plain `GET` against each dependent service and gates the run on
//! the results. Probes run one after another in the order given so the
//! console transcript is deterministic.
//!
//! There is no retry and no timeout override: a probe waits as long as the
//! transport's defaults allow. Every outcome, including connection refusal,
//! is converted into a [`ServiceStatus`]; nothing is raised.

use reqwest::Client;
use sdk::errors::EngineError;

use crate::config::RunConfiguration;

/// A named service that must be reachable before the session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Display name (e.g., "Ollama")
    pub name: String,

    /// URL probed with `GET`
    pub url: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Services a run depends on, in probe order: the LLM runtime, then the
/// memory server.
pub fn dependencies(config: &RunConfiguration) -> Vec<Dependency> {
    vec![
        Dependency::new("Ollama", config.llm_service_url.clone()),
        Dependency::new("OpenMemory", config.memory_service_url.clone()),
    ]
}

/// Result of one readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Name of the probed service
    pub service_name: String,

    /// URL that was probed
    pub url: String,

    /// True when a 2xx or 3xx response came back
    pub reachable: bool,

    /// Status code of a response, absent on network-level failure
    pub status_code: Option<u16>,

    /// Transport error text on network-level failure
    pub detail: Option<String>,
}

impl ServiceStatus {
    /// Console line describing this status
    pub fn summary_line(&self) -> String {
        match (self.reachable, self.status_code) {
            (true, _) => format!("✅ {} is running.", self.service_name),
            (false, Some(code)) => format!(
                "❌ {} is not running (status code: {}).",
                self.service_name, code
            ),
            (false, None) => format!("❌ {} is not reachable at {}.", self.service_name, self.url),
        }
    }
}

/// Proof that every dependency was reachable in this run.
///
/// Only [`ReadinessProber::admit`] creates one, and the session runner
/// refuses to start without it.
#[derive(Debug)]
pub struct Admission {
    services: Vec<String>,
}

impl Admission {
    /// Names of the services that passed the gate
    pub fn services(&self) -> &[String] {
        &self.services
    }

    #[cfg(test)]
    pub(crate) fn granted(services: &[&str]) -> Self {
        Self {
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Sequential reachability checker
#[derive(Debug, Clone, Default)]
pub struct ReadinessProber {
    client: Client,
}

impl ReadinessProber {
    /// Create a prober using `client` for every probe
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Probe a single service and print the outcome
    pub async fn probe(&self, name: &str, url: &str) -> ServiceStatus {
        tracing::debug!(service = name, url, "Probing service");

        let status = match self.client.get(url).send().await {
            Ok(response) => {
                let code = response.status();
                ServiceStatus {
                    service_name: name.to_string(),
                    url: url.to_string(),
                    reachable: code.is_success() || code.is_redirection(),
                    status_code: Some(code.as_u16()),
                    detail: None,
                }
            }
            Err(e) => {
                tracing::debug!(service = name, url, error = %e, "Probe failed at network level");
                ServiceStatus {
                    service_name: name.to_string(),
                    url: url.to_string(),
                    reachable: false,
                    status_code: None,
                    detail: Some(e.to_string()),
                }
            }
        };

        println!("{}", status.summary_line());
        status
    }

    /// Probe every dependency in order
    pub async fn probe_all(&self, deps: &[Dependency]) -> Vec<ServiceStatus> {
        let mut statuses = Vec::with_capacity(deps.len());
        for dep in deps {
            statuses.push(self.probe(&dep.name, &dep.url).await);
        }
        statuses
    }

    /// True only if every dependency is reachable
    pub async fn run_all(&self, deps: &[Dependency]) -> bool {
        all_reachable(&self.probe_all(deps).await)
    }

    /// Run the readiness gate.
    ///
    /// Returns an [`Admission`] when every dependency is reachable, otherwise
    /// [`EngineError::Unreachable`] naming the failed services in probe order.
    pub async fn admit(&self, deps: &[Dependency]) -> Result<Admission, EngineError> {
        let statuses = self.probe_all(deps).await;
        let failed: Vec<String> = statuses
            .iter()
            .filter(|s| !s.reachable)
            .map(|s| s.service_name.clone())
            .collect();

        if failed.is_empty() {
            tracing::info!(count = statuses.len(), "Readiness gate passed");
            Ok(Admission {
                services: statuses.into_iter().map(|s| s.service_name).collect(),
            })
        } else {
            tracing::debug!(?failed, "Readiness gate failed");
            Err(EngineError::Unreachable(failed))
        }
    }
}

/// Gate decision over a set of statuses
pub fn all_reachable(statuses: &[ServiceStatus]) -> bool {
    statuses.iter().all(|s| s.reachable)
}
