//! Session Runner
//!
//! Drives the scripted interaction against a loaded memory client:
//!
//! 1. optionally push the LLM configuration to the memory service
//! 2. search memories for the scripted query
//! 3. synthesize a stand-in assistant reply (no LLM call is made)
//! 4. record the query and reply as a new memory
//!
//! Any failure in these steps stops the session and is reported as one
//! `MemoryOperation` error. Which step failed is deliberately not part of
//! the result.

pub mod prompt;

use sdk::errors::EngineError;
use sdk::memory_client::{MemoryClient, MemoryError};
use sdk::types::{AddOptions, MemoryMessage, SearchOptions};

use crate::probe::Admission;

pub use prompt::build_system_prompt;

pub const DEFAULT_USER_ID: &str = "test_user_node_1";
pub const DEFAULT_QUERY: &str = "I like spicy food - remember that for me.";
pub const DEFAULT_REPLY: &str = "Got it — noted that you like spicy food.";
pub const DEFAULT_LIMIT: usize = 3;

/// The fixed interaction a session performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScript {
    /// Subject identifier for search and add
    pub user_id: String,

    /// User query, searched for and then recorded
    pub query: String,

    /// Stand-in assistant reply
    pub reply: String,

    /// Maximum number of search matches
    pub limit: usize,

    /// Push the LLM configuration before searching
    pub push_config: bool,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            query: DEFAULT_QUERY.to_string(),
            reply: DEFAULT_REPLY.to_string(),
            limit: DEFAULT_LIMIT,
            push_config: false,
        }
    }
}

/// The exchange recorded as memory at the end of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub user_id: String,
    pub query: String,
    pub reply: String,
}

impl InteractionRecord {
    pub fn new(
        user_id: impl Into<String>,
        query: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            query: query.into(),
            reply: reply.into(),
        }
    }

    /// User query followed by assistant reply
    pub fn messages(&self) -> Vec<MemoryMessage> {
        vec![
            MemoryMessage::user(self.query.clone()),
            MemoryMessage::assistant(self.reply.clone()),
        ]
    }
}

/// Outcome of a session
#[derive(Debug)]
pub enum RunResult {
    /// Every step completed
    Success,

    /// A step failed and the rest were skipped
    Failure(EngineError),
}

/// Executes a [`SessionScript`]
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    script: SessionScript,
}

impl SessionRunner {
    pub fn new(script: SessionScript) -> Self {
        Self { script }
    }

    /// Run the session.
    ///
    /// Requires the [`Admission`] from this run's readiness gate.
    pub async fn run(&self, admission: &Admission, client: &dyn MemoryClient) -> RunResult {
        tracing::info!(
            client = client.name(),
            services = ?admission.services(),
            user_id = %self.script.user_id,
            "Starting session"
        );

        match self.interact(client).await {
            Ok(()) => {
                println!(
                    "\n🎉 Done. Check OpenMemory UI or run the script again to see the new memory."
                );
                RunResult::Success
            }
            Err(e) => {
                tracing::debug!(error = %e, "Memory operation failed");
                RunResult::Failure(EngineError::MemoryOperation(e.to_string()))
            }
        }
    }

    async fn interact(&self, client: &dyn MemoryClient) -> Result<(), MemoryError> {
        let script = &self.script;

        if script.push_config {
            println!("\n⚙️  Pushing LLM configuration to memory service...");
            let ack = client.configure().await?;
            tracing::debug!(%ack, "Configuration acknowledged");
        }

        println!("\n🔍 Searching memories for query: '{}'", script.query);
        let results = client
            .search(
                &script.query,
                &SearchOptions::new(script.user_id.clone(), script.limit),
            )
            .await?;
        println!("✅ Search successful.");
        println!("Search results: {}", results);

        println!("\n📝 Constructed System Prompt:");
        println!("{}", build_system_prompt(&results));

        let record = InteractionRecord::new(
            script.user_id.clone(),
            script.query.clone(),
            script.reply.clone(),
        );
        println!("\n💬 Simulated LLM Reply: {}", record.reply);

        println!("\n💾 Adding new memory...");
        let ack = client
            .add(&record.messages(), &AddOptions::new(record.user_id.clone()))
            .await?;
        tracing::debug!(%ack, "Add acknowledged");
        println!("✅ Memory added successfully.");

        Ok(())
    }
}
