//! System prompt assembled from recalled memories

use sdk::types::SearchResults;

const PROMPT_HEADER: &str = "You are a helpful assistant. Use these memories:";

/// Build the system prompt an assistant would receive for this turn.
///
/// One `- ` bullet per recalled memory; just the header when nothing matched.
pub fn build_system_prompt(results: &SearchResults) -> String {
    let mut prompt = String::from(PROMPT_HEADER);
    for text in results.memory_texts() {
        prompt.push_str("\n- ");
        prompt.push_str(&text);
    }
    prompt
}
