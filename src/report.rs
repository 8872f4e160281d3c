//! Record types for grounded answers and live updates.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A cited web source attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source URI
    pub uri: String,
    /// Page title reported by the grounding metadata
    pub title: String,
}

/// An answer from the model together with its cited sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    /// The answer text
    pub text: String,
    /// Cited sources; may be empty when the model used no grounding
    pub sources: Vec<SourceRef>,
}

impl GroundedAnswer {
    /// Check whether the answer carries any content
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.sources.is_empty()
    }

    /// Build the plain-text share payload: query, response, numbered sources.
    pub fn share_text(&self, query: &str) -> String {
        let mut payload = format!("Query: {}\n\nResponse:\n{}", query, self.text.trim_end());

        if !self.sources.is_empty() {
            payload.push_str("\n\nSources:\n");
            for (i, source) in self.sources.iter().enumerate() {
                payload.push_str(&format!("{}. {} - {}\n", i + 1, source.title, source.uri));
            }
        }

        payload.push_str(&format!(
            "\nShared from spana on {}",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        ));
        payload
    }
}

/// One entry of the live-updates panel.
///
/// Both fields are required; a response missing either fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUpdate {
    /// Headline of the update
    pub title: String,
    /// One-sentence summary
    pub summary: String,
}
