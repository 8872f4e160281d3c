//! Gemini API client for grounded research and live updates.
//!
//! Two calls, both single request/response: a search-grounded answer with
//! cited sources, and a structured JSON list of recent developments.

use crate::report::{GroundedAnswer, LiveUpdate, SourceRef};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("spana/", env!("CARGO_PKG_VERSION"), " (https://github.com/cladam/spana)");

/// Default timeout for API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Production endpoint of the Gemini API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Maximum number of live updates shown in the panel
pub const MAX_LIVE_UPDATES: usize = 3;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("request to the Gemini API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("the model returned an empty response")]
    EmptyResponse,
    #[error("failed to parse live updates: {0}")]
    ParseError(String),
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client for the given API key
    pub fn new(api_key: &str) -> Result<Self, AgentError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Select the model identifier (e.g. "gemini-2.5-flash")
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at a different endpoint; tests use this to stub the API
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Ask a research question, grounded in Google Search.
    ///
    /// Returns the answer text and the cited sources. An answer without
    /// grounding metadata has an empty source list.
    pub async fn research(&self, prompt: &str) -> Result<GroundedAnswer, AgentError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }]
        });
        let response = self.generate(body).await?;
        answer_from_response(response)
    }

    /// Fetch up to [`MAX_LIVE_UPDATES`] recent developments on a topic.
    ///
    /// The request pins a JSON response schema, but the model may still wrap
    /// the payload in a markdown code fence; the fence is stripped before
    /// parsing. A payload that does not match the schema is an error, never a
    /// silent empty list.
    pub async fn live_updates(&self, topic: &str) -> Result<Vec<LiveUpdate>, AgentError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": updates_prompt(topic) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {
                                "type": "STRING",
                                "description": "The title of the news update."
                            },
                            "summary": {
                                "type": "STRING",
                                "description": "A one-sentence summary of the update."
                            }
                        },
                        "required": ["title", "summary"]
                    }
                }
            }
        });
        let response = self.generate(body).await?;
        let text = text_from_response(response)?;
        updates_from_text(&text)
    }

    async fn generate(&self, body: serde_json::Value) -> Result<GenerateResponse, AgentError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| {
                    if raw.trim().is_empty() {
                        status.to_string()
                    } else {
                        raw
                    }
                });
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Wire format of a `generateContent` response, reduced to the fields used here.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn text_from_response(response: GenerateResponse) -> Result<String, AgentError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(AgentError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AgentError::EmptyResponse);
    }
    Ok(text)
}

fn answer_from_response(response: GenerateResponse) -> Result<GroundedAnswer, AgentError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(AgentError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AgentError::EmptyResponse);
    }

    let sources = candidate
        .grounding_metadata
        .map(|g| g.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            web.uri.map(|uri| SourceRef {
                uri,
                title: web.title.unwrap_or_else(|| "Untitled source".to_string()),
            })
        })
        .collect();

    Ok(GroundedAnswer { text, sources })
}

fn updates_from_text(text: &str) -> Result<Vec<LiveUpdate>, AgentError> {
    let cleaned = strip_json_fences(text);
    let mut updates: Vec<LiveUpdate> = serde_json::from_str(&cleaned)
        .map_err(|e| AgentError::ParseError(format!("{}: {}", e, cleaned)))?;
    updates.truncate(MAX_LIVE_UPDATES);
    Ok(updates)
}

/// Strip a markdown code-fence wrapper from a JSON payload, if present.
fn strip_json_fences(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with("```") {
        let without_prefix = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);

        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Prompt for the grounded research call, with an optional persona preamble
pub fn research_prompt(persona: &str, query: &str) -> String {
    if persona.trim().is_empty() {
        query.to_string()
    } else {
        format!("{}\n\n{}", persona.trim(), query)
    }
}

/// Follow-up prompt asking for a more detailed version of a previous answer
pub fn refine_prompt(original_query: &str, previous_answer: &str) -> String {
    format!(
        "Based on the original query \"{}\", please provide a more detailed and refined version of the following response:\n\n{}",
        original_query, previous_answer
    )
}

/// Follow-up prompt asking for a concise summary of a previous answer
pub fn summarize_prompt(previous_answer: &str) -> String {
    format!(
        "Please provide a concise summary of the following text:\n\n{}",
        previous_answer
    )
}

fn updates_prompt(topic: &str) -> String {
    format!(
        "Provide a list of the {} most recent news updates or significant developments related to {}. \
         For each update, provide a concise title and a one-sentence summary. \
         Ensure the output is a valid JSON array of objects, where each object has 'title' and 'summary' keys.",
        MAX_LIVE_UPDATES, topic
    )
}
