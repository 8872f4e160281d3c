//! End-to-end behavior against a stubbed Gemini endpoint.

use serde_json::json;
use spana::agent::{AgentError, GeminiClient};
use spana::render::chart_lines;
use spana::{analyze, SourceRef};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn stub_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key")
        .expect("client builds")
        .with_base_url(&server.uri())
}

#[tokio::test]
async fn grounded_query_yields_the_stubbed_answer_and_chart_data() {
    let answer_text = "AIPAC donors include large funding networks. \
                       Funding flows through affiliated committees, and funding reports are public.";

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "tools": [{ "google_search": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": answer_text }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.org/fec", "title": "FEC filings" } },
                        { "web": { "uri": "https://example.org/news", "title": "News report" } }
                    ]
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = stub_client(&server);
    let answer = client.research("Donors of AIPAC").await.unwrap();

    // The UI must display exactly this text and source list.
    assert_eq!(answer.text, answer_text);
    assert_eq!(
        answer.sources,
        vec![
            SourceRef {
                uri: "https://example.org/fec".to_string(),
                title: "FEC filings".to_string(),
            },
            SourceRef {
                uri: "https://example.org/news".to_string(),
                title: "News report".to_string(),
            },
        ]
    );

    // The chart bars come straight from analyze() over the answer text.
    let chart_data = analyze(&answer.text);
    assert_eq!(chart_data, analyze(answer_text));
    assert_eq!(chart_data[0].name, "funding");
    assert_eq!(chart_data[0].count, 3);
    assert_eq!(chart_lines(&chart_data).len(), chart_data.len());
}

#[tokio::test]
async fn live_updates_survive_a_markdown_fence() {
    let fenced = "```json\n[\n  {\"title\": \"Hearing scheduled\", \"summary\": \"A committee hearing was scheduled.\"},\n  {\"title\": \"New filing\", \"summary\": \"A quarterly filing was published.\"}\n]\n```";

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": fenced }] } }]
        })))
        .mount(&server)
        .await;

    let client = stub_client(&server);
    let updates = client.live_updates("AIPAC").await.unwrap();

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].title, "Hearing scheduled");
    assert_eq!(updates[1].summary, "A quarterly filing was published.");
}

#[tokio::test]
async fn live_updates_schema_mismatch_is_a_reported_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[{\"title\": \"no summary\"}]" }] } }]
        })))
        .mount(&server)
        .await;

    let client = stub_client(&server);
    assert!(matches!(
        client.live_updates("AIPAC").await,
        Err(AgentError::ParseError(_))
    ));
}

#[tokio::test]
async fn api_errors_carry_status_and_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let client = stub_client(&server);
    match client.research("anything").await {
        Err(AgentError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Quota exceeded");
        }
        other => panic!("expected an API error, got {:?}", other.map(|a| a.text)),
    }
}

#[tokio::test]
async fn an_empty_candidate_list_is_an_empty_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = stub_client(&server);
    assert!(matches!(
        client.research("anything").await,
        Err(AgentError::EmptyResponse)
    ));
}
