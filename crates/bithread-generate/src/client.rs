use crate::config::GeminiConfig;
use crate::prompt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error that can occur while generating content with [`GeminiClient`].
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured.
    #[error("no Gemini API key configured (set the `GEMINI_API_KEY` environment variable)")]
    MissingApiKey,
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Transport failure or timeout talking to the API.
    #[error("error making request: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("Gemini API returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to decode Gemini API response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The prompt was rejected by the API's safety filters.
    #[error("prompt was blocked by Gemini: {0}")]
    Blocked(String),
    /// The API returned no candidate text.
    #[error("Gemini API returned no text in the response")]
    EmptyResponse,
}

/// A client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerationError::Client)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generate the raw bilingual thread text for a product.
    ///
    /// The returned text is the model output verbatim; its `[ID]` / `[EN]`
    /// structure is not checked here.
    pub async fn generate(
        &self,
        content: &str,
        product_name: &str,
    ) -> Result<String, GenerationError> {
        let prompt = prompt::build_prompt(content, product_name);
        self.generate_text(&prompt).await
    }

    /// Send a single prompt and return the first candidate's text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: RequestGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::info!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "Requesting generation"
        );

        let response = self
            .http
            .post(self.config.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        response_text(parsed)
    }
}

/// Pull the human-readable message out of a Gemini error body, falling back
/// to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

fn response_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyResponse)?;

    match candidate.finish_reason.as_deref() {
        Some("MAX_TOKENS") => tracing::warn!("Generation stopped at the output token limit"),
        Some(reason) => tracing::debug!(finish_reason = reason, "Generation finished"),
        None => {}
    }

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    tracing::info!(chars = text.chars().count(), "Received generated text");
    Ok(text)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: RequestGenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// A request captured by the one-shot test server.
    struct CapturedRequest {
        head: String,
        body: serde_json::Value,
    }

    /// Serve one JSON response on a local port. Returns the base URL and a
    /// handle resolving to the request that was received.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let (head, request_body) = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            CapturedRequest {
                head,
                body: serde_json::from_slice(&request_body).unwrap_or(serde_json::Value::Null),
            }
        });

        (format!("http://{addr}/v1beta"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> (String, Vec<u8>) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before request head");
            buf.extend_from_slice(&chunk[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        (head, buf[head_end..].to_vec())
    }

    fn client_for(base_url: &str) -> GeminiClient {
        let config = GeminiConfig::default()
            .with_api_key("test-key")
            .with_base_url(base_url);
        GeminiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        // Nothing listens here; the key check must fail before any request
        let config = GeminiConfig::default().with_base_url("http://127.0.0.1:9");
        let client = GeminiClient::new(config).unwrap();

        let err = client.generate("content", "Product").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "[ID]\nHalo "}, {"text": "dunia\n[EN]\nHello world"}]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let text = client_for(&base_url)
            .generate("Page text here", "SuperWallet")
            .await
            .unwrap();
        assert_eq!(text, "[ID]\nHalo dunia\n[EN]\nHello world");

        let request = server.await.unwrap();
        assert!(request
            .head
            .starts_with("post /v1beta/models/gemini-1.5-pro-latest:generatecontent http/1.1"));
        assert!(request.head.contains("x-goog-api-key: test-key"));

        let config = &request.body["generationConfig"];
        let temperature = config["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert_eq!(config["maxOutputTokens"], 3000);

        let prompt = request.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Nama: SuperWallet"));
        assert!(prompt.contains("Konten website: Page text here"));
        assert_eq!(request.body["contents"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let body = serde_json::json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })
        .to_string();
        let (base_url, _server) = serve_once("400 Bad Request", body).await;

        let err = client_for(&base_url).generate_text("hi").await.unwrap_err();
        match &err {
            GenerationError::Api { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_unparseable_body() {
        let (base_url, _server) =
            serve_once("503 Service Unavailable", "upstream down".to_string()).await;

        let err = client_for(&base_url).generate_text("hi").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gemini API returned 503 Service Unavailable: upstream down"
        );
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let body = serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })
        .to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        let err = client_for(&base_url).generate_text("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(ref r) if r == "SAFETY"));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let (base_url, _server) = serve_once("200 OK", "{\"candidates\": []}".to_string()).await;

        let err = client_for(&base_url).generate_text("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (base_url, _server) = serve_once("200 OK", "not json".to_string()).await;

        let err = client_for(&base_url).generate_text("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_response_text_skips_parts_without_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}},{"text":"ok"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(response).unwrap(), "ok");
    }
}
