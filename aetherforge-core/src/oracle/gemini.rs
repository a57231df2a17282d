//! HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::error::{Error, Result};
use crate::prompts::{SYSTEM_PROMPT_STANDARD, SYSTEM_PROMPT_STRATEGIC};
use crate::types::{GroundingSource, Role};

use super::{DeepAnalysis, DeepReply, GroundedQuery, GroundedReply, OracleBackend, Turn};

/// Gemini-backed [`OracleBackend`].
///
/// The API key is resolved once at construction but only checked when a call is
/// made, so the UI can start without credentials and report the problem in the
/// transcript.
pub struct GeminiClient {
    config: OracleConfig,
    api_key: Option<String>,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: OracleConfig) -> Result<Self> {
        let api_key = config.resolve_api_key();
        let base_url = config.endpoint.trim_end_matches('/').to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            http,
            base_url,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("Gemini API key missing".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| Error::Config(format!("invalid api key header: {}", e)))?,
        );

        tracing::debug!(model = %model, turns = body.contents.len(), "Sending Gemini request");

        let response = self
            .http
            .post(self.model_url(model))
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Service(format!("gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Service(format!("gemini read body failed: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Service(format!(
                "gemini returned {}: {}",
                status.as_u16(),
                text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::Service(format!("failed to parse gemini response: {}", e)))
    }
}

#[async_trait]
impl OracleBackend for GeminiClient {
    async fn grounded_query(&self, query: &GroundedQuery) -> Result<GroundedReply> {
        let body = grounded_request_body(query, self.config.grounding);
        let response = self.generate(&self.config.standard_model, &body).await?;

        Ok(GroundedReply {
            text: response.text(),
            sources: response.sources(),
        })
    }

    async fn deep_analysis(&self, request: &DeepAnalysis) -> Result<DeepReply> {
        let body = deep_request_body(request, self.config.thinking_budget);
        let response = self.generate(&self.config.strategic_model, &body).await?;

        Ok(DeepReply {
            text: response.text(),
        })
    }
}

// ============================================
// Wire format
// ============================================

/// Body of `POST models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn turn(role: Role, text: &str) -> Self {
        Self {
            role: Some(wire_role(role)),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini calls the assistant side of a conversation "model".
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn grounded_request_body(query: &GroundedQuery, grounding: bool) -> GenerateContentRequest {
    let mut contents: Vec<Content> = query
        .history
        .iter()
        .map(|Turn { role, text }| Content::turn(*role, text))
        .collect();
    contents.push(Content::turn(Role::User, &query.message));

    let tools = if grounding {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        system_instruction: Content::system(SYSTEM_PROMPT_STANDARD),
        contents,
        tools,
        generation_config: None,
    }
}

fn deep_request_body(request: &DeepAnalysis, thinking_budget: u32) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content::system(SYSTEM_PROMPT_STRATEGIC),
        contents: vec![Content::turn(Role::User, &request.scenario)],
        tools: Vec::new(),
        generation_config: Some(GenerationConfig {
            thinking_config: ThinkingConfig { thinking_budget },
        }),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Thought summaries are not part of the answer
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateContentResponse {
    /// Answer text of the first candidate; empty when there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web grounding chunks of the first candidate, in order.
    ///
    /// Chunks without a URI are skipped; `None` means no grounding metadata.
    fn sources(&self) -> Option<Vec<GroundingSource>> {
        let metadata = self.candidates.first()?.grounding_metadata.as_ref()?;
        Some(
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .filter_map(|web| {
                    web.uri.as_ref().map(|uri| GroundingSource {
                        uri: uri.clone(),
                        title: web.title.clone().unwrap_or_default(),
                    })
                })
                .collect(),
        )
    }
}
