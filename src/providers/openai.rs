//! OpenAI provider: settings via chat completions, example images via
//! `images/generations`.

use crate::error::{error_from_status, LensCoachError, Result};
use crate::prompt::{image_prompt, settings_prompt};
use crate::provider::{PhotoProvider, EXAMPLE_IMAGE_COUNT, SETTINGS_TEMPERATURE};
use crate::schema::{json_keys_instruction, parse_settings, strip_code_fences};
use crate::types::{
    CameraQuery, CameraSettings, ExampleImage, ImageFormat, ImageSequence, ProviderKind,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
const SYSTEM_PROMPT: &str = "You are a professional photography assistant.";
const MAX_TOKENS: u32 = 800;
const IMAGE_SIZE: &str = "1024x768";

/// Builder for OpenAiProvider.
#[derive(Debug, Clone, Default)]
pub struct OpenAiProviderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    chat_model: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAiProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the chat model used for settings (default `gpt-4o`).
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<OpenAiProvider> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(ProviderKind::OpenAi.env_var()).ok())
            .ok_or(LensCoachError::MissingCredential(ProviderKind::OpenAi))?;

        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(OpenAiProvider {
            client: client.build()?,
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            chat_model: self
                .chat_model
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        })
    }
}

/// OpenAI settings and example-image provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProviderBuilder`.
    pub fn builder() -> OpenAiProviderBuilder {
        OpenAiProviderBuilder::new()
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            let err = error_from_status(ProviderKind::OpenAi, status.as_u16(), &text, &headers);
            // insufficient_quota arrives as a 429 but will not clear on its own
            if matches!(err, LensCoachError::RateLimited { .. })
                && (text.contains("insufficient_quota") || text.contains("exceeded your current quota"))
            {
                return Err(LensCoachError::Api {
                    status: 429,
                    message: "OpenAI quota exceeded".into(),
                });
            }
            return Err(err);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PhotoProvider for OpenAiProvider {
    async fn generate_settings(&self, query: &CameraQuery) -> Result<CameraSettings> {
        let start = Instant::now();
        let body = ChatRequest::for_settings(&self.chat_model, query);

        tracing::debug!(model = %self.chat_model, scene = %query.scene_name, "requesting OpenAI settings");
        let response: ChatResponse = self.post("/v1/chat/completions", &body).await?;
        let content = response.into_content()?;
        // Same required-field check as the schema-constrained Gemini path.
        let settings = parse_settings(strip_code_fences(&content))?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "OpenAI settings complete"
        );
        Ok(settings)
    }

    async fn request_images(&self, scene_name: &str) -> Result<ImageSequence> {
        let start = Instant::now();
        let body = ImageRequest::for_scene(scene_name);

        tracing::debug!(scene = scene_name, "requesting OpenAI examples");
        let response: ImageResponse = self.post("/v1/images/generations", &body).await?;

        let images = response
            .data
            .into_iter()
            .map(|d| {
                let b64 = d.b64_json.ok_or_else(|| {
                    LensCoachError::UnexpectedResponse("OpenAI image without b64_json".into())
                })?;
                ExampleImage::from_base64(&b64, ImageFormat::Png, ProviderKind::OpenAi)
            })
            .collect::<Result<ImageSequence>>()?;

        tracing::debug!(
            count = images.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "OpenAI examples complete"
        );
        Ok(images)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(LensCoachError::Auth("Invalid API key".into())),
            s if !(200..300).contains(&s) => Err(LensCoachError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatRequest {
    fn for_settings(model: &str, query: &CameraQuery) -> Self {
        let prompt = format!("{}\n\n{}", settings_prompt(query), json_keys_instruction());
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt,
                },
            ],
            temperature: SETTINGS_TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String> {
        let message = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LensCoachError::UnexpectedResponse("No choices in OpenAI response".into()))?
            .message;

        if let Some(refusal) = message.refusal {
            return Err(LensCoachError::ContentBlocked(refusal));
        }
        message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LensCoachError::UnexpectedResponse("Empty OpenAI message".into()))
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    prompt: String,
    n: u32,
    size: &'static str,
    response_format: &'static str,
}

impl ImageRequest {
    fn for_scene(scene_name: &str) -> Self {
        Self {
            prompt: image_prompt(scene_name),
            n: EXAMPLE_IMAGE_COUNT,
            size: IMAGE_SIZE,
            response_format: "b64_json",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}
