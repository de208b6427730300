//! Gemini (Google) provider: structured settings via `generateContent`,
//! example images via Imagen `predict`.

use crate::error::{error_from_status, LensCoachError, Result};
use crate::prompt::{image_prompt, settings_prompt};
use crate::provider::{PhotoProvider, EXAMPLE_IMAGE_COUNT, SETTINGS_TEMPERATURE};
use crate::schema::{parse_settings, response_schema};
use crate::types::{
    CameraQuery, CameraSettings, ExampleImage, ImageFormat, ImageSequence, ProviderKind,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_SETTINGS_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const IMAGE_ASPECT_RATIO: &str = "4:3";

/// Builder for GeminiProvider.
#[derive(Debug, Clone, Default)]
pub struct GeminiProviderBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    settings_model: Option<String>,
    image_model: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model used for settings (default `gemini-2.5-flash`).
    pub fn settings_model(mut self, model: impl Into<String>) -> Self {
        self.settings_model = Some(model.into());
        self
    }

    /// Sets the model used for images (default `imagen-4.0-generate-001`).
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<GeminiProvider> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(ProviderKind::Google.env_var()).ok())
            .ok_or(LensCoachError::MissingCredential(ProviderKind::Google))?;

        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(GeminiProvider {
            client: client.build()?,
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            settings_model: self
                .settings_model
                .unwrap_or_else(|| DEFAULT_SETTINGS_MODEL.to_string()),
            image_model: self
                .image_model
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}

/// Gemini settings and Imagen example-image provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    settings_model: String,
    image_model: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProviderBuilder`.
    pub fn builder() -> GeminiProviderBuilder {
        GeminiProviderBuilder::new()
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_status(
                ProviderKind::Google,
                status.as_u16(),
                &text,
                &headers,
            ));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PhotoProvider for GeminiProvider {
    async fn generate_settings(&self, query: &CameraQuery) -> Result<CameraSettings> {
        let start = Instant::now();
        let url = self.model_url(&self.settings_model, "generateContent");
        let body = GenerateContentRequest::for_settings(&settings_prompt(query));

        tracing::debug!(model = %self.settings_model, scene = %query.scene_name, "requesting Gemini settings");
        let response: GenerateContentResponse = self.post(&url, &body).await?;
        let text = response.into_text()?;
        let settings = parse_settings(&text)?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Gemini settings complete"
        );
        Ok(settings)
    }

    async fn request_images(&self, scene_name: &str) -> Result<ImageSequence> {
        let start = Instant::now();
        let url = self.model_url(&self.image_model, "predict");
        let body = PredictRequest::for_scene(scene_name);

        tracing::debug!(model = %self.image_model, scene = scene_name, "requesting Imagen examples");
        let response: PredictResponse = self.post(&url, &body).await?;

        let images = response
            .predictions
            .into_iter()
            .filter_map(|p| p.bytes_base64_encoded)
            .map(|b64| ExampleImage::from_base64(&b64, ImageFormat::Jpeg, ProviderKind::Google))
            .collect::<Result<ImageSequence>>()?;

        tracing::debug!(
            count = images.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Imagen examples complete"
        );
        Ok(images)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/v1beta/models/{}", self.base_url, self.settings_model);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(LensCoachError::Auth("Invalid API key".into())),
            // Gemini reports a malformed key as 400 INVALID_ARGUMENT.
            400 => Err(LensCoachError::Auth("API key not valid".into())),
            404 => Err(LensCoachError::InvalidRequest(
                "Model not found. Verify the model name is correct.".into(),
            )),
            s if !(200..300).contains(&s) => Err(LensCoachError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

impl GenerateContentRequest {
    fn for_settings(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: SETTINGS_TEMPERATURE,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LensCoachError::ContentBlocked(format!(
                "Prompt blocked: {reason}"
            )));
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            LensCoachError::UnexpectedResponse("No candidates in Gemini response".into())
        })?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if matches!(
                reason,
                "SAFETY" | "RECITATION" | "PROHIBITED_CONTENT" | "BLOCKLIST"
            ) {
                return Err(LensCoachError::ContentBlocked(format!(
                    "Content blocked by Gemini safety filter: {reason}"
                )));
            }
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LensCoachError::UnexpectedResponse(
                "No text in Gemini response".into(),
            ));
        }
        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: &'static str,
}

impl PredictRequest {
    fn for_scene(scene_name: &str) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: image_prompt(scene_name),
            }],
            parameters: PredictParameters {
                sample_count: EXAMPLE_IMAGE_COUNT,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: ImageFormat::Jpeg.mime_type(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_json;

    #[test]
    fn test_builder_with_explicit_key() {
        let provider = GeminiProviderBuilder::new()
            .api_key("AIza-test")
            .base_url("http://localhost:8080/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(provider.base_url, "http://localhost:8080");
        assert_eq!(provider.settings_model, DEFAULT_SETTINGS_MODEL);
        assert_eq!(
            provider.model_url(&provider.image_model, "predict"),
            "http://localhost:8080/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn test_settings_request_serialization() {
        let body = GenerateContentRequest::for_settings("prompt text");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt text");
        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["temperature"], 0.5);
        assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 16);
        assert!(json.get("generation_config").is_none());
    }

    #[test]
    fn test_predict_request_serialization() {
        let body = PredictRequest::for_scene("Night Sky");
        let json = serde_json::to_value(&body).unwrap();

        assert!(json["instances"][0]["prompt"]
            .as_str()
            .unwrap()
            .contains("\"Night Sky\""));
        assert_eq!(json["parameters"]["sampleCount"], 4);
        assert_eq!(json["parameters"]["aspectRatio"], "4:3");
        assert_eq!(json["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn test_response_text_parses_to_settings() {
        let inner = sample_json().to_string();
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": format!("  {inner}\n") }] },
                "finishReason": "STOP"
            }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        let settings = parse_settings(&resp.into_text().unwrap()).unwrap();
        assert_eq!(settings.iso, "iso value");
    }

    #[test]
    fn test_response_prompt_blocked() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(LensCoachError::ContentBlocked(_))
        ));
    }

    #[test]
    fn test_response_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(LensCoachError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_predict_response_deserialization() {
        let json = r#"{
            "predictions": [
                { "bytesBase64Encoded": "/9j/4AAQ", "mimeType": "image/jpeg" },
                { "raiFilteredReason": "filtered" }
            ]
        }"#;
        let resp: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.predictions.len(), 2);
        assert_eq!(resp.predictions[0].bytes_base64_encoded.as_deref(), Some("/9j/4AAQ"));
        assert!(resp.predictions[1].bytes_base64_encoded.is_none());
    }
}
