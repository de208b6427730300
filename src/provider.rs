//! Provider trait and construction.

use crate::credential::Credential;
use crate::error::{LensCoachError, Result};
use crate::types::{CameraQuery, CameraSettings, ImageSequence, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Number of example images requested per scene.
pub const EXAMPLE_IMAGE_COUNT: u32 = 4;

/// Sampling temperature for settings generation.
pub const SETTINGS_TEMPERATURE: f32 = 0.5;

/// A generative-AI backend able to produce settings and example images.
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Generates camera settings for a query.
    async fn generate_settings(&self, query: &CameraQuery) -> Result<CameraSettings>;

    /// Requests example images for a scene.
    async fn request_images(&self, scene_name: &str) -> Result<ImageSequence>;

    /// Returns the kind of this provider.
    fn kind(&self) -> ProviderKind;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str {
        match self.kind() {
            ProviderKind::Google => "Gemini (Google)",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    /// Checks if the provider is reachable and the key is accepted.
    async fn health_check(&self) -> Result<()>;
}

/// Extension trait with the non-failing image path.
#[async_trait]
pub trait PhotoProviderExt: PhotoProvider {
    /// Generates example images, degrading to an empty sequence on any failure.
    async fn generate_images(&self, scene_name: &str) -> ImageSequence {
        match self.request_images(scene_name).await {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!(
                    provider = %self.kind(),
                    scene = scene_name,
                    "example image generation failed: {e}"
                );
                Vec::new()
            }
        }
    }
}

impl<T: PhotoProvider + ?Sized> PhotoProviderExt for T {}

/// Everything needed to reach a provider for one selection.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Which provider to use.
    pub kind: ProviderKind,
    /// Validated API key, if one was entered.
    pub credential: Option<Credential>,
    /// Per-request timeout. `None` leaves it to the HTTP stack.
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Creates a config for `kind` with no key.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            credential: None,
            timeout: None,
        }
    }

    /// Sets the API key.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds a provider for a config.
pub trait ProviderFactory: Send + Sync {
    /// Connects to the configured provider.
    fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn PhotoProvider>>;
}

/// Factory for the HTTP-backed providers.
#[derive(Debug, Clone, Default)]
pub struct HttpProviderFactory {
    base_url: Option<String>,
}

impl HttpProviderFactory {
    /// Creates a factory that talks to the public endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the API base URL (e.g. for a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn PhotoProvider>> {
        let credential = config
            .credential
            .as_ref()
            .filter(|c| c.provider() == config.kind)
            .ok_or(LensCoachError::MissingCredential(config.kind))?;

        match config.kind {
            ProviderKind::Google => {
                #[cfg(feature = "gemini")]
                {
                    let mut builder =
                        crate::providers::GeminiProvider::builder().api_key(credential.expose());
                    if let Some(url) = &self.base_url {
                        builder = builder.base_url(url);
                    }
                    if let Some(timeout) = config.timeout {
                        builder = builder.timeout(timeout);
                    }
                    Ok(Arc::new(builder.build()?))
                }
                #[cfg(not(feature = "gemini"))]
                {
                    let _ = credential;
                    Err(LensCoachError::ProviderNotAvailable("google".into()))
                }
            }
            ProviderKind::OpenAi => {
                #[cfg(feature = "openai")]
                {
                    let mut builder =
                        crate::providers::OpenAiProvider::builder().api_key(credential.expose());
                    if let Some(url) = &self.base_url {
                        builder = builder.base_url(url);
                    }
                    if let Some(timeout) = config.timeout {
                        builder = builder.timeout(timeout);
                    }
                    Ok(Arc::new(builder.build()?))
                }
                #[cfg(not(feature = "openai"))]
                {
                    let _ = credential;
                    Err(LensCoachError::ProviderNotAvailable("openai".into()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl PhotoProvider for FailingProvider {
        async fn generate_settings(&self, _query: &CameraQuery) -> Result<CameraSettings> {
            Err(LensCoachError::Auth("nope".into()))
        }

        async fn request_images(&self, _scene_name: &str) -> Result<ImageSequence> {
            Err(LensCoachError::UnexpectedResponse("no predictions".into()))
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::OpenAi
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generate_images_swallows_errors() {
        let images = FailingProvider.generate_images("Fireworks").await;
        assert!(images.is_empty());
    }

    #[test]
    fn test_default_name() {
        assert_eq!(FailingProvider.name(), "OpenAI");
    }

    #[test]
    fn test_connect_without_credential() {
        let err = HttpProviderFactory::new()
            .connect(&ProviderConfig::new(ProviderKind::Google))
            .err()
            .unwrap();
        assert!(matches!(err, LensCoachError::MissingCredential(ProviderKind::Google)));
    }

    #[test]
    fn test_connect_rejects_key_for_other_provider() {
        let credential =
            Credential::new(ProviderKind::Google, "AIzaSyA1234567890abcdefghijklmnopqrs").unwrap();
        let config = ProviderConfig::new(ProviderKind::OpenAi).with_credential(credential);
        let err = HttpProviderFactory::new().connect(&config).err().unwrap();
        assert!(matches!(err, LensCoachError::MissingCredential(ProviderKind::OpenAi)));
    }

    #[cfg(all(feature = "gemini", feature = "openai"))]
    #[test]
    fn test_connect_builds_matching_provider() {
        let credential =
            Credential::new(ProviderKind::OpenAi, "sk-proj-abcdefghijklmnopqrstuvwxyz0123")
                .unwrap();
        let config = ProviderConfig::new(ProviderKind::OpenAi)
            .with_credential(credential)
            .with_timeout(Duration::from_secs(30));
        let provider = HttpProviderFactory::new().connect(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }
}
