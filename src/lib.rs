#![warn(missing_docs)]
//! LensCoach - AI camera settings and example photos for photographers.
//!
//! Pick a shooting scenario, and a generative-AI provider recommends
//! aperture, ISO, shutter speed, white balance, focus, drive and metering
//! modes (each with an explanation) and renders a few example photos.
//!
//! # Quick Start - One Provider
//!
//! ```no_run
//! use lenscoach::{Brand, CameraQuery, GeminiProvider, PhotoProvider, PhotoProviderExt};
//!
//! #[tokio::main]
//! async fn main() -> lenscoach::Result<()> {
//!     let provider = GeminiProvider::builder().build()?;
//!     let query = CameraQuery::new("Night Sky").with_brand(Brand::Sony);
//!     let settings = provider.generate_settings(&query).await?;
//!     println!("{} at ISO {}", settings.aperture, settings.iso);
//!
//!     for (i, image) in provider.generate_images("Night Sky").await.iter().enumerate() {
//!         image.save(format!("night-sky-{i}.{}", image.format.extension()))?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Session
//!
//! ```no_run
//! use lenscoach::{catalog, ProviderKind, Session};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = Session::default();
//!     session.select_provider(ProviderKind::OpenAi);
//!     session.set_credential_input("sk-...");
//!
//!     let scene = catalog::find_scene("Fireworks").unwrap();
//!     if let Some(pending) = session.select_scene(scene) {
//!         pending.settled().await;
//!     }
//!     println!("{:?}", session.snapshot().settings);
//! }
//! ```
//!
//! # Features
//!
//! - `gemini`: Gemini settings + Imagen examples (Google)
//! - `openai`: chat completions settings + image generations (OpenAI)
//! - `cli`: Command-line interface

mod credential;
mod error;
mod outcome;
mod provider;
mod session;
mod types;

pub mod catalog;
pub mod prompt;
pub mod providers;
pub mod schema;

// Re-export error types at crate root
pub use error::{FailureKind, LensCoachError, Result};

pub use credential::{
    validate_api_key, validate_camera_model, CameraModelInput, Credential, CredentialForm,
    INVALID_GOOGLE_KEY, INVALID_MODEL, INVALID_OPENAI_KEY, KEY_REQUIRED,
};
pub use outcome::{FailureReason, RequestOutcome, SETTINGS_FAILURE_MESSAGE};
pub use provider::{
    HttpProviderFactory, PhotoProvider, PhotoProviderExt, ProviderConfig, ProviderFactory,
    EXAMPLE_IMAGE_COUNT,
};
pub use session::{PendingSelection, Session, SessionSnapshot};
pub use types::{
    Brand, CameraQuery, CameraSettings, ExampleImage, ImageFormat, ImageSequence, ProviderKind,
};

#[cfg(feature = "gemini")]
pub use providers::{GeminiProvider, GeminiProviderBuilder};

#[cfg(feature = "openai")]
pub use providers::{OpenAiProvider, OpenAiProviderBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{find_scene, scenes, Scene};
    pub use crate::error::{LensCoachError, Result};
    pub use crate::provider::{PhotoProvider, PhotoProviderExt};
    pub use crate::session::Session;
    pub use crate::types::{Brand, CameraQuery, CameraSettings, ExampleImage, ProviderKind};

    #[cfg(feature = "gemini")]
    pub use crate::providers::GeminiProvider;

    #[cfg(feature = "openai")]
    pub use crate::providers::OpenAiProvider;
}
