//! Core types shared by the session and the provider adapters.

use crate::error::{LensCoachError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generative-AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini (settings) and Imagen (images).
    #[default]
    Google,
    /// OpenAI chat completions (settings) and image generations.
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// All providers, in display order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::OpenAi];

    /// Returns the identifier used in config and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }

    /// Label for the API key field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Google => "Google Gemini API Key",
            Self::OpenAi => "OpenAI API Key",
        }
    }

    /// Placeholder for the API key field.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Google => "Enter your Gemini API key",
            Self::OpenAi => "Enter your OpenAI API key",
        }
    }

    /// Environment variable consulted when no key is given explicitly.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = LensCoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gemini" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            other => Err(LensCoachError::InvalidRequest(format!(
                "unknown provider: {other}"
            ))),
        }
    }
}

/// Camera brand the user shoots with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Brand {
    /// No particular brand; prompts use generic terms.
    #[default]
    Any,
    Canon,
    Nikon,
    Sony,
    Fujifilm,
    Panasonic,
}

impl Brand {
    /// All brands, in display order.
    pub const ALL: [Brand; 6] = [
        Brand::Any,
        Brand::Canon,
        Brand::Nikon,
        Brand::Sony,
        Brand::Fujifilm,
        Brand::Panasonic,
    ];

    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Canon => "Canon",
            Self::Nikon => "Nikon",
            Self::Sony => "Sony",
            Self::Fujifilm => "Fujifilm",
            Self::Panasonic => "Panasonic",
        }
    }

    /// Returns true for a concrete brand.
    pub fn is_specific(&self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Brand {
    type Err = LensCoachError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LensCoachError::InvalidRequest(format!("unknown camera brand: {wanted}")))
    }
}

/// What the user wants settings for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraQuery {
    /// Scene display name, e.g. "Night Sky".
    pub scene_name: String,
    /// Camera brand.
    pub brand: Brand,
    /// Camera model, already validated.
    pub model: Option<String>,
}

impl CameraQuery {
    /// Creates a query for a scene with no brand or model.
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            brand: Brand::Any,
            model: None,
        }
    }

    /// Sets the camera brand.
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }

    /// Sets the camera model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Recommended camera settings for a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    pub aperture: String,
    pub aperture_explanation: String,
    pub iso: String,
    pub iso_explanation: String,
    pub shutter_speed: String,
    pub shutter_speed_explanation: String,
    pub white_balance: String,
    pub white_balance_explanation: String,
    pub focus_mode: String,
    pub focus_mode_explanation: String,
    pub drive_mode: String,
    pub drive_mode_explanation: String,
    pub metering_mode: String,
    pub metering_mode_explanation: String,
    pub lens_recommendation: String,
    pub general_tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_specific_tip: Option<String>,
}

impl CameraSettings {
    /// Setting rows as `(label, value, explanation)`, in display order.
    pub fn rows(&self) -> [(&'static str, &str, &str); 7] {
        [
            ("Aperture", self.aperture.as_str(), self.aperture_explanation.as_str()),
            ("ISO", self.iso.as_str(), self.iso_explanation.as_str()),
            ("Shutter Speed", self.shutter_speed.as_str(), self.shutter_speed_explanation.as_str()),
            ("White Balance", self.white_balance.as_str(), self.white_balance_explanation.as_str()),
            ("Focus Mode", self.focus_mode.as_str(), self.focus_mode_explanation.as_str()),
            ("Drive Mode", self.drive_mode.as_str(), self.drive_mode_explanation.as_str()),
            ("Metering Mode", self.metering_mode.as_str(), self.metering_mode_explanation.as_str()),
        ]
    }
}

/// Example image formats returned by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG (OpenAI).
    Png,
    /// JPEG (Imagen).
    Jpeg,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// An illustrative photo for a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format.
    pub format: ImageFormat,
    /// Provider that generated this image.
    pub provider: ProviderKind,
}

impl ExampleImage {
    /// Decodes a base64 payload into an image.
    pub fn from_base64(payload: &str, format: ImageFormat, provider: ProviderKind) -> Result<Self> {
        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| LensCoachError::Decode(e.to_string()))?;
        Ok(Self {
            data,
            format,
            provider,
        })
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the image as an inline data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.to_base64())
    }

    /// Saves the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Ordered example images; empty when generation failed.
pub type ImageSequence = Vec<ExampleImage>;
