//! Prompt construction for settings and example images.

use crate::types::CameraQuery;

/// Appended to every settings prompt.
const EXPLANATION_INSTRUCTION: &str = "For each setting, also provide a concise explanation (in the corresponding 'Explanation' field) of why this specific value or range is recommended for the scene.";

/// Which settings template a scene uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Motion-blur shots with fixed guidance on slow shutter, low ISO and a tripod.
    LongExposure,
    /// Everything else.
    General,
}

impl PromptTemplate {
    /// Picks the template for a scene name.
    pub fn for_scene(scene_name: &str) -> Self {
        if scene_name.to_lowercase().contains("long exposure") {
            Self::LongExposure
        } else {
            Self::General
        }
    }
}

/// Builds the camera-settings prompt for a query.
pub fn settings_prompt(query: &CameraQuery) -> String {
    let brand_info = if query.brand.is_specific() {
        format!("The user is using a {} camera.", query.brand)
    } else {
        String::new()
    };
    let model_info = match query.model.as_deref().map(str::trim) {
        Some(model) if !model.is_empty() => {
            format!("Specifically, the camera model is {model}.")
        }
        _ => String::new(),
    };

    let (intro, body) = match PromptTemplate::for_scene(&query.scene_name) {
        PromptTemplate::LongExposure => (
            "As a professional photography assistant, provide the ideal camera settings for a \"Long Exposure\" shot. The goal is to capture motion blur, such as silky water, light trails, or blurred clouds.".to_string(),
            LONG_EXPOSURE_BODY,
        ),
        PromptTemplate::General => (
            format!(
                "As a professional photography assistant, provide the ideal camera settings for the following scene: \"{}\".",
                query.scene_name
            ),
            GENERAL_BODY,
        ),
    };

    let mut lines = vec![intro];
    lines.extend([brand_info, model_info].into_iter().filter(|l| !l.is_empty()));
    lines.push(String::new());
    lines.extend(body.iter().map(|l| l.to_string()));
    lines.push(String::new());
    lines.push(EXPLANATION_INSTRUCTION.to_string());
    lines.join("\n")
}

const LONG_EXPOSURE_BODY: &[&str] = &[
    "Give a specific value or a small, specific range for the core settings.",
    "- Shutter Speed: Recommend a very slow speed, likely multiple seconds (e.g., 5-30 seconds) or Bulb mode.",
    "- ISO: Recommend the lowest possible native setting (e.g., ISO 100, ISO 64).",
    "- Aperture: Suggest a mid-range aperture for sharpness (e.g., f/8 - f/16).",
    "- Focus Mode: Heavily recommend Manual Focus (MF) and explain the user should focus before starting the exposure.",
    "- General Tip: The general tip MUST explain the absolute necessity of a sturdy tripod and using a remote shutter release or the camera's self-timer to prevent camera shake.",
    "- Brand Specific Tip: If a brand is specified, provide a relevant tip (like Long Exposure Noise Reduction). If no brand is specified, use this tip to explain what a Neutral Density (ND) filter is and why it's essential for long exposures during the day.",
];

const GENERAL_BODY: &[&str] = &[
    "Give a specific value or a small, specific range for the core settings.",
    "For brand-specific settings like Focus Mode, Metering Mode, and Drive Mode, use terminology common to the specified brand if possible. If no brand is specified, use generic terms.",
    "Provide a recommendation for a type of lens that would be suitable for this shot.",
    "Also, provide a concise, actionable 'general tip' to improve the shot.",
    "If a camera brand is specified, add a 'brand specific tip' that leverages a feature or setting of that brand. If no brand is specified, this field can be omitted or left empty.",
];

/// Builds the example-image prompt for a scene.
pub fn image_prompt(scene_name: &str) -> String {
    format!(
        "A high-quality, professional, photorealistic photograph representing the scene: \"{scene_name}\". Sharp focus, beautiful lighting, vivid colors, shot on a professional camera."
    )
}
