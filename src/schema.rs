//! Structured-response contract for camera settings.
//!
//! The same field table drives the Gemini response schema, the key list in
//! the OpenAI instruction, and the required-field check applied to both.

use crate::error::{LensCoachError, Result};
use crate::types::CameraSettings;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// One property of the settings object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// JSON key.
    pub name: &'static str,
    /// Hint passed to the model.
    pub description: &'static str,
    /// Whether the field must be present and non-empty.
    pub required: bool,
}

const fn field(name: &'static str, description: &'static str, required: bool) -> SchemaField {
    SchemaField {
        name,
        description,
        required,
    }
}

/// Every settings property, in schema order.
pub const SETTINGS_FIELDS: [SchemaField; 17] = [
    field("aperture", "e.g., f/1.8, f/8-f/11", true),
    field("apertureExplanation", "Explain why this aperture is recommended for the scene.", true),
    field("iso", "e.g., 100, 400-800", true),
    field("isoExplanation", "Explain why this ISO is recommended for the scene.", true),
    field("shutterSpeed", "e.g., 1/125s, 30s", true),
    field("shutterSpeedExplanation", "Explain why this shutter speed is recommended for the scene.", true),
    field("whiteBalance", "e.g., Auto, Daylight, 5500K", true),
    field("whiteBalanceExplanation", "Explain why this white balance is recommended for the scene.", true),
    field("focusMode", "e.g., AF-C, Eye AF, Manual Focus", true),
    field("focusModeExplanation", "Explain why this focus mode is recommended for the scene.", true),
    field("driveMode", "e.g., Single Shot, Continuous High", true),
    field("driveModeExplanation", "Explain why this drive mode is recommended for the scene.", true),
    field("meteringMode", "e.g., Matrix, Center-Weighted", true),
    field("meteringModeExplanation", "Explain why this metering mode is recommended for the scene.", true),
    field("lensRecommendation", "A recommendation for a suitable lens.", true),
    field("generalTip", "A short, helpful tip for any camera.", true),
    field(
        "brandSpecificTip",
        "A tip specific to the user's camera brand or a key technique like using ND filters.",
        false,
    ),
];

/// Gemini `responseSchema` for the settings object.
pub fn response_schema() -> Value {
    let properties: Map<String, Value> = SETTINGS_FIELDS
        .iter()
        .map(|f| {
            (
                f.name.to_string(),
                json!({ "type": "STRING", "description": f.description }),
            )
        })
        .collect();
    let required: Vec<&str> = SETTINGS_FIELDS
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

/// Instruction appended to prompts for providers without schema support.
pub fn json_keys_instruction() -> String {
    let keys: Vec<&str> = SETTINGS_FIELDS.iter().map(|f| f.name).collect();
    format!(
        "Respond only with a JSON object with these keys: {}. Every value must be a string.",
        keys.join(", ")
    )
}

/// Removes a surrounding Markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses model output into settings, enforcing required fields.
pub fn parse_settings(text: &str) -> Result<CameraSettings> {
    let raw: RawSettings = serde_json::from_str(text.trim())?;
    raw.validate()
}

/// Settings as returned by the model, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    aperture: Option<String>,
    aperture_explanation: Option<String>,
    iso: Option<String>,
    iso_explanation: Option<String>,
    shutter_speed: Option<String>,
    shutter_speed_explanation: Option<String>,
    white_balance: Option<String>,
    white_balance_explanation: Option<String>,
    focus_mode: Option<String>,
    focus_mode_explanation: Option<String>,
    drive_mode: Option<String>,
    drive_mode_explanation: Option<String>,
    metering_mode: Option<String>,
    metering_mode_explanation: Option<String>,
    lens_recommendation: Option<String>,
    general_tip: Option<String>,
    brand_specific_tip: Option<String>,
}

impl RawSettings {
    fn validate(self) -> Result<CameraSettings> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, name: &'static str| match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let settings = CameraSettings {
            aperture: take(self.aperture, "aperture"),
            aperture_explanation: take(self.aperture_explanation, "apertureExplanation"),
            iso: take(self.iso, "iso"),
            iso_explanation: take(self.iso_explanation, "isoExplanation"),
            shutter_speed: take(self.shutter_speed, "shutterSpeed"),
            shutter_speed_explanation: take(self.shutter_speed_explanation, "shutterSpeedExplanation"),
            white_balance: take(self.white_balance, "whiteBalance"),
            white_balance_explanation: take(self.white_balance_explanation, "whiteBalanceExplanation"),
            focus_mode: take(self.focus_mode, "focusMode"),
            focus_mode_explanation: take(self.focus_mode_explanation, "focusModeExplanation"),
            drive_mode: take(self.drive_mode, "driveMode"),
            drive_mode_explanation: take(self.drive_mode_explanation, "driveModeExplanation"),
            metering_mode: take(self.metering_mode, "meteringMode"),
            metering_mode_explanation: take(self.metering_mode_explanation, "meteringModeExplanation"),
            lens_recommendation: take(self.lens_recommendation, "lensRecommendation"),
            general_tip: take(self.general_tip, "generalTip"),
            brand_specific_tip: self.brand_specific_tip.filter(|t| !t.trim().is_empty()),
        };

        if missing.is_empty() {
            Ok(settings)
        } else {
            Err(LensCoachError::InvalidResponseShape { missing })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A complete settings object as a model would return it.
    pub(crate) fn sample_json() -> Value {
        let mut object = Map::new();
        for f in SETTINGS_FIELDS.iter().filter(|f| f.required) {
            object.insert(f.name.to_string(), json!(format!("{} value", f.name)));
        }
        Value::Object(object)
    }

    #[test]
    fn test_schema_shape() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"].as_object().unwrap().len(), 17);
        assert_eq!(schema["properties"]["iso"]["type"], "STRING");

        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 16);
        assert!(!required.contains(&json!("brandSpecificTip")));
        assert_eq!(required[0], "aperture");
    }

    #[test]
    fn test_json_keys_instruction_lists_every_field() {
        let instruction = json_keys_instruction();
        for f in SETTINGS_FIELDS {
            assert!(instruction.contains(f.name), "missing {}", f.name);
        }
    }

    #[test]
    fn test_parse_complete_settings() {
        let settings = parse_settings(&sample_json().to_string()).unwrap();
        assert_eq!(settings.aperture, "aperture value");
        assert_eq!(settings.metering_mode_explanation, "meteringModeExplanation value");
        assert_eq!(settings.brand_specific_tip, None);
    }

    #[test]
    fn test_parse_keeps_brand_tip() {
        let mut value = sample_json();
        value["brandSpecificTip"] = json!("Enable Long Exposure NR");
        let settings = parse_settings(&value.to_string()).unwrap();
        assert_eq!(settings.brand_specific_tip.as_deref(), Some("Enable Long Exposure NR"));
    }

    #[test]
    fn test_parse_reports_missing_and_empty_fields() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("iso");
        value["generalTip"] = json!("  ");

        let err = parse_settings(&value.to_string()).unwrap_err();
        match err {
            LensCoachError::InvalidResponseShape { missing } => {
                assert_eq!(missing, vec!["iso", "generalTip"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_settings("Sure! Here are your settings.").unwrap_err();
        assert!(matches!(err, LensCoachError::Json(_)));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json {\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let bare = sample_json().to_string();
        let fenced = format!("```json\n{bare}\n```");
        assert_eq!(
            parse_settings(strip_code_fences(&fenced)).unwrap(),
            parse_settings(strip_code_fences(&bare)).unwrap()
        );
    }
}
