//! API key and camera-model input handling.
//!
//! Both fields validate on every input change and expose a human-readable
//! message while the value is malformed. Malformed values never leave this
//! module: [`CredentialForm::credential`] and [`CameraModelInput::model`]
//! return `None` for them.

use crate::types::ProviderKind;

/// Shown when the key field is empty.
pub const KEY_REQUIRED: &str = "API key is required.";
/// Shown for a malformed Google key.
pub const INVALID_GOOGLE_KEY: &str = "Invalid Google Gemini API key format.";
/// Shown for a malformed OpenAI key.
pub const INVALID_OPENAI_KEY: &str = "Invalid OpenAI API key format.";
/// Shown for a malformed camera model.
pub const INVALID_MODEL: &str = "Invalid format. Use letters and numbers (e.g., A7 IV, R5).";

/// A validated API key bound to its provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    provider: ProviderKind,
    value: String,
}

impl Credential {
    /// Validates `value` for `provider`.
    pub fn new(provider: ProviderKind, value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        validate_api_key(provider, &value).is_none().then_some(Self { provider, value })
    }

    /// Provider this key belongs to.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("provider", &self.provider)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Checks an API key against the provider's key format.
///
/// Returns the message to show, or `None` when the key is well formed.
pub fn validate_api_key(provider: ProviderKind, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some(KEY_REQUIRED);
    }
    match provider {
        ProviderKind::Google => {
            // AIza + 30 or more of [0-9A-Za-z_-]
            let valid = value.strip_prefix("AIza").is_some_and(|rest| {
                rest.len() >= 30
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            });
            (!valid).then_some(INVALID_GOOGLE_KEY)
        }
        ProviderKind::OpenAi => {
            // sk- + 20 to 300 of [A-Za-z0-9-]
            let valid = value.strip_prefix("sk-").is_some_and(|rest| {
                (20..=300).contains(&rest.len())
                    && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            });
            (!valid).then_some(INVALID_OPENAI_KEY)
        }
    }
}

/// Checks a camera model name.
///
/// Valid models are 2-20 characters of letters, digits, whitespace and
/// hyphens, with at least one letter and one digit. An empty value is
/// valid (no model given).
pub fn validate_camera_model(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    let len = value.chars().count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-');
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if (2..=20).contains(&len) && allowed && has_letter && has_digit {
        None
    } else {
        Some(INVALID_MODEL)
    }
}

/// Provider selector plus API key field.
#[derive(Debug, Clone, Default)]
pub struct CredentialForm {
    provider: ProviderKind,
    value: String,
    error: Option<&'static str>,
    saved: bool,
}

impl CredentialForm {
    /// Creates an empty form for `provider`.
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Switches provider and resets the key, its message and the saved flag.
    pub fn select_provider(&mut self, provider: ProviderKind) {
        self.provider = provider;
        self.value.clear();
        self.error = None;
        self.saved = false;
    }

    /// Stores trimmed input and re-validates it.
    pub fn set_input(&mut self, raw: &str) {
        self.value = raw.trim().to_string();
        self.error = validate_api_key(self.provider, &self.value);
        self.saved = false;
    }

    /// Marks the key saved if it is present and valid. Otherwise a no-op.
    pub fn save(&mut self) -> bool {
        if self.error.is_none() && !self.value.is_empty() {
            self.saved = true;
        }
        self.saved
    }

    /// Currently selected provider.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Current (trimmed) input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current validation message.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Whether the key has been saved since the last edit.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// The key, if one has been entered and is well formed.
    pub fn credential(&self) -> Option<Credential> {
        if self.error.is_some() || self.value.is_empty() {
            return None;
        }
        Some(Credential {
            provider: self.provider,
            value: self.value.clone(),
        })
    }
}

/// Free-text camera model field.
#[derive(Debug, Clone, Default)]
pub struct CameraModelInput {
    value: String,
    error: Option<&'static str>,
}

impl CameraModelInput {
    /// Stores the raw value and re-validates it.
    pub fn set_input(&mut self, raw: &str) {
        self.value = raw.to_string();
        self.error = validate_camera_model(&self.value);
    }

    /// Current raw input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current validation message.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// The model to send to the provider, if given and valid.
    pub fn model(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (self.error.is_none() && !trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE_KEY: &str = "AIzaSyA1234567890abcdefghijklmnopqrs";
    const OPENAI_KEY: &str = "sk-proj-abcdefghijklmnopqrstuvwxyz0123";

    #[test]
    fn test_google_key_format() {
        assert_eq!(validate_api_key(ProviderKind::Google, GOOGLE_KEY), None);
        assert_eq!(
            validate_api_key(ProviderKind::Google, &format!("AIza{}", "_-".repeat(15))),
            None
        );
        // 29 characters after the prefix
        assert_eq!(
            validate_api_key(ProviderKind::Google, &format!("AIza{}", "a".repeat(29))),
            Some(INVALID_GOOGLE_KEY)
        );
        assert_eq!(
            validate_api_key(ProviderKind::Google, "BIzaSyA1234567890abcdefghijklmnopqrs"),
            Some(INVALID_GOOGLE_KEY)
        );
        assert_eq!(
            validate_api_key(ProviderKind::Google, "AIzaSyA1234567890abcdefghijklmnop.rs"),
            Some(INVALID_GOOGLE_KEY)
        );
        assert_eq!(validate_api_key(ProviderKind::Google, OPENAI_KEY), Some(INVALID_GOOGLE_KEY));
    }

    #[test]
    fn test_openai_key_format() {
        assert_eq!(validate_api_key(ProviderKind::OpenAi, OPENAI_KEY), None);
        assert_eq!(
            validate_api_key(ProviderKind::OpenAi, &format!("sk-{}", "a".repeat(19))),
            Some(INVALID_OPENAI_KEY)
        );
        assert_eq!(
            validate_api_key(ProviderKind::OpenAi, &format!("sk-{}", "a".repeat(300))),
            None
        );
        assert_eq!(
            validate_api_key(ProviderKind::OpenAi, &format!("sk-{}", "a".repeat(301))),
            Some(INVALID_OPENAI_KEY)
        );
        // underscores are not part of the OpenAI alphabet
        assert_eq!(
            validate_api_key(ProviderKind::OpenAi, "sk-abcdefghij_klmnopqrstuvwxyz"),
            Some(INVALID_OPENAI_KEY)
        );
        assert_eq!(validate_api_key(ProviderKind::OpenAi, GOOGLE_KEY), Some(INVALID_OPENAI_KEY));
    }

    #[test]
    fn test_empty_key_is_required() {
        let mut form = CredentialForm::new(ProviderKind::Google);
        form.set_input("   ");
        assert_eq!(form.value(), "");
        assert_eq!(form.error(), Some(KEY_REQUIRED));
        assert!(form.credential().is_none());
    }

    #[test]
    fn test_input_is_trimmed() {
        let mut form = CredentialForm::new(ProviderKind::OpenAi);
        form.set_input(&format!("  {OPENAI_KEY}\n"));
        assert_eq!(form.value(), OPENAI_KEY);
        assert_eq!(form.error(), None);
        assert_eq!(form.credential().unwrap().expose(), OPENAI_KEY);
    }

    #[test]
    fn test_switching_provider_clears_state() {
        let mut form = CredentialForm::new(ProviderKind::Google);
        form.set_input(GOOGLE_KEY);
        assert!(form.save());

        form.select_provider(ProviderKind::OpenAi);
        assert_eq!(form.provider(), ProviderKind::OpenAi);
        assert_eq!(form.value(), "");
        assert_eq!(form.error(), None);
        assert!(!form.is_saved());

        form.set_input("garbage");
        assert!(form.error().is_some());
        form.select_provider(ProviderKind::Google);
        assert_eq!(form.error(), None);
        assert_eq!(form.value(), "");
    }

    #[test]
    fn test_save_requires_valid_key() {
        let mut form = CredentialForm::new(ProviderKind::Google);
        assert!(!form.save());

        form.set_input("AIzaShort");
        assert!(!form.save());
        assert!(!form.is_saved());
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut form = CredentialForm::new(ProviderKind::Google);
        form.set_input(GOOGLE_KEY);
        assert!(form.save());
        assert!(form.save());
        assert!(form.is_saved());

        // any keystroke clears the saved flag
        form.set_input(GOOGLE_KEY);
        assert!(!form.is_saved());
    }

    #[test]
    fn test_credential_debug_redacts() {
        let credential = Credential::new(ProviderKind::Google, GOOGLE_KEY).unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains(GOOGLE_KEY));
        assert!(debug.contains("REDACTED"));
        assert!(Credential::new(ProviderKind::OpenAi, GOOGLE_KEY).is_none());
    }

    #[test]
    fn test_camera_model_validation() {
        assert_eq!(validate_camera_model("A7 IV"), None);
        assert_eq!(validate_camera_model("R5"), None);
        assert_eq!(validate_camera_model("Z6-II"), None);
        assert_eq!(validate_camera_model(""), None);
        assert_eq!(validate_camera_model("abc"), Some(INVALID_MODEL));
        assert_eq!(validate_camera_model("12"), Some(INVALID_MODEL));
        assert_eq!(validate_camera_model("R"), Some(INVALID_MODEL));
        assert_eq!(validate_camera_model("EOS R5/R6"), Some(INVALID_MODEL));
        assert_eq!(
            validate_camera_model("A1 with a very long name"),
            Some(INVALID_MODEL)
        );
    }

    #[test]
    fn test_camera_model_input() {
        let mut input = CameraModelInput::default();
        assert_eq!(input.model(), None);

        input.set_input("abc");
        assert_eq!(input.error(), Some(INVALID_MODEL));
        assert_eq!(input.model(), None);

        input.set_input("A7 IV");
        assert_eq!(input.error(), None);
        assert_eq!(input.model().as_deref(), Some("A7 IV"));

        input.set_input("");
        assert_eq!(input.error(), None);
        assert_eq!(input.model(), None);
    }
}
