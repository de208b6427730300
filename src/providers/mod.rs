//! Settings and example-image providers.

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiProvider, GeminiProviderBuilder};

#[cfg(feature = "openai")]
pub use openai::{OpenAiProvider, OpenAiProviderBuilder};
