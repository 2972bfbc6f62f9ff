//! Accent classification bridge for accentscan
//!
//! This crate sends a short WAV clip to a hosted multimodal model and turns
//! its free-text answer into an [`Accent`]:
//! - [`OpenAiClassifier`]: chat-completions endpoint with audio input
//! - [`parse_reply`]: tolerant parsing of the two-line `accent:` / `score:` reply

mod accent;
mod error;
mod openai;
mod prompt;

pub use accent::{parse_reply, Accent, ERROR_LABEL, NOT_ENGLISH_LABEL};
pub use error::ClassifyError;
pub use openai::{OpenAiClassifier, OpenAiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_VOICE};
pub use prompt::ACCENT_PROMPT;

/// A model that can label the accent of a WAV recording
#[trait_variant::make(AccentModel: Send)]
pub trait LocalAccentModel {
    /// Classify a complete WAV file held in memory
    async fn classify(&self, wav: &[u8]) -> Result<Accent, ClassifyError>;

    /// Get model name
    fn model(&self) -> &str;
}
