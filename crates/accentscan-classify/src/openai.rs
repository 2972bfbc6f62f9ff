//! OpenAI chat-completions classifier with audio input

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::accent::{parse_reply, Accent};
use crate::error::ClassifyError;
use crate::prompt::ACCENT_PROMPT;
use crate::AccentModel;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-audio-preview";
pub const DEFAULT_VOICE: &str = "alloy";

/// Endpoint and model selection
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    /// Voice for the spoken half of the reply (the model answers in audio + transcript)
    pub voice: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

/// Accent classifier backed by an audio-capable chat model
pub struct OpenAiClassifier {
    client: Client,
    api_key: SecretString,
    settings: OpenAiSettings,
}

impl OpenAiClassifier {
    pub fn new(api_key: SecretString, settings: OpenAiSettings) -> Self {
        Self::with_client(Client::new(), api_key, settings)
    }

    pub fn with_client(client: Client, api_key: SecretString, settings: OpenAiSettings) -> Self {
        Self {
            client,
            api_key,
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    /// Send the clip and return the model's raw text answer
    async fn send_clip(&self, wav: &[u8]) -> Result<String, ClassifyError> {
        let encoded = STANDARD.encode(wav);
        let request = build_request(&self.settings, &encoded);

        debug!(
            "Sending {} bytes of audio to {} ({})",
            wav.len(),
            self.endpoint(),
            self.settings.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("OpenAI API error: {} - {}", status, error_text);
            return Err(ClassifyError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;

        reply_text(response)
    }
}

impl AccentModel for OpenAiClassifier {
    async fn classify(&self, wav: &[u8]) -> Result<Accent, ClassifyError> {
        info!("Classifying accent (model: {})", self.settings.model);

        let reply = self.send_clip(wav).await?;
        debug!("Model reply: {:?}", reply);

        Ok(parse_reply(&reply))
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

fn build_request<'a>(settings: &'a OpenAiSettings, encoded_wav: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &settings.model,
        modalities: ["text", "audio"],
        audio: AudioOutput {
            voice: &settings.voice,
            format: "wav",
        },
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: ACCENT_PROMPT,
                },
                ContentPart::InputAudio {
                    input_audio: InputAudio {
                        data: encoded_wav,
                        format: "wav",
                    },
                },
            ],
        }],
    }
}

/// Audio replies carry their text in `audio.transcript`; text-only replies in `content`
fn reply_text(response: ChatResponse) -> Result<String, ClassifyError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| ClassifyError::InvalidResponse("No choices in response".to_string()))?;

    message
        .audio
        .map(|a| a.transcript)
        .or(message.content)
        .ok_or_else(|| ClassifyError::InvalidResponse("Empty response".to_string()))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    modalities: [&'a str; 2],
    audio: AudioOutput<'a>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct AudioOutput<'a> {
    voice: &'a str,
    format: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    InputAudio { input_audio: InputAudio<'a> },
}

#[derive(Serialize)]
struct InputAudio<'a> {
    data: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    audio: Option<ChatResponseAudio>,
}

#[derive(Deserialize)]
struct ChatResponseAudio {
    transcript: String,
}
