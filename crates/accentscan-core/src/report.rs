//! Displayable result of one analysis

use accentscan_classify::Accent;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AccentReport {
    pub url: String,
    /// "English", or "Not English" when the model found no English speech
    pub language: String,
    pub accent: String,
    pub score: f64,
    pub score_percent: i64,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AccentReport {
    pub fn new(url: &str, accent: Accent, model: &str) -> Self {
        let language = if accent.is_english() { "English" } else { "Not English" };

        Self {
            url: url.to_string(),
            language: language.to_string(),
            score_percent: accent.score_percent(),
            score: accent.score,
            accent: accent.label,
            model: model.to_string(),
            analyzed_at: Utc::now(),
        }
    }

    /// "87%"
    pub fn confidence(&self) -> String {
        format!("{}%", self.score_percent)
    }
}
