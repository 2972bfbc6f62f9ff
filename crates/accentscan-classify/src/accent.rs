//! Accent labels and reply parsing

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label used when the reply could not be parsed
pub const ERROR_LABEL: &str = "Error";

/// Label used when the speech is not English
pub const NOT_ENGLISH_LABEL: &str = "Not English";

/// Accent label with the model's confidence (0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accent {
    pub label: String,
    pub score: f64,
}

impl Accent {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Sentinel for a reply that did not follow the requested format
    pub fn error() -> Self {
        Self::new(ERROR_LABEL, 0.0)
    }

    pub fn not_english() -> Self {
        Self::new(NOT_ENGLISH_LABEL, 0.0)
    }

    pub fn is_english(&self) -> bool {
        self.label != NOT_ENGLISH_LABEL
    }

    /// Score as a whole percentage, truncated toward zero
    pub fn score_percent(&self) -> i64 {
        (self.score * 100.0) as i64
    }
}

/// Parse a reply of the form `accent: <label>\nscore: <float>`.
///
/// Never fails: a reply missing either field, or with a score that is not a
/// number, maps to [`Accent::error`]. An accent of `None` or a zero score
/// maps to [`Accent::not_english`].
pub fn parse_reply(reply: &str) -> Accent {
    let Some((label, score)) = split_fields(reply) else {
        debug!("Unparseable model reply: {:?}", reply);
        return Accent::error();
    };

    if label == "None" || score == 0.0 {
        return Accent::not_english();
    }

    Accent::new(label, score)
}

fn split_fields(reply: &str) -> Option<(&str, f64)> {
    let label = reply.split("accent:").nth(1)?.split('\n').next()?.trim();
    let score = reply.split("score:").nth(1)?.trim().parse::<f64>().ok()?;
    Some((label, score))
}
