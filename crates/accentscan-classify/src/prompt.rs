//! Prompt sent alongside the audio clip

/// Instruction asking for a two-line `accent:` / `score:` answer
pub const ACCENT_PROMPT: &str = "\
What is the English accent of this recording?
Answer MUST in this format:
accent: British
score: 0.99

If it is not English:
accent: None
score: 0";
