//! HTML for the analysis form

use accentscan_core::AccentReport;
use std::fmt::Write;

pub const TITLE: &str = "English Accent Classifier from Video";
pub const PROMPT: &str = "Please enter a video URL (.mp4 format) and click Analyze.";

/// What to show below the form
#[derive(Debug)]
pub enum Outcome {
    Prompt,
    Report(AccentReport),
    Error(String),
}

pub fn render(url: &str, outcome: &Outcome) -> String {
    let mut body = String::new();

    match outcome {
        Outcome::Prompt => {
            let _ = write!(body, r#"<p class="info">{}</p>"#, PROMPT);
        }
        Outcome::Report(report) => {
            let _ = write!(
                body,
                concat!(
                    r#"<p class="success">Analysis Complete!</p>"#,
                    "<p><strong>Language:</strong> {}</p>",
                    "<p><strong>Detected Accent:</strong> {}</p>",
                    "<p><strong>Confidence Score:</strong> {}</p>",
                ),
                escape_html(&report.language),
                escape_html(&report.accent),
                escape_html(&report.confidence()),
            );
        }
        Outcome::Error(message) => {
            let _ = write!(body, r#"<p class="error">Error: {}</p>"#, escape_html(message));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 44rem; margin: 3rem auto; padding: 0 1rem; }}
input[type=text] {{ width: 100%; padding: .5rem; box-sizing: border-box; }}
button {{ margin-top: .75rem; padding: .5rem 1.25rem; }}
.info {{ background: #e8f0fe; padding: .75rem; }}
.success {{ background: #e6f4ea; padding: .75rem; }}
.error {{ background: #fce8e6; padding: .75rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/">
<label for="video_url">Enter Video URL (.mp4 format):</label>
<input type="text" id="video_url" name="video_url" value="{url}">
<button type="submit">Analyze</button>
</form>
{body}
</body>
</html>
"#,
        title = TITLE,
        url = escape_html(url),
        body = body,
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use accentscan_classify::Accent;

    #[test]
    fn test_prompt_page() {
        let html = render("", &Outcome::Prompt);
        assert!(html.contains("<h1>English Accent Classifier from Video</h1>"));
        assert!(html.contains("Enter Video URL (.mp4 format):"));
        assert!(html.contains(PROMPT));
        assert!(!html.contains("Analysis Complete!"));
    }

    #[test]
    fn test_report_page() {
        let report = AccentReport::new("https://x/v.mp4", Accent::new("British", 0.999), "m");
        let html = render("https://x/v.mp4", &Outcome::Report(report));

        assert!(html.contains("Analysis Complete!"));
        assert!(html.contains("<strong>Language:</strong> English"));
        assert!(html.contains("<strong>Detected Accent:</strong> British"));
        assert!(html.contains("<strong>Confidence Score:</strong> 99%"));
        assert!(html.contains(r#"value="https://x/v.mp4""#));
    }

    #[test]
    fn test_error_page_is_escaped() {
        let html = render(
            r#""><script>"#,
            &Outcome::Error("bad <input> & more".to_string()),
        );
        assert!(html.contains("Error: bad &lt;input&gt; &amp; more"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }
}
