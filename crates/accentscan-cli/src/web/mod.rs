//! Web form front end

mod page;

use axum::{extract::State, response::Html, routing::get, Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use accentscan_classify::AccentModel;
use accentscan_core::pipeline::Pipeline;

use page::Outcome;

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub video_url: String,
}

pub fn router<M>(pipeline: Arc<Pipeline<M>>) -> Router
where
    M: AccentModel + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index).post(analyze::<M>))
        .with_state(pipeline)
}

async fn index() -> Html<String> {
    Html(page::render("", &Outcome::Prompt))
}

async fn analyze<M>(
    State(pipeline): State<Arc<Pipeline<M>>>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String>
where
    M: AccentModel + Send + Sync + 'static,
{
    let url = form.video_url.trim();
    if url.is_empty() {
        return Html(page::render(url, &Outcome::Prompt));
    }

    let span = info_span!("analyze", request_id = %Uuid::new_v4());
    let outcome = match pipeline.run(url).instrument(span).await {
        Ok(report) => Outcome::Report(report),
        Err(e) => {
            warn!("Analysis of {} failed: {}", url, e);
            Outcome::Error(e.to_string())
        }
    };

    Html(page::render(url, &outcome))
}
