use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

use accentscan_core::{
    config::Config,
    pipeline::{Pipeline, PipelineStage},
    AccentReport,
};

pub async fn run(url: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let pipeline = Pipeline::from_config(&config)?;

    // Create progress channel
    let (tx, mut rx) = mpsc::channel(32);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    // Spawn progress handler
    let progress_handle = tokio::spawn(async move {
        while let Some(stage) = rx.recv().await {
            match stage {
                PipelineStage::Downloading { url } => {
                    pb.set_message(format!("Downloading: {}", truncate(&url, 50)));
                }
                PipelineStage::Extracting { bytes } => {
                    pb.set_message(format!("Extracting audio ({:.1} MB)...", bytes as f64 / 1e6));
                }
                PipelineStage::Classifying { model, clip_seconds } => {
                    pb.set_message(format!("Classifying {:.0}s clip with {}...", clip_seconds, model));
                }
                PipelineStage::Complete { duration, .. } => {
                    pb.finish_with_message(format!(
                        "Analysis complete ({:.1}s)",
                        duration.as_secs_f32()
                    ));
                }
                PipelineStage::Failed { stage, error } => {
                    pb.abandon_with_message(format!("Failed at {}: {}", stage, error));
                }
            }
        }
    });

    // Run pipeline
    let result = pipeline.run_with_progress(url, &tx).await;
    drop(tx);

    // Wait for progress handler
    progress_handle.await?;

    match result {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            Err(e.into())
        }
    }
}

fn print_report(report: &AccentReport) {
    println!();
    println!("Language:         {}", report.language);
    println!("Detected Accent:  {}", report.accent);
    println!("Confidence Score: {}", report.confidence());
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
