//! Pipeline orchestration: download, extract, classify

use crate::decoder::{Decoder, ExtractedAudio};
use crate::downloader::Downloader;
use crate::error::AccentScanError;
use crate::report::AccentReport;
use crate::Config;

use accentscan_classify::{Accent, AccentModel, OpenAiClassifier};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Pipeline progress stages
#[derive(Debug, Clone)]
pub enum PipelineStage {
    Downloading { url: String },
    Extracting { bytes: u64 },
    Classifying { model: String, clip_seconds: f64 },
    Complete { report: AccentReport, duration: Duration },
    Failed { stage: String, error: String },
}

/// Runs one analysis per call; holds no per-request state
pub struct Pipeline<M> {
    downloader: Downloader,
    decoder: Decoder,
    model: M,
}

impl Pipeline<OpenAiClassifier> {
    /// Production pipeline: FFmpeg from PATH or config, hosted model from config
    pub fn from_config(config: &Config) -> Result<Self, AccentScanError> {
        let ffmpeg_path = config.ffmpeg_path()?;
        let model = config.classifier()?;

        Ok(Self::new(
            Downloader::new(config.temp_dir()),
            Decoder::new(ffmpeg_path, config.clip.max_seconds, config.temp_dir()),
            model,
        ))
    }
}

impl<M: AccentModel + Sync> Pipeline<M> {
    pub fn new(downloader: Downloader, decoder: Decoder, model: M) -> Self {
        Self {
            downloader,
            decoder,
            model,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    pub async fn run(&self, url: &str) -> Result<AccentReport, AccentScanError> {
        self.execute(url, None).await
    }

    pub async fn run_with_progress(
        &self,
        url: &str,
        progress_tx: &mpsc::Sender<PipelineStage>,
    ) -> Result<AccentReport, AccentScanError> {
        self.execute(url, Some(progress_tx)).await
    }

    async fn execute(
        &self,
        url: &str,
        progress: Option<&mpsc::Sender<PipelineStage>>,
    ) -> Result<AccentReport, AccentScanError> {
        let start_time = Instant::now();
        info!("Starting analysis for: {}", url);

        // 1. Download
        emit(progress, PipelineStage::Downloading { url: url.to_string() }).await;

        let video = match self.downloader.download(url).await {
            Ok(video) => video,
            Err(e) => return Err(fail(progress, "download", e.into()).await),
        };

        // 2. Extract the clip (deletes the video)
        emit(progress, PipelineStage::Extracting { bytes: video.bytes }).await;

        let audio = match self.decoder.extract_clip(video).await {
            Ok(audio) => audio,
            Err(e) => return Err(fail(progress, "extract", e.into()).await),
        };

        // 3. Classify (deletes the clip)
        emit(
            progress,
            PipelineStage::Classifying {
                model: self.model.model().to_string(),
                clip_seconds: audio.clip_seconds,
            },
        )
        .await;

        let accent = match self.classify_clip(audio).await {
            Ok(accent) => accent,
            Err(e) => return Err(fail(progress, "classify", e).await),
        };

        let report = AccentReport::new(url, accent, self.model.model());
        let duration = start_time.elapsed();
        info!(
            "Analysis complete: {} ({}) in {:.1}s",
            report.accent,
            report.confidence(),
            duration.as_secs_f32()
        );

        emit(
            progress,
            PipelineStage::Complete {
                report: report.clone(),
                duration,
            },
        )
        .await;

        Ok(report)
    }

    /// Send the clip to the model, then delete it
    pub async fn classify_clip(&self, audio: ExtractedAudio) -> Result<Accent, AccentScanError> {
        let wav = tokio::fs::read(&audio.path).await?;
        let accent = self.model.classify(&wav).await?;

        debug!("Removing audio file {}", audio.path.display());
        audio.path.close()?;

        Ok(accent)
    }
}

async fn emit(progress: Option<&mpsc::Sender<PipelineStage>>, stage: PipelineStage) {
    if let Some(tx) = progress {
        let _ = tx.send(stage).await;
    }
}

async fn fail(
    progress: Option<&mpsc::Sender<PipelineStage>>,
    stage: &str,
    error: AccentScanError,
) -> AccentScanError {
    emit(
        progress,
        PipelineStage::Failed {
            stage: stage.to_string(),
            error: error.to_string(),
        },
    )
    .await;
    error
}
