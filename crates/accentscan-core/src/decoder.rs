//! Audio clip extraction using FFmpeg

use crate::downloader::DownloadedVideo;
use crate::error::ExtractError;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Decoder {
    ffmpeg_path: PathBuf,
    max_clip_seconds: f64,
    temp_dir: PathBuf,
}

/// The extracted WAV clip; the file is removed when this is dropped or closed
#[derive(Debug)]
pub struct ExtractedAudio {
    pub path: TempPath,
    pub clip_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds, if FFmpeg reported one
    pub duration: Option<f64>,
    pub has_audio: bool,
}

impl Decoder {
    pub fn new(ffmpeg_path: PathBuf, max_clip_seconds: f64, temp_dir: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            max_clip_seconds,
            temp_dir,
        }
    }

    /// Read duration and stream layout from FFmpeg's input banner
    pub async fn probe(&self, input: &Path) -> Result<MediaInfo, ExtractError> {
        // Without an output FFmpeg exits non-zero, but still prints the input banner
        let output = self
            .run(Command::new(&self.ffmpeg_path).arg("-hide_banner").arg("-i").arg(input))
            .await?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stderr.contains("Input #0") {
            return Err(ExtractError::FfmpegFailed {
                code: output.status.code(),
                stderr: last_line(&stderr),
            });
        }

        Ok(MediaInfo {
            duration: parse_duration(&stderr),
            has_audio: has_audio_stream(&stderr),
        })
    }

    /// Write the first `min(max_clip_seconds, duration)` seconds of audio as
    /// 16-bit PCM WAV, then delete the video.
    pub async fn extract_clip(&self, video: DownloadedVideo) -> Result<ExtractedAudio, ExtractError> {
        info!("Extracting audio from {}", video.path().display());

        let media = self.probe(video.path()).await?;
        if !media.has_audio {
            return Err(ExtractError::NoAudioStream);
        }

        let clip_seconds = clip_length(media.duration, self.max_clip_seconds);
        let audio_path = tempfile::Builder::new()
            .prefix("accentscan-")
            .suffix(".wav")
            .tempfile_in(&self.temp_dir)?
            .into_temp_path();

        let output = self
            .run(
                Command::new(&self.ffmpeg_path)
                    .args(["-hide_banner", "-loglevel", "error"])
                    .arg("-i")
                    .arg(video.path())
                    .args(["-vn", "-t"])
                    .arg(format!("{:.3}", clip_seconds))
                    .args(["-c:a", "pcm_s16le"])
                    .arg("-y")
                    .arg(&audio_path),
            )
            .await?;

        if !output.status.success() {
            return Err(ExtractError::FfmpegFailed {
                code: output.status.code(),
                stderr: last_line(&String::from_utf8_lossy(&output.stderr)),
            });
        }

        debug!("Audio extracted to {} ({:.1}s)", audio_path.display(), clip_seconds);
        debug!("Removing video file {}", video.path().display());
        video.path.close()?;

        Ok(ExtractedAudio {
            path: audio_path,
            clip_seconds,
        })
    }

    async fn run(&self, cmd: &mut Command) -> Result<Output, ExtractError> {
        cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractError::FfmpegNotFound,
            _ => ExtractError::Io(e),
        })
    }
}

fn clip_length(duration: Option<f64>, max_seconds: f64) -> f64 {
    match duration {
        Some(d) if d > 0.0 => d.min(max_seconds),
        _ => max_seconds,
    }
}

fn last_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
        .trim()
        .to_string()
}

fn has_audio_stream(ffmpeg_output: &str) -> bool {
    ffmpeg_output
        .lines()
        .any(|l| l.trim_start().starts_with("Stream #") && l.contains("Audio:"))
}

fn parse_duration(ffmpeg_output: &str) -> Option<f64> {
    // Look for pattern like "Duration: 00:03:45.12"
    let re = regex::Regex::new(r"Duration: (\d+):(\d+):(\d+)\.(\d+)").ok()?;
    let caps = re.captures(ffmpeg_output)?;

    let hours: f64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: f64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: f64 = caps.get(3)?.as_str().parse().ok()?;
    let centiseconds: f64 = caps.get(4)?.as_str().parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds + centiseconds / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'clip.mp4':
  Metadata:
    major_brand     : isom
  Duration: 00:01:02.50, start: 0.000000, bitrate: 1205 kb/s
  Stream #0:0[0x1](und): Video: h264 (High) (avc1 / 0x31637661), yuv420p, 1280x720, 1070 kb/s, 30 fps
  Stream #0:1[0x2](und): Audio: aac (LC) (mp4a / 0x6134706D), 44100 Hz, stereo, fltp, 128 kb/s
At least one output file must be specified
";

    const SILENT_BANNER: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'silent.mp4':
  Duration: N/A, bitrate: N/A
  Stream #0:0[0x1](und): Video: h264 (High), yuv420p, 640x360, 30 fps
At least one output file must be specified
";

    fn video_in(dir: &Path) -> DownloadedVideo {
        let path = tempfile::Builder::new()
            .suffix(".mp4")
            .tempfile_in(dir)
            .unwrap()
            .into_temp_path();
        DownloadedVideo { path, bytes: 0 }
    }

    #[test]
    fn test_parse_banner() {
        assert_eq!(parse_duration(BANNER), Some(62.5));
        assert!(has_audio_stream(BANNER));

        assert_eq!(parse_duration(SILENT_BANNER), None);
        assert!(!has_audio_stream(SILENT_BANNER));
    }

    #[test]
    fn test_clip_length_is_capped() {
        assert_eq!(clip_length(Some(62.5), 27.0), 27.0);
        assert_eq!(clip_length(Some(12.0), 27.0), 12.0);
        assert_eq!(clip_length(None, 27.0), 27.0);
        assert_eq!(clip_length(Some(0.0), 27.0), 27.0);
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line(BANNER), "At least one output file must be specified");
        assert_eq!(last_line(""), "");
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_still_removes_video() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());
        let video_path = video.path().to_path_buf();

        let decoder = Decoder::new(
            dir.path().join("no-such-ffmpeg"),
            27.0,
            dir.path().to_path_buf(),
        );
        let err = decoder.extract_clip(video).await.unwrap_err();

        assert!(matches!(err, ExtractError::FfmpegNotFound));
        assert!(!video_path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_extract_caps_clip_with_ffmpeg() {
        let Ok(ffmpeg) = which::which("ffmpeg") else {
            eprintln!("ffmpeg not installed, skipping");
            return;
        };

        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());
        let video_path = video.path().to_path_buf();

        let status = std::process::Command::new(&ffmpeg)
            .args(["-hide_banner", "-loglevel", "error"])
            .args(["-f", "lavfi", "-i", "sine=frequency=440:duration=30"])
            .args(["-c:a", "aac", "-y"])
            .arg(&video_path)
            .status()
            .unwrap();
        assert!(status.success());

        let decoder = Decoder::new(ffmpeg, 27.0, dir.path().to_path_buf());
        let audio = decoder.extract_clip(video).await.unwrap();

        assert!(!video_path.exists());
        assert_eq!(audio.clip_seconds, 27.0);
        assert_eq!(audio.path.extension().unwrap(), "wav");

        let info = decoder.probe(&audio.path).await.unwrap();
        assert!(info.has_audio);
        let duration = info.duration.unwrap();
        assert!((duration - 27.0).abs() < 0.1, "clip was {}s", duration);
    }
}
