//! Segment generator: one synthesis call and one file per segment, in order.

use crate::config::{Config, Segment};
use crate::error::SegmentError;
use std::path::{Path, PathBuf};
use voiceover_speech::wav;
use voiceover_speech::{SpeechRequest, TTSSpeechProvider};

const PREVIEW_CHARS: usize = 40;

/// Outcome of generating a single segment
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub id: String,
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

impl GenerationResult {
    fn succeeded(id: &str, path: PathBuf) -> Self {
        Self {
            id: id.to_string(),
            path,
            success: true,
            error: None,
        }
    }

    fn failed(id: &str, path: PathBuf, error: &SegmentError) -> Self {
        Self {
            id: id.to_string(),
            path,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Synthesize every segment of `config` into `output_dir`.
///
/// Segments are processed sequentially in config order. A failing segment is
/// recorded and skipped; the returned list always has one entry per segment.
pub async fn generate(
    config: &Config,
    output_dir: &Path,
    provider: &dyn TTSSpeechProvider,
) -> Vec<GenerationResult> {
    let total = config.segments().len();
    let mut results = Vec::with_capacity(total);

    for (index, segment) in config.segments().iter().enumerate() {
        let path = output_dir.join(segment.file_name(config.output().format));
        log::info!("[{}/{}] {}", index + 1, total, segment.id);
        log::info!("  Text: {}", preview(&segment.text));

        let result = match generate_segment(config, segment, output_dir, &path, provider).await {
            Ok(duration_ms) => {
                log::info!("  Saved: {} ({} ms)", path.display(), duration_ms);
                GenerationResult::succeeded(&segment.id, path)
            }
            Err(err) => {
                log::warn!("  FAILED {}: {}", segment.id, err);
                GenerationResult::failed(&segment.id, path, &err)
            }
        };
        results.push(result);
    }

    results
}

async fn generate_segment(
    config: &Config,
    segment: &Segment,
    output_dir: &Path,
    path: &Path,
    provider: &dyn TTSSpeechProvider,
) -> Result<u64, SegmentError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| SegmentError::Directory {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let request = SpeechRequest {
        text: segment.text.clone(),
        voice: config.voice().voice(),
        format: config.output().format,
        params: config.voice().params(),
    };
    let response = provider.generate_speech(request).await?;

    if path.exists() {
        log::warn!("  Overwriting existing file: {}", path.display());
    }

    // Validation only admits WAV output.
    wav::write_wav_atomic(path, &response.audio).map_err(|source| SegmentError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(response.duration_ms)
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
