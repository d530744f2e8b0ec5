//! End-to-end invocation: load, synthesize, optionally combine, report.

use crate::combiner;
use crate::config::{Config, validator};
use crate::error::{ConfigError, Result, VoiceoverError};
use crate::generator;
use crate::report::{CombineOutcome, RunReport};
use std::path::{Path, PathBuf};
use voiceover_speech::{TTSProvider, TTSSpeechProvider};
use voiceover_speech::providers::piper::{PiperConfig, PiperTTS};

pub const DEFAULT_COMBINED_FILENAME: &str = "combined_voiceover.wav";

/// Options for a voice-over run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Where segment files (and the combined file) are written
    pub output_dir: PathBuf,
    /// Voice model cache
    pub models_dir: PathBuf,
    pub combine: bool,
    /// File name of the combined output, relative to `output_dir`
    pub combined_filename: String,
    pub piper_program: String,
    pub piper_args: Vec<String>,
    /// Download missing voice models
    pub download: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            models_dir: PathBuf::from("models"),
            combine: false,
            combined_filename: DEFAULT_COMBINED_FILENAME.to_string(),
            piper_program: "piper".to_string(),
            piper_args: Vec::new(),
            download: true,
        }
    }
}

impl GenerateOptions {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    pub fn with_combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    /// Combined output path; the name must not leave `output_dir`.
    pub fn combined_path(&self) -> std::result::Result<PathBuf, ConfigError> {
        validator::check_file_name(&self.combined_filename)
            .map_err(|reason| ConfigError::invalid("combined_filename", reason))?;
        Ok(self.output_dir.join(&self.combined_filename))
    }

    /// Piper settings for the given voice under these options
    pub fn piper_config(&self, voice: &str) -> PiperConfig {
        PiperConfig {
            voice: voice.to_string(),
            models_dir: self.models_dir.clone(),
            program: self.piper_program.clone(),
            program_args: self.piper_args.clone(),
            download: self.download,
            revision: None,
        }
    }
}

/// Generate every segment with `provider`, then combine if requested.
pub async fn run(
    config: &Config,
    provider: &dyn TTSSpeechProvider,
    options: &GenerateOptions,
) -> RunReport {
    log::info!(
        "Generating {} segment(s) with voice {}",
        config.segments().len(),
        config.voice().model
    );
    let results = generator::generate(config, &options.output_dir, provider).await;
    let mut report = RunReport {
        results,
        combine: CombineOutcome::NotRequested,
    };

    log::info!(
        "Generated {}/{} segment(s)",
        report.succeeded(),
        report.total()
    );

    if options.combine {
        report.combine = combine_segments(&report, config, options);
    }

    report
}

fn combine_segments(report: &RunReport, config: &Config, options: &GenerateOptions) -> CombineOutcome {
    let paths = report.generated_paths();
    if paths.is_empty() {
        log::warn!("No segments were generated, skipping combine");
        return CombineOutcome::Skipped;
    }

    let output = match options.combined_path() {
        Ok(output) => output,
        Err(err) => {
            log::error!("Failed to combine segments: {err}");
            return CombineOutcome::Failed(err.to_string());
        }
    };
    log::info!("Combining {} file(s) into {}", paths.len(), output.display());
    match combiner::combine(&paths, config.output().combine_silence, &output) {
        Ok(()) => {
            log::info!("Combined: {}", output.display());
            CombineOutcome::Written(output)
        }
        Err(err) => {
            log::error!("Failed to combine segments: {err}");
            CombineOutcome::Failed(err.to_string())
        }
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| VoiceoverError::Directory {
        path: path.to_path_buf(),
        source,
    })
}

/// Run a validated config through a Piper provider built from `options`.
pub async fn try_generate_config(config: &Config, options: &GenerateOptions) -> Result<RunReport> {
    if options.combine {
        options.combined_path()?;
    }
    ensure_dir(&options.output_dir)?;
    ensure_dir(&options.models_dir)?;

    let provider = PiperTTS::new(options.piper_config(&config.voice().model))?;
    log_model(&provider);
    Ok(run(config, &provider, options).await)
}

fn log_model(provider: &dyn TTSProvider) {
    let model = provider.get_current_model();
    log::info!(
        "Provider {} ready with model {} (languages: {:?})",
        provider.provider_name(),
        model.id,
        model.languages
    );
}

/// Generate a voice-over from a JSON config file.
///
/// Fails before any synthesis if the config cannot be loaded or the voice
/// model cannot be resolved.
pub async fn try_generate_voiceover(
    config_path: impl AsRef<Path>,
    options: &GenerateOptions,
) -> Result<RunReport> {
    let config = Config::load(config_path)?;
    try_generate_config(&config, options).await
}

/// Generate a voice-over from plain text lines, one segment per non-blank line.
pub async fn try_generate_from_text<I, S>(
    lines: I,
    voice: &str,
    options: &GenerateOptions,
) -> Result<RunReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let config = Config::from_lines(lines, voice)?;
    try_generate_config(&config, options).await
}

/// Like [`try_generate_voiceover`], reporting only overall success.
pub async fn generate_voiceover(config_path: impl AsRef<Path>, options: &GenerateOptions) -> bool {
    finish(try_generate_voiceover(config_path, options).await)
}

/// Like [`try_generate_from_text`], reporting only overall success.
pub async fn generate_from_text<I, S>(lines: I, voice: &str, options: &GenerateOptions) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    finish(try_generate_from_text(lines, voice, options).await)
}

fn finish(result: Result<RunReport>) -> bool {
    match result {
        Ok(report) => report.is_success(),
        Err(err) => {
            log::error!("{err}");
            false
        }
    }
}
