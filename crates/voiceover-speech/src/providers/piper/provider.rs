//! Piper provider implementation
//!
//! Runs the Piper executable once per request and decodes the WAV it writes.

use super::config::PiperConfig;
use super::error::{PiperError, Result};
use super::voices::{PIPER_VOICES_REPO, PredefinedVoice, VoiceModelName};
use crate::model_source::ModelSource;
use crate::wav;
use crate::{
    AudioData, ModelInfo, SpeechRequest, SpeechResponse, SynthesisParams, TTSError,
    TTSModelsProvider, TTSProvider, TTSResult, TTSSpeechProvider,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Piper provider bound to a single voice model
pub struct PiperTTS {
    config: PiperConfig,
    model_path: PathBuf,
}

impl PiperTTS {
    /// Create a new Piper provider, downloading the voice model if needed
    pub fn new(config: PiperConfig) -> Result<Self> {
        let model_path = resolve_model(&config)?;
        log::info!("Using voice model: {}", model_path.display());

        Ok(Self { config, model_path })
    }

    /// Resolved `.onnx` model path
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    async fn synthesize(&self, text: &str, params: &SynthesisParams) -> Result<AudioData> {
        let workdir = tempfile::tempdir().map_err(|e| {
            PiperError::io_error(
                e,
                std::env::temp_dir().display().to_string(),
                "create scratch directory",
            )
        })?;
        let output_file = workdir.path().join("speech.wav");

        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.program_args)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--output_file")
            .arg(&output_file)
            .arg("--length_scale")
            .arg(params.length_scale.to_string())
            .arg("--noise_scale")
            .arg(params.noise_scale.to_string())
            .arg("--noise_w")
            .arg(params.noise_w.to_string())
            .arg("--sentence_silence")
            .arg(params.sentence_silence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("Running {:?}", command);
        let mut child = command
            .spawn()
            .map_err(|e| PiperError::SpawnError(e, self.config.program.clone()))?;

        // Feed stdin while stderr is drained so neither pipe can fill up.
        let stdin = child.stdin.take();
        let text = text.to_owned();
        let writer = tokio::spawn(async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(text.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| PiperError::io_error(e, self.config.program.clone(), "wait for"))?;

        match writer.await.map_err(std::io::Error::other) {
            Ok(Ok(())) => {}
            // Piper may exit before reading its input; the exit status carries
            // the real failure in that case.
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                log::debug!("Piper closed stdin early");
            }
            Ok(Err(e)) | Err(e) => {
                return Err(PiperError::io_error(e, "<stdin>", "write text to piper"));
            }
        }

        if !output.status.success() {
            return Err(PiperError::ProcessFailed(
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        Ok(wav::read_wav(&output_file)?)
    }
}

/// Find `{voice}.onnx` and its `.onnx.json` in the models directory, taking
/// them from the hub cache or the voices repository when they are missing.
fn resolve_model(config: &PiperConfig) -> Result<PathBuf> {
    let voice = config.voice.as_str();
    if voice.is_empty() || voice.contains(['/', '\\']) || voice.contains("..") {
        return Err(PiperError::invalid_voice(voice));
    }

    let model_file = config.models_dir.join(format!("{voice}.onnx"));
    let config_file = config.models_dir.join(format!("{voice}.onnx.json"));

    let local = ModelSource::from_file(&model_file)
        .resolve()
        .and_then(|model| ModelSource::from_file(&config_file).resolve().map(|_| model));
    let missing = match local {
        Ok(model) => {
            log::info!("Voice model cached: {}", voice);
            return Ok(model);
        }
        Err(err) => err,
    };

    // Only repository voices follow the naming scheme; custom models must
    // already be in the models directory.
    let name = VoiceModelName::parse(voice);
    if let Ok(name) = &name {
        let cached_config = remote(config, name.hf_config_path()).cached();
        let cached_model = remote(config, name.hf_model_path()).cached();
        if let (Some(json), Some(onnx)) = (cached_config, cached_model) {
            log::info!("Voice model found in hub cache: {}", voice);
            install(&json, &config_file)?;
            install(&onnx, &model_file)?;
            return Ok(model_file);
        }
    }

    if !config.download {
        return Err(PiperError::ModelUnavailable(voice.to_string(), missing));
    }
    let name = name?;

    log::info!("Downloading voice model: {}", name);
    let unavailable = |e| PiperError::ModelUnavailable(name.identifier(), e);
    let json = remote(config, name.hf_config_path())
        .resolve()
        .map_err(unavailable)?;
    let onnx = remote(config, name.hf_model_path())
        .resolve()
        .map_err(unavailable)?;

    // The sidecar must sit next to the model for Piper to find it.
    install(&json, &config_file)?;
    install(&onnx, &model_file)?;
    log::info!("Downloaded to: {}", config.models_dir.display());
    Ok(model_file)
}

fn remote(config: &PiperConfig, path: String) -> ModelSource {
    let source =
        ModelSource::from_hf(PIPER_VOICES_REPO, path).with_cache_dir(config.models_dir.clone());
    match &config.revision {
        Some(revision) => source.with_revision(revision.clone()),
        None => source,
    }
}

/// Copy a hub file to `target`, publishing it only once complete.
fn install(from: &Path, target: &Path) -> Result<()> {
    let dir = target.parent().unwrap_or(Path::new("."));
    let io_err = |e, op: &str| PiperError::io_error(e, target.display().to_string(), op);

    std::fs::create_dir_all(dir).map_err(|e| io_err(e, "create models directory"))?;
    let mut source = std::fs::File::open(from)
        .map_err(|e| PiperError::io_error(e, from.display().to_string(), "open cached model"))?;
    let mut staged =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| io_err(e, "create temp file in"))?;
    std::io::copy(&mut source, staged.as_file_mut()).map_err(|e| io_err(e, "copy model to"))?;
    staged
        .persist(target)
        .map_err(|e| io_err(e.error, "persist model to"))?;
    Ok(())
}

impl TTSProvider for PiperTTS {
    fn provider_name(&self) -> &str {
        "piper"
    }
}

#[async_trait]
impl TTSSpeechProvider for PiperTTS {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        if !self.supports_format(request.format) {
            return Err(TTSError::UnsupportedFormat(
                request.format.to_string(),
                self.provider_name().to_string(),
            ));
        }
        if request.voice.name() != self.config.voice {
            return Err(TTSError::VoiceNotFound(
                request.voice.name().to_string(),
                self.config.voice.clone(),
            ));
        }

        let audio = self
            .synthesize(&request.text, &request.params)
            .await
            .map_err(TTSError::from)?;

        if audio.samples.is_empty() {
            return Err(TTSError::GenerationFailed(
                "piper produced no audio".to_string(),
                request.text.chars().count(),
                self.config.voice.clone(),
            ));
        }

        let duration_ms = audio.duration_ms();
        Ok(SpeechResponse {
            audio,
            text: request.text,
            duration_ms,
        })
    }
}

impl TTSModelsProvider for PiperTTS {
    fn get_current_model(&self) -> ModelInfo {
        let voice = &self.config.voice;
        let description = PredefinedVoice::all()
            .iter()
            .find(|v| v.identifier() == voice)
            .map(|v| v.description().to_string());
        let languages = VoiceModelName::parse(voice)
            .map(|name| vec![name.language().to_string()])
            .unwrap_or_default();

        ModelInfo {
            id: voice.clone(),
            name: voice.clone(),
            description,
            languages,
        }
    }
}
