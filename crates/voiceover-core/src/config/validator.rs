use super::schema::{RawConfig, RawOutput, RawSegment, RawVoice};
use super::{Config, OutputSettings, SUPPORTED_FORMATS, Segment, VoiceSettings};
use crate::error::ConfigError;
use std::collections::HashSet;
use voiceover_speech::AudioFormat;

const MAX_ID_LEN: usize = 128;

pub fn validate_config(raw: RawConfig) -> Result<Config, ConfigError> {
    let voice = validate_voice(raw.voice)?;
    let output = validate_output(raw.output, &voice)?;
    let segments = validate_segments(raw.segments)?;

    Ok(Config {
        voice,
        output,
        segments,
    })
}

/// Id assigned to a segment that does not name one, by 1-based position
pub(crate) fn default_segment_id(position: usize) -> String {
    format!("segment_{position:03}")
}

fn validate_voice(raw: RawVoice) -> Result<VoiceSettings, ConfigError> {
    if raw.model.trim().is_empty() {
        return Err(ConfigError::invalid("voice.model", "must not be empty"));
    }

    let length_scale = non_negative("voice.length_scale", raw.length_scale)?;
    if length_scale == 0.0 {
        return Err(ConfigError::invalid(
            "voice.length_scale",
            "must be greater than zero",
        ));
    }

    Ok(VoiceSettings {
        model: raw.model,
        length_scale,
        noise_scale: non_negative("voice.noise_scale", raw.noise_scale)?,
        noise_w: non_negative("voice.noise_w", raw.noise_w)?,
        sentence_silence: non_negative("voice.sentence_silence", raw.sentence_silence)?,
    })
}

fn validate_output(raw: RawOutput, voice: &VoiceSettings) -> Result<OutputSettings, ConfigError> {
    let format: AudioFormat = raw.format.parse().map_err(|_| {
        ConfigError::invalid("output.format", format!("unknown format '{}'", raw.format))
    })?;
    if !SUPPORTED_FORMATS.contains(&format) {
        let supported: Vec<&str> = SUPPORTED_FORMATS.iter().map(|f| f.extension()).collect();
        return Err(ConfigError::invalid(
            "output.format",
            format!(
                "'{}' is not supported (supported: {})",
                format,
                supported.join(", ")
            ),
        ));
    }

    let combine_silence = match raw.combine_silence {
        Some(value) => non_negative("output.combine_silence", value)?,
        None => voice.sentence_silence,
    };

    Ok(OutputSettings {
        format,
        combine_silence,
    })
}

fn validate_segments(raw: Vec<RawSegment>) -> Result<Vec<Segment>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::invalid(
            "segments",
            "must contain at least one segment",
        ));
    }

    // Case-insensitive so ids stay distinct on case-folding filesystems.
    let mut seen = HashSet::new();

    raw.into_iter()
        .enumerate()
        .map(|(index, segment)| {
            let field = |name: &str| format!("segments[{index}].{name}");
            let id = segment
                .id
                .unwrap_or_else(|| default_segment_id(index + 1));

            check_file_name(&id).map_err(|reason| ConfigError::invalid(field("id"), reason))?;
            if !seen.insert(id.to_ascii_lowercase()) {
                return Err(ConfigError::invalid(
                    field("id"),
                    format!("duplicate id '{id}'"),
                ));
            }
            if segment.text.trim().is_empty() {
                return Err(ConfigError::invalid(field("text"), "must not be empty"));
            }

            Ok(Segment {
                id,
                text: segment.text,
            })
        })
        .collect()
}

/// A bare file name that stays inside its directory
pub fn check_file_name(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("must not be empty".to_string());
    }
    if id.len() > MAX_ID_LEN {
        return Err(format!("must be at most {MAX_ID_LEN} characters"));
    }
    if id.starts_with('.') {
        return Err(format!("'{id}' must not start with '.'"));
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(format!(
            "'{id}' contains '{bad}'; use letters, digits, '_', '-' or '.'"
        ));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}
