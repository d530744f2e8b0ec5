//! Voice catalog and voice-name parsing for Piper

use super::error::{PiperError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HuggingFace repository hosting the published Piper voices
pub const PIPER_VOICES_REPO: &str = "rhasspy/piper-voices";

/// Voice used when a config or caller does not name one
pub const DEFAULT_VOICE: &str = "en_US-hfc_male-medium";

/// A Piper voice name split into its `{locale}-{name}-{quality}` parts.
///
/// Piper voices are published under
/// `{family}/{locale}/{name}/{quality}/{locale}-{name}-{quality}.onnx`
/// along with an `.onnx.json` sidecar holding the sample rate and phoneme map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoiceModelName {
    locale: String,
    name: String,
    quality: String,
}

impl VoiceModelName {
    pub fn parse(voice: &str) -> Result<Self> {
        let invalid = || PiperError::invalid_voice(voice);

        let (locale, rest) = voice.split_once('-').ok_or_else(invalid)?;
        let (name, quality) = rest.rsplit_once('-').ok_or_else(invalid)?;

        let valid_part = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };
        if !valid_part(locale) || !valid_part(name) || !valid_part(quality) {
            return Err(invalid());
        }
        if !locale.contains('_') || locale.contains('-') {
            return Err(invalid());
        }

        Ok(Self {
            locale: locale.to_string(),
            name: name.to_string(),
            quality: quality.to_string(),
        })
    }

    /// Full identifier, e.g. `en_US-lessac-medium`
    pub fn identifier(&self) -> String {
        format!("{}-{}-{}", self.locale, self.name, self.quality)
    }

    /// Locale such as `en_US`
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Language family such as `en`
    pub fn language(&self) -> &str {
        self.locale
            .split_once('_')
            .map(|(family, _)| family)
            .unwrap_or(&self.locale)
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    pub fn model_file_name(&self) -> String {
        format!("{}.onnx", self.identifier())
    }

    pub fn config_file_name(&self) -> String {
        format!("{}.onnx.json", self.identifier())
    }

    /// Path of the `.onnx` file inside the voices repository
    pub fn hf_model_path(&self) -> String {
        format!("{}/{}", self.hf_directory(), self.model_file_name())
    }

    /// Path of the `.onnx.json` file inside the voices repository
    pub fn hf_config_path(&self) -> String {
        format!("{}/{}", self.hf_directory(), self.config_file_name())
    }

    fn hf_directory(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.language(),
            self.locale,
            self.name,
            self.quality
        )
    }
}

impl fmt::Display for VoiceModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Well-known Piper voices listed by `--voices`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredefinedVoice {
    HfcMale,
    HfcFemale,
    Lessac,
    LessacHigh,
    Amy,
    Ryan,
    Alan,
    JennyDioco,
    Thorsten,
    Siwis,
    Davefx,
}

impl PredefinedVoice {
    /// Get the Piper voice identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            PredefinedVoice::HfcMale => "en_US-hfc_male-medium",
            PredefinedVoice::HfcFemale => "en_US-hfc_female-medium",
            PredefinedVoice::Lessac => "en_US-lessac-medium",
            PredefinedVoice::LessacHigh => "en_US-lessac-high",
            PredefinedVoice::Amy => "en_US-amy-medium",
            PredefinedVoice::Ryan => "en_US-ryan-high",
            PredefinedVoice::Alan => "en_GB-alan-medium",
            PredefinedVoice::JennyDioco => "en_GB-jenny_dioco-medium",
            PredefinedVoice::Thorsten => "de_DE-thorsten-medium",
            PredefinedVoice::Siwis => "fr_FR-siwis-medium",
            PredefinedVoice::Davefx => "es_ES-davefx-medium",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            PredefinedVoice::HfcMale => "US English, male (default)",
            PredefinedVoice::HfcFemale => "US English, female",
            PredefinedVoice::Lessac => "US English, female, expressive",
            PredefinedVoice::LessacHigh => "US English, female, high quality",
            PredefinedVoice::Amy => "US English, female",
            PredefinedVoice::Ryan => "US English, male, high quality",
            PredefinedVoice::Alan => "British English, male",
            PredefinedVoice::JennyDioco => "British English, female",
            PredefinedVoice::Thorsten => "German, male",
            PredefinedVoice::Siwis => "French, female",
            PredefinedVoice::Davefx => "Spanish, male",
        }
    }

    /// Get all catalog voices
    pub fn all() -> &'static [PredefinedVoice] {
        &[
            PredefinedVoice::HfcMale,
            PredefinedVoice::HfcFemale,
            PredefinedVoice::Lessac,
            PredefinedVoice::LessacHigh,
            PredefinedVoice::Amy,
            PredefinedVoice::Ryan,
            PredefinedVoice::Alan,
            PredefinedVoice::JennyDioco,
            PredefinedVoice::Thorsten,
            PredefinedVoice::Siwis,
            PredefinedVoice::Davefx,
        ]
    }
}

impl Default for PredefinedVoice {
    fn default() -> Self {
        PredefinedVoice::HfcMale
    }
}

impl fmt::Display for PredefinedVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl std::str::FromStr for PredefinedVoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PredefinedVoice::all()
            .iter()
            .copied()
            .find(|v| v.identifier().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown predefined voice: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice_name() {
        let voice = VoiceModelName::parse("en_GB-jenny_dioco-medium").unwrap();
        assert_eq!(voice.locale(), "en_GB");
        assert_eq!(voice.language(), "en");
        assert_eq!(voice.quality(), "medium");
        assert_eq!(voice.identifier(), "en_GB-jenny_dioco-medium");
    }

    #[test]
    fn test_hf_paths() {
        let voice = VoiceModelName::parse(DEFAULT_VOICE).unwrap();
        assert_eq!(
            voice.hf_model_path(),
            "en/en_US/hfc_male/medium/en_US-hfc_male-medium.onnx"
        );
        assert_eq!(
            voice.hf_config_path(),
            "en/en_US/hfc_male/medium/en_US-hfc_male-medium.onnx.json"
        );
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["", "amy", "en_US-amy", "en-amy-medium", "en_US--medium", "../x-y-z"] {
            assert!(VoiceModelName::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_catalog_entries_parse() {
        for voice in PredefinedVoice::all() {
            assert!(VoiceModelName::parse(voice.identifier()).is_ok());
        }
        assert_eq!(PredefinedVoice::default().identifier(), DEFAULT_VOICE);
    }

    #[test]
    fn test_predefined_voice_from_str() {
        assert_eq!(
            "EN_US-AMY-MEDIUM".parse::<PredefinedVoice>().unwrap(),
            PredefinedVoice::Amy
        );
        assert!("xx_XX-nobody-low".parse::<PredefinedVoice>().is_err());
    }
}
