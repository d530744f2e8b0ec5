//! WAV encoding helpers shared by providers and callers that persist audio.

use crate::AudioData;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Errors that can occur while reading or writing WAV files.
#[derive(Debug, thiserror::Error)]
pub enum AudioFileError {
    #[error("WAV codec error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Unsupported WAV format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid audio data: {0}")]
    InvalidAudio(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AudioFileResult<T> = Result<T, AudioFileError>;

/// Read a WAV file into normalized samples without resampling.
pub fn read_wav(path: impl AsRef<Path>) -> AudioFileResult<AudioData> {
    let mut reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => match spec.bits_per_sample {
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()?,
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / i32::MAX as f32))
                .collect::<Result<_, _>>()?,
            bits => {
                return Err(AudioFileError::UnsupportedFormat(format!(
                    "unsupported bit depth: {bits}"
                )));
            }
        },
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
    };

    Ok(AudioData {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels as usize,
    })
}

/// Encode audio as 16-bit PCM WAV into any seekable writer.
pub fn write_wav<W: Write + Seek>(writer: W, audio: &AudioData) -> AudioFileResult<()> {
    let channels = u16::try_from(audio.channels)
        .ok()
        .filter(|c| *c > 0)
        .ok_or_else(|| {
            AudioFileError::InvalidAudio(format!("channel count {}", audio.channels))
        })?;
    if audio.sample_rate == 0 {
        return Err(AudioFileError::InvalidAudio("sample rate 0".to_string()));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut wav = hound::WavWriter::new(writer, spec)?;
    for &sample in &audio.samples {
        wav.write_sample(to_pcm16(sample))?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write audio to `path` by encoding into a temporary file in the same
/// directory and renaming it over the destination. Readers never observe a
/// partially written file, and a failed write leaves nothing behind.
pub fn write_wav_atomic(path: impl AsRef<Path>, audio: &AudioData) -> AudioFileResult<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    write_wav(BufWriter::new(temp.as_file_mut()), audio)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| AudioFileError::Io(e.error))?;
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(len: usize) -> AudioData {
        AudioData {
            samples: (0..len).map(|i| ((i % 20) as f32 - 10.0) / 10.0).collect(),
            channels: 1,
            sample_rate: 22_050,
        }
    }

    #[test]
    fn test_pcm16_clamps_out_of_range() {
        assert_eq!(to_pcm16(2.0), i16::MAX);
        assert_eq!(to_pcm16(-2.0), -i16::MAX);
        assert_eq!(to_pcm16(0.0), 0);
    }

    #[test]
    fn test_write_then_read_preserves_spec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let audio = tone(400);

        let file = std::fs::File::create(&path).unwrap();
        write_wav(BufWriter::new(file), &audio).unwrap();

        let decoded = read_wav(&path).unwrap();
        assert_eq!(decoded.sample_rate, 22_050);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.samples.len(), 400);
        for (a, b) in audio.samples.iter().zip(decoded.samples.iter()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_write_rejects_zero_channels() {
        let audio = AudioData {
            samples: vec![0.0; 4],
            channels: 0,
            sample_rate: 16_000,
        };
        let err = write_wav(std::io::Cursor::new(Vec::new()), &audio).unwrap_err();
        assert!(matches!(err, AudioFileError::InvalidAudio(_)));
    }

    #[test]
    fn test_atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segment.wav");
        std::fs::write(&path, b"stale").unwrap();

        write_wav_atomic(&path, &tone(100)).unwrap();

        let decoded = read_wav(&path).unwrap();
        assert_eq!(decoded.samples.len(), 100);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_wav(dir.path().join("nope.wav")).is_err());
    }
}
