//! Concatenate segment WAV files into a single file with silence gaps.

use crate::error::CombineError;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

fn wav_error(path: &Path) -> impl FnOnce(hound::Error) -> CombineError + '_ {
    move |source| CombineError::Wav {
        path: path.to_path_buf(),
        source,
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CombineError + '_ {
    move |source| CombineError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn describe(spec: &hound::WavSpec) -> String {
    let kind = match spec.sample_format {
        hound::SampleFormat::Int => "int",
        hound::SampleFormat::Float => "float",
    };
    format!(
        "{} Hz, {} ch, {}-bit {}",
        spec.sample_rate, spec.channels, spec.bits_per_sample, kind
    )
}

/// Number of silent frames inserted between two segments
pub fn silence_frames(silence_seconds: f64, sample_rate: u32) -> u64 {
    if silence_seconds <= 0.0 || !silence_seconds.is_finite() {
        return 0;
    }
    (silence_seconds * sample_rate as f64).round() as u64
}

/// Write the audio of `paths`, in order, to `output_path`, separated by
/// `silence_seconds` of silence. No silence is added before the first or
/// after the last file.
///
/// The encoding of the first file is used for the output; every other file
/// must match it exactly. The output is published atomically, so on error any
/// previous file at `output_path` is left untouched.
pub fn combine(
    paths: &[PathBuf],
    silence_seconds: f64,
    output_path: &Path,
) -> Result<(), CombineError> {
    let first = paths.first().ok_or(CombineError::Empty)?;
    if paths.iter().any(|p| same_file(p, output_path)) {
        return Err(CombineError::WouldOverwrite(output_path.to_path_buf()));
    }

    let spec = hound::WavReader::open(first)
        .map_err(wav_error(first))?
        .spec();
    let gap = silence_frames(silence_seconds, spec.sample_rate) * spec.channels as u64;

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(io_error(parent))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(io_error(parent))?;
    {
        let mut writer = hound::WavWriter::new(BufWriter::new(temp.as_file_mut()), spec)
            .map_err(wav_error(output_path))?;

        for (index, path) in paths.iter().enumerate() {
            if index > 0 {
                write_silence(&mut writer, &spec, gap).map_err(wav_error(output_path))?;
            }
            append(&mut writer, &spec, path)?;
            log::debug!("Appended {}", path.display());
        }

        writer.finalize().map_err(wav_error(output_path))?;
    }
    temp.as_file().sync_all().map_err(io_error(output_path))?;
    temp.persist(output_path)
        .map_err(|e| io_error(output_path)(e.error))?;

    Ok(())
}

fn append<W>(
    writer: &mut hound::WavWriter<W>,
    spec: &hound::WavSpec,
    path: &Path,
) -> Result<(), CombineError>
where
    W: std::io::Write + std::io::Seek,
{
    let mut reader = hound::WavReader::open(path).map_err(wav_error(path))?;
    let found = reader.spec();
    if found != *spec {
        return Err(CombineError::FormatMismatch {
            path: path.to_path_buf(),
            expected: describe(spec),
            found: describe(&found),
        });
    }

    match spec.sample_format {
        hound::SampleFormat::Int => {
            for sample in reader.samples::<i32>() {
                let sample = sample.map_err(wav_error(path))?;
                writer.write_sample(sample).map_err(wav_error(path))?;
            }
        }
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                let sample = sample.map_err(wav_error(path))?;
                writer.write_sample(sample).map_err(wav_error(path))?;
            }
        }
    }
    Ok(())
}

fn write_silence<W>(
    writer: &mut hound::WavWriter<W>,
    spec: &hound::WavSpec,
    samples: u64,
) -> hound::Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    for _ in 0..samples {
        match spec.sample_format {
            hound::SampleFormat::Int => writer.write_sample(0i32)?,
            hound::SampleFormat::Float => writer.write_sample(0.0f32)?,
        }
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(sample_rate: u32, channels: u16) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn write(path: &Path, spec: hound::WavSpec, samples: &[i16]) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn read(path: &Path) -> (hound::WavSpec, Vec<i16>) {
        let mut reader = hound::WavReader::open(path).unwrap();
        let spec = reader.spec();
        let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        (spec, samples)
    }

    #[test]
    fn test_silence_frames() {
        assert_eq!(silence_frames(0.5, 22_050), 11_025);
        assert_eq!(silence_frames(0.0, 22_050), 0);
        assert_eq!(silence_frames(-1.0, 22_050), 0);
        assert_eq!(silence_frames(0.1, 10), 1);
    }

    #[test]
    fn test_concatenates_with_silence_between() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        let c = dir.path().join("c.wav");
        write(&a, spec(10, 1), &[1, 2, 3]);
        write(&b, spec(10, 1), &[4, 5]);
        write(&c, spec(10, 1), &[6]);

        let out = dir.path().join("combined.wav");
        combine(&[a, b, c], 0.2, &out).unwrap();

        let (out_spec, samples) = read(&out);
        assert_eq!(out_spec, spec(10, 1));
        assert_eq!(samples, vec![1, 2, 3, 0, 0, 4, 5, 0, 0, 6]);
    }

    #[test]
    fn test_stereo_silence_covers_all_channels() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        write(&a, spec(10, 2), &[1, -1]);
        write(&b, spec(10, 2), &[2, -2]);

        let out = dir.path().join("combined.wav");
        combine(&[a, b], 0.1, &out).unwrap();

        let (_, samples) = read(&out);
        assert_eq!(samples, vec![1, -1, 0, 0, 2, -2]);
    }

    #[test]
    fn test_single_file_has_no_padding() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        write(&a, spec(10, 1), &[7, 8]);

        let out = dir.path().join("combined.wav");
        combine(&[a], 5.0, &out).unwrap();

        assert_eq!(read(&out).1, vec![7, 8]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("combined.wav");
        assert!(matches!(combine(&[], 0.5, &out), Err(CombineError::Empty)));
        assert!(!out.exists());
    }

    #[test]
    fn test_format_mismatch_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        write(&a, spec(22_050, 1), &[1]);
        write(&b, spec(16_000, 1), &[2]);

        let out = dir.path().join("combined.wav");
        let err = combine(&[a, b.clone()], 0.5, &out).unwrap_err();

        match err {
            CombineError::FormatMismatch { path, .. } => assert_eq!(path, b),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!out.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        write(&a, spec(10, 1), &[1]);

        let err = combine(&[a.clone()], 0.5, &a).unwrap_err();
        assert!(matches!(err, CombineError::WouldOverwrite(_)));
        assert_eq!(read(&a).1, vec![1]);
    }

    #[test]
    fn test_missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        let out = dir.path().join("combined.wav");

        let err = combine(&[missing.clone()], 0.5, &out).unwrap_err();
        match err {
            CombineError::Wav { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
