use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use voiceover_core::{CombineOutcome, Config, GenerateOptions, run};
use voiceover_speech::{
    AudioData, SpeechRequest, SpeechResponse, TTSError, TTSResult, TTSSpeechProvider,
};

const SAMPLE_RATE: u32 = 100;

/// Renders each text as a few samples at a level set by its length so the files can
/// be told apart after combining.
struct LevelProvider {
    fail_on: &'static [&'static str],
    calls: AtomicUsize,
}

impl LevelProvider {
    fn new(fail_on: &'static [&'static str]) -> Self {
        Self {
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TTSSpeechProvider for LevelProvider {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&request.text.as_str()) {
            return Err(TTSError::ProviderError(
                format!("cannot say '{}'", request.text),
                "level".to_string(),
            ));
        }

        let level = request.text.len() as f32 / 10.0;
        let audio = AudioData {
            samples: vec![level; 4],
            channels: 1,
            sample_rate: SAMPLE_RATE,
        };
        Ok(SpeechResponse {
            duration_ms: audio.duration_ms(),
            audio,
            text: request.text,
        })
    }
}

fn read_samples(path: &Path) -> Vec<i16> {
    hound::WavReader::open(path)
        .unwrap()
        .samples::<i16>()
        .map(|s| s.unwrap())
        .collect()
}

fn options(dir: &Path, combine: bool) -> GenerateOptions {
    let _ = env_logger::builder().is_test(true).try_init();
    GenerateOptions::default()
        .with_output_dir(dir.join("output"))
        .with_models_dir(dir.join("models"))
        .with_combine(combine)
}

fn three_segments(silence: f64) -> Config {
    Config::parse(&format!(
        r#"{{
            "output": {{"combine_silence": {silence}}},
            "segments": [
                {{"id": "01", "text": "a"}},
                {{"id": "02", "text": "bb"}},
                {{"id": "03", "text": "ccc"}}
            ]
        }}"#
    ))
    .unwrap()
}

#[tokio::test]
async fn test_one_result_per_segment_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LevelProvider::new(&[]);
    let options = options(dir.path(), false);

    let report = run(&three_segments(0.0), &provider, &options).await;

    let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["01", "02", "03"]);
    assert_eq!(provider.calls(), 3);
    assert!(report.is_success());
    for id in ["01", "02", "03"] {
        assert!(options.output_dir.join(format!("{id}.wav")).is_file());
    }
}

#[tokio::test]
async fn test_partial_failure_combines_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LevelProvider::new(&["bb"]);
    let options = options(dir.path(), true);

    let report = run(&three_segments(0.02), &provider, &options).await;

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.results[1].error.as_deref().unwrap().contains("cannot say"));
    assert!(report.is_success());

    let combined = report.combined_path().unwrap();
    assert_eq!(combined, options.combined_path().unwrap());

    let first = read_samples(&options.output_dir.join("01.wav"));
    let third = read_samples(&options.output_dir.join("03.wav"));
    let mut expected = first.clone();
    expected.extend([0, 0]);
    expected.extend(third.iter().copied());
    assert_eq!(read_samples(combined), expected);
}

#[tokio::test]
async fn test_all_failures_skip_combine() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LevelProvider::new(&["a", "bb", "ccc"]);
    let options = options(dir.path(), true);

    let report = run(&three_segments(0.5), &provider, &options).await;

    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.combine, CombineOutcome::Skipped);
    assert!(!report.is_success());
    assert!(!options.combined_path().unwrap().exists());
}

#[tokio::test]
async fn test_rerun_overwrites_same_files() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LevelProvider::new(&[]);
    let options = options(dir.path(), true);
    let config = three_segments(0.1);

    let first = run(&config, &provider, &options).await;
    let before = read_samples(first.combined_path().unwrap());
    let second = run(&config, &provider, &options).await;

    assert_eq!(
        first.generated_paths(),
        second.generated_paths(),
        "file names depend only on segment ids"
    );
    assert_eq!(read_samples(second.combined_path().unwrap()), before);

    let mut names: Vec<String> = std::fs::read_dir(&options.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["01.wav", "02.wav", "03.wav", "combined_voiceover.wav"]
    );
}

#[tokio::test]
async fn test_invalid_config_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voiceover.json");
    std::fs::write(
        &path,
        r#"{"voice": {"sentence_silence": -1}, "segments": [{"id": "01", "text": "Hi"}]}"#,
    )
    .unwrap();

    assert!(Config::load(&path).is_err());
    let options = options(dir.path(), true);
    assert!(!voiceover_core::generate_voiceover(&path, &options).await);
    assert!(!options.output_dir.exists());
}

#[tokio::test]
async fn test_text_lines_become_numbered_segments() {
    let dir = tempfile::tempdir().unwrap();
    let provider = LevelProvider::new(&[]);
    let options = options(dir.path(), false);
    let config = Config::from_lines("Hello\n\nWorld\n".lines(), "en_US-amy-medium").unwrap();

    let report = run(&config, &provider, &options).await;

    assert_eq!(provider.calls(), 2);
    assert!(options.output_dir.join("segment_001.wav").is_file());
    assert!(options.output_dir.join("segment_002.wav").is_file());
    assert!(report.is_success());
}
