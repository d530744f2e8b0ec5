use async_trait::async_trait;
use std::sync::Mutex;
use voiceover_speech::{
    AudioData, SpeechRequest, SpeechResponse, TTSError, TTSResult, TTSSpeechProvider,
};

/// In-memory provider that renders one short tone per request and fails on
/// chosen texts.
pub(crate) struct MockTTSProvider {
    fail_on: Vec<String>,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl MockTTSProvider {
    pub(crate) fn new() -> Self {
        Self {
            fail_on: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_on(mut self, text: &str) -> Self {
        self.fail_on.push(text.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    pub(crate) fn last_request(&self) -> Option<SpeechRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TTSSpeechProvider for MockTTSProvider {
    async fn generate_speech(&self, request: SpeechRequest) -> TTSResult<SpeechResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_on.contains(&request.text) {
            return Err(TTSError::GenerationFailed(
                "mock failure".to_string(),
                request.text.len(),
                request.voice.name().to_string(),
            ));
        }

        let audio = AudioData {
            samples: vec![0.25; 160],
            channels: 1,
            sample_rate: 16_000,
        };
        let duration_ms = audio.duration_ms();
        Ok(SpeechResponse {
            audio,
            text: request.text,
            duration_ms,
        })
    }
}
