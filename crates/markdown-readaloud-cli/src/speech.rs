use markdown_readaloud_config::SpeechConfig;
use markdown_readaloud_engine::{AudioClip, AudioFormat, SpeechEngine, SpeechError, SpeechOptions};
use reqwest::blocking::Client;
use serde::Serialize;

/// Speech synthesis through an OpenAI-compatible `/v1/audio/speech`
/// endpoint, such as a local Kokoro server.
pub struct HttpSpeechEngine {
    client: Client,
    endpoint: String,
    model: String,
    format: AudioFormat,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f32,
}

impl HttpSpeechEngine {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, format: AudioFormat) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            format,
            api_key: None,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let format = config.format.parse()?;
        Ok(Self::new(&config.endpoint, &config.model, format)
            .with_api_key(config.api_key.clone()))
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SpeechEngine for HttpSpeechEngine {
    fn generate(&mut self, text: &str, options: &SpeechOptions) -> Result<AudioClip, SpeechError> {
        let body = SpeechBody {
            model: &self.model,
            input: text,
            voice: &options.voice,
            response_format: self.format.as_str(),
            speed: options.speed,
        };
        log::debug!(
            "Synthesizing {} chars with model={} voice={}",
            text.len(),
            body.model,
            body.voice
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .map_err(|e| SpeechError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SpeechError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let data = response
            .bytes()
            .map_err(|e| SpeechError::Transport(e.to_string()))?;
        if data.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(AudioClip::new(data.to_vec(), self.format))
    }
}
