//! Sarvam AI translate API backend.
//!
//! One POST per text, authenticated with an `api-subscription-key` header.

use super::{TranslationEngine, TranslationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Default public endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.sarvam.ai/translate";

/// Credential header expected by the API.
const API_KEY_HEADER: &str = "api-subscription-key";

/// Register of the translated output.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationMode {
    #[default]
    Formal,
    ModernColloquial,
    ClassicColloquial,
    CodeMixed,
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formal => write!(f, "formal"),
            Self::ModernColloquial => write!(f, "modern-colloquial"),
            Self::ClassicColloquial => write!(f, "classic-colloquial"),
            Self::CodeMixed => write!(f, "code-mixed"),
        }
    }
}

impl std::str::FromStr for TranslationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "modern-colloquial" => Ok(Self::ModernColloquial),
            "classic-colloquial" => Ok(Self::ClassicColloquial),
            "code-mixed" => Ok(Self::CodeMixed),
            _ => Err(format!("Unknown translation mode: {}", s)),
        }
    }
}

/// Translate request body.
#[derive(Debug, Serialize)]
struct SarvamRequest<'a> {
    input: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
    enable_preprocessing: bool,
    mode: TranslationMode,
}

/// Translate response body.
#[derive(Debug, Deserialize)]
struct SarvamResponse {
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    translated_text: Option<String>,
}

/// Configuration for the Sarvam backend.
#[derive(Debug, Clone)]
pub struct SarvamConfig {
    /// Translate endpoint URL
    pub endpoint: String,
    /// API key (resolved, not the keyring: reference); empty means unset
    pub api_key: String,
    /// Output register
    pub mode: TranslationMode,
    /// Let the API normalise input before translating
    pub enable_preprocessing: bool,
    /// Request timeout in seconds
    pub timeout_secs: u32,
}

impl Default for SarvamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            mode: TranslationMode::Formal,
            enable_preprocessing: true,
            timeout_secs: 30,
        }
    }
}

/// Sarvam translate API client.
pub struct SarvamTranslator {
    client: Client,
    config: SarvamConfig,
}

impl SarvamTranslator {
    /// Create a new translator.
    ///
    /// A missing API key is not an error here; every request will fail
    /// with [`TranslationError::MissingApiKey`] instead.
    pub fn new(config: SarvamConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }
}

#[async_trait]
impl TranslationEngine for SarvamTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslationError> {
        if !self.has_api_key() {
            return Err(TranslationError::MissingApiKey);
        }

        let request = SarvamRequest {
            input: text,
            source_language_code: from,
            target_language_code: to,
            enable_preprocessing: self.config.enable_preprocessing,
            mode: self.config.mode,
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Transport {
                endpoint: self.config.endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(TranslationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: SarvamResponse = serde_json::from_str(&body)
            .map_err(|e| TranslationError::InvalidResponse(format!("{} (body: {})", e, body)))?;

        let translated = match result.translated_text {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Err(TranslationError::InvalidResponse(format!(
                    "missing translated_text (body: {})",
                    body
                )))
            }
        };

        info!(
            "Sarvam translation took {}ms ({} -> {}, {} chars)",
            start.elapsed().as_millis(),
            from,
            to,
            text.chars().count()
        );
        debug!("Sarvam request id: {:?}", result.request_id);

        Ok(translated)
    }

    fn name(&self) -> &str {
        "sarvam"
    }
}
