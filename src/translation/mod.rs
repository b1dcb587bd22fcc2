//! Translation of chat content into Indic languages.
//!
//! Layers, leaf first:
//! - [`language`]: short UI code to API locale mapping
//! - [`TranslationEngine`]: a fallible backend (the Sarvam HTTP API in production)
//! - [`TranslationClient`]: single-text translation that never fails, degrading
//!   to the original text
//! - [`TranslationCache`]: per-session memo of (text, language) results

mod cache;
pub mod language;
mod sarvam;

pub use cache::{CacheKey, CacheStats, TranslationCache};
pub use language::{map_language_code, LanguageOption, LANGUAGES, SOURCE_LANGUAGE};
pub use sarvam::{SarvamConfig, SarvamTranslator, TranslationMode, DEFAULT_ENDPOINT};

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Translation-related errors.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Translation API key is not set")]
    MissingApiKey,

    #[error("No response from {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Batch translation failed: {0}")]
    Batch(String),
}

impl TranslationError {
    /// Short failure class used in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "configuration",
            Self::Transport { .. } => "transport",
            Self::Api { .. } | Self::InvalidResponse(_) => "protocol",
            Self::Batch(_) => "batch",
        }
    }
}

/// A translation backend.
///
/// Implementations report every failure as an error; fallback to the
/// original text happens in [`TranslationClient`].
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate text between two locale codes (e.g., "en-IN" -> "hi-IN").
    async fn translate(&self, text: &str, from: &str, to: &str)
        -> Result<String, TranslationError>;

    /// Get the name of the translation engine.
    fn name(&self) -> &str;
}

/// Translates single texts, returning the input unchanged on any failure.
#[derive(Clone)]
pub struct TranslationClient {
    engine: Arc<dyn TranslationEngine>,
}

impl TranslationClient {
    /// Create a client over the given backend.
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self { engine }
    }

    /// Get the name of the backend.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Translate one text between locale codes.
    ///
    /// Identical locales and blank text are returned without a request.
    /// A failed request is logged and yields the original text.
    pub async fn translate_one(&self, text: &str, source: &str, target: &str) -> String {
        match self.try_translate_one(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                self.report_failure(&e, source, target);
                text.to_string()
            }
        }
    }

    /// Like [`translate_one`](Self::translate_one) but hands the failure back.
    ///
    /// Used by callers that must not cache a fallback as a translation.
    pub async fn try_translate_one(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if source == target || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let translated = self.engine.translate(text, source, target).await?;
        debug!("Translated ({} -> {}): '{}' -> '{}'", source, target, text, translated);
        Ok(translated)
    }

    pub(crate) fn report_failure(&self, err: &TranslationError, source: &str, target: &str) {
        error!(
            category = err.category(),
            engine = self.engine.name(),
            "Translation {} -> {} failed, keeping original text: {}",
            source,
            target,
            err
        );
    }
}
