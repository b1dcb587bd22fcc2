//! Language switching for the displayed conversation.

use super::Conversation;
use crate::session::TranslationSession;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Emitted once the new language is committed, before retranslation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChange {
    pub previous: String,
    pub current: String,
    /// Monotonic stamp of the switch that produced this change
    pub generation: u64,
}

/// Callback run synchronously on every committed language change.
pub type LanguageListener = Box<dyn Fn(&LanguageChange) + Send + Sync>;

/// Result of [`LanguageSwitchController::select_language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Displayed messages were replaced with their translations
    Applied { updated: usize },
    /// No messages to translate
    NothingToTranslate,
    /// Batch failed; displayed text left as it was
    Failed,
    /// A newer switch started meanwhile; results discarded
    Superseded,
}

/// Commits language changes and retranslates the displayed conversation.
pub struct LanguageSwitchController {
    session: Arc<TranslationSession>,
    conversation: Arc<RwLock<Conversation>>,
    generation: AtomicU64,
    listeners: Vec<LanguageListener>,
}

impl LanguageSwitchController {
    pub fn new(session: Arc<TranslationSession>, conversation: Arc<RwLock<Conversation>>) -> Self {
        Self {
            session,
            conversation,
            generation: AtomicU64::new(0),
            listeners: Vec::new(),
        }
    }

    /// Register a callback for committed language changes.
    pub fn on_language_changed<F>(&mut self, listener: F)
    where
        F: Fn(&LanguageChange) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn session(&self) -> &Arc<TranslationSession> {
        &self.session
    }

    /// Switch to `code` and retranslate every displayed message.
    ///
    /// Messages are translated from their source text in one batch. Either
    /// all of them are updated or none are. Only `text` changes. The session
    /// reports translating for the whole call and stops when it returns,
    /// whatever the outcome. If another switch starts before this one
    /// finishes, the later one wins.
    pub async fn select_language(&self, code: &str) -> SwitchOutcome {
        let _guard = self.session.begin_translating();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let previous = self.session.set_language(code).await;
        let change = LanguageChange {
            previous,
            current: code.to_string(),
            generation,
        };
        for listener in &self.listeners {
            listener(&change);
        }

        let (ids, sources) = self.conversation.read().await.sources();
        if ids.is_empty() {
            return SwitchOutcome::NothingToTranslate;
        }

        let translated = match self.session.try_batch_translate(&sources).await {
            Ok(translated) => translated,
            Err(e) => {
                error!("Language switch to {} failed, keeping displayed text: {}", code, e);
                return SwitchOutcome::Failed;
            }
        };
        debug_assert_eq!(translated.len(), ids.len());

        let mut conversation = self.conversation.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale translation for '{}' (generation {})", code, generation);
            return SwitchOutcome::Superseded;
        }

        let updated = conversation.apply_translations(ids.into_iter().zip(translated));
        info!("Retranslated {} messages into {}", updated, code);
        SwitchOutcome::Applied { updated }
    }
}
