//! Translation session: active language, cache and in-flight state.
//!
//! A session lives as long as one chat window. All translation of chat
//! content goes through it so that each distinct (text, language) pair is
//! requested from the API at most once.

use crate::translation::language::{is_source_language, map_language_code, SOURCE_LANGUAGE};
use crate::translation::{CacheKey, CacheStats, TranslationCache, TranslationClient, TranslationError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Concurrent requests per batch chunk.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Marks translation work as in flight until dropped.
#[must_use = "translation is only marked in flight while the guard is alive"]
pub struct TranslatingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for TranslatingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Per-chat translation state.
pub struct TranslationSession {
    client: TranslationClient,
    cache: Arc<RwLock<TranslationCache>>,
    language: RwLock<String>,
    dynamic: RwLock<HashMap<String, String>>,
    in_flight: Arc<AtomicUsize>,
    batch_size: usize,
}

impl TranslationSession {
    /// Create a session starting in the source language.
    pub fn new(client: TranslationClient) -> Self {
        Self {
            client,
            cache: Arc::new(RwLock::new(TranslationCache::new())),
            language: RwLock::new(SOURCE_LANGUAGE.to_string()),
            dynamic: RwLock::new(HashMap::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Limit concurrent requests per batch chunk (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn client(&self) -> &TranslationClient {
        &self.client
    }

    /// Short code of the language text is currently translated to.
    pub async fn current_language(&self) -> String {
        self.language.read().await.clone()
    }

    /// Switch the target language, returning the previous one.
    ///
    /// Switching to the source language empties the cache. Any change of
    /// language drops dynamic UI strings.
    pub async fn set_language(&self, code: &str) -> String {
        let mut language = self.language.write().await;
        let previous = std::mem::replace(&mut *language, code.to_string());

        if is_source_language(code) {
            let mut cache = self.cache.write().await;
            debug!("Clearing {} cached translations", cache.len());
            cache.clear();
        }
        if previous != code {
            self.dynamic.write().await.clear();
            info!("Language changed: {} -> {}", previous, code);
        }

        previous
    }

    /// True while any translation request chain is in flight.
    pub fn is_translating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Mark translation work as in flight for the guard's lifetime.
    pub fn begin_translating(&self) -> TranslatingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        TranslatingGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Translate one text into the current language, consulting the cache.
    ///
    /// With `force_update` the cached value is ignored but still replaced
    /// by the fresh result. Failed requests yield the original text and are
    /// not cached.
    pub async fn translate_and_cache(&self, text: &str, force_update: bool) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let language = self.current_language().await;
        if is_source_language(&language) {
            return text.to_string();
        }

        let key = CacheKey::new(text, &language);
        if !force_update {
            if let Some(hit) = self.cache.write().await.get(&key) {
                debug!("Cache hit: {}", key);
                return hit;
            }
        }

        let _guard = self.begin_translating();
        let source = map_language_code(SOURCE_LANGUAGE);
        let target = map_language_code(&language);
        match self.client.try_translate_one(text, source, target).await {
            Ok(translated) => {
                self.store(key, translated.clone()).await;
                translated
            }
            Err(e) => {
                self.client.report_failure(&e, source, target);
                text.to_string()
            }
        }
    }

    /// Translate texts into the current language, preserving order and length.
    ///
    /// Never fails: if the batch as a whole breaks down, the input is
    /// returned unchanged.
    pub async fn batch_translate(&self, texts: &[String]) -> Vec<String> {
        match self.try_batch_translate(texts).await {
            Ok(translated) => translated,
            Err(e) => {
                error!("{}; returning {} texts untranslated", e, texts.len());
                texts.to_vec()
            }
        }
    }

    /// Batch translation that reports whole-batch failures.
    ///
    /// Blank and cached texts are answered locally. Distinct uncached texts
    /// are requested concurrently, `batch_size` at a time. A single failed
    /// request degrades only its own items to the original text; a panicked
    /// or cancelled request fails the whole batch.
    pub async fn try_batch_translate(
        &self,
        texts: &[String],
    ) -> Result<Vec<String>, TranslationError> {
        let language = self.current_language().await;
        if is_source_language(&language) || texts.is_empty() {
            return Ok(texts.to_vec());
        }

        let _guard = self.begin_translating();
        let mut results: Vec<Option<String>> = vec![None; texts.len()];
        // Distinct uncached texts, first occurrence order, with their positions
        let mut pending: Vec<(String, Vec<usize>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        {
            let mut cache = self.cache.write().await;
            for (i, text) in texts.iter().enumerate() {
                if text.trim().is_empty() {
                    results[i] = Some(text.clone());
                } else if let Some(&slot) = positions.get(text.as_str()) {
                    pending[slot].1.push(i);
                } else if let Some(hit) = cache.get(&CacheKey::new(text, &language)) {
                    results[i] = Some(hit);
                } else {
                    positions.insert(text.as_str(), pending.len());
                    pending.push((text.clone(), vec![i]));
                }
            }
        }

        debug!(
            "Batch of {} texts: {} to request ({} per chunk)",
            texts.len(),
            pending.len(),
            self.batch_size
        );

        let source = map_language_code(SOURCE_LANGUAGE);
        let target = map_language_code(&language);

        for chunk in pending.chunks(self.batch_size) {
            let mut tasks = JoinSet::new();
            for (slot, (text, _)) in chunk.iter().enumerate() {
                let client = self.client.clone();
                let text = text.clone();
                tasks.spawn(async move {
                    let result = client.try_translate_one(&text, source, target).await;
                    (slot, result)
                });
            }

            let mut fresh = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                let (slot, result) = joined.map_err(|e| TranslationError::Batch(e.to_string()))?;
                let (text, indices) = &chunk[slot];
                let value = match result {
                    Ok(translated) => {
                        fresh.push((CacheKey::new(text, &language), translated.clone()));
                        translated
                    }
                    Err(e) => {
                        self.client.report_failure(&e, source, target);
                        text.clone()
                    }
                };
                for &i in indices {
                    results[i] = Some(value.clone());
                }
            }

            for (key, translated) in fresh {
                self.store(key, translated).await;
            }
        }

        results
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.ok_or_else(|| TranslationError::Batch(format!("no result for item {}", i))))
            .collect()
    }

    /// Translate UI strings that have no static catalog entry.
    ///
    /// `texts` maps a lookup key to its English text. Results are served by
    /// [`dynamic_translation`](Self::dynamic_translation) until the language
    /// changes.
    pub async fn add_dynamic_translations(&self, texts: &[(String, String)]) {
        let language = self.current_language().await;
        if is_source_language(&language) || texts.is_empty() {
            return;
        }

        let originals: Vec<String> = texts.iter().map(|(_, text)| text.clone()).collect();
        let translated = self.batch_translate(&originals).await;

        if self.current_language().await != language {
            debug!("Language changed during dynamic translation, discarding results");
            return;
        }

        let mut dynamic = self.dynamic.write().await;
        for ((key, _), value) in texts.iter().zip(translated) {
            dynamic.insert(key.clone(), value);
        }
    }

    /// Dynamic translation for a UI key, if one was added for the current language.
    pub async fn dynamic_translation(&self, key: &str) -> Option<String> {
        self.dynamic.read().await.get(key).cloned()
    }

    /// Cache a result unless the session has moved on to another language.
    async fn store(&self, key: CacheKey, translated: String) {
        let language = self.language.read().await;
        if *language != key.language {
            debug!("Discarding result for {} (language is now {})", key, language);
            return;
        }
        self.cache.write().await.insert(key, translated);
    }

    #[cfg(test)]
    pub(crate) async fn prime_cache(&self, text: &str, language: &str, translated: &str) {
        self.cache
            .write()
            .await
            .insert(CacheKey::new(text, language), translated.to_string());
    }
}
