//! Per-session translation memo.

use std::collections::HashMap;
use std::fmt;

/// Identifies one translation result: original text plus target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub language: String,
}

impl CacheKey {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.text, self.language)
    }
}

/// Lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Translated text keyed by (text, language).
///
/// Entries never expire; [`TranslationCache::clear`] drops them all.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, String>,
    hits: usize,
    misses: usize,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a translation, counting the hit or miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        if let Some(value) = self.entries.get(key) {
            self.hits += 1;
            Some(value.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store a translation, replacing any previous value for the key.
    pub fn insert(&mut self, key: CacheKey, translated: String) {
        self.entries.insert(key, translated);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(CacheKey::new("Hello", "hi").to_string(), "Hello_hi");
    }

    #[test]
    fn test_keys_do_not_collide_on_separator() {
        let mut cache = TranslationCache::new();
        cache.insert(CacheKey::new("a_b", "c"), "one".into());
        cache.insert(CacheKey::new("a", "b_c"), "two".into());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&CacheKey::new("a_b", "c")).as_deref(), Some("one"));
    }

    #[test]
    fn test_get_counts_hits_and_misses() {
        let mut cache = TranslationCache::new();
        let key = CacheKey::new("Hello", "hi");
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), "नमस्ते".into());
        assert_eq!(cache.get(&key).as_deref(), Some("नमस्ते"));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_same_text_per_language() {
        let mut cache = TranslationCache::new();
        cache.insert(CacheKey::new("Hello", "hi"), "नमस्ते".into());
        cache.insert(CacheKey::new("Hello", "ta"), "வணக்கம்".into());
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&CacheKey::new("Hello", "ta")));
    }

    #[test]
    fn test_clear() {
        let mut cache = TranslationCache::new();
        cache.insert(CacheKey::new("Bye", "hi"), "अलविदा".into());
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&CacheKey::new("Bye", "hi")));
    }
}
