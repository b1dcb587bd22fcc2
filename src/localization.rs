//! UI string lookup.
//!
//! Keys resolve, in order, to the static entry for the active language, a
//! dynamic translation fetched through the session, the English entry, and
//! finally the key itself.

use crate::session::TranslationSession;
use crate::translation::SOURCE_LANGUAGE;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const BUNDLED_CATALOG: &str = include_str!("../locales/catalog.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Catalog has no '{0}' section")]
    MissingSourceLanguage(&'static str),
}

/// Static strings per language: language -> key -> text.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    languages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Parse a TOML catalog with one table per language.
    pub fn from_toml(contents: &str) -> Result<Self, CatalogError> {
        let languages: HashMap<String, HashMap<String, String>> = toml::from_str(contents)?;
        if !languages.contains_key(SOURCE_LANGUAGE) {
            return Err(CatalogError::MissingSourceLanguage(SOURCE_LANGUAGE));
        }
        Ok(Self { languages })
    }

    /// The catalog shipped with the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_toml(BUNDLED_CATALOG)
    }

    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// English entries with no static counterpart in `language`.
    pub fn missing(&self, language: &str) -> Vec<(String, String)> {
        let Some(source) = self.languages.get(SOURCE_LANGUAGE) else {
            return Vec::new();
        };
        let mut missing: Vec<(String, String)> = source
            .iter()
            .filter(|(key, _)| self.lookup(language, key).is_none())
            .map(|(key, text)| (key.clone(), text.clone()))
            .collect();
        missing.sort();
        missing
    }
}

/// Resolves UI keys for the session's active language.
pub struct Localizer {
    catalog: Catalog,
    session: Arc<TranslationSession>,
}

impl Localizer {
    pub fn new(catalog: Catalog, session: Arc<TranslationSession>) -> Self {
        Self { catalog, session }
    }

    /// Look up a UI string.
    pub async fn t(&self, key: &str) -> String {
        let language = self.session.current_language().await;
        if let Some(text) = self.catalog.lookup(&language, key) {
            return text.to_string();
        }
        if let Some(text) = self.session.dynamic_translation(key).await {
            return text;
        }
        self.catalog
            .lookup(SOURCE_LANGUAGE, key)
            .unwrap_or(key)
            .to_string()
    }

    /// Fetch dynamic translations for keys the active language lacks.
    pub async fn translate_missing(&self) {
        let language = self.session.current_language().await;
        let missing = self.catalog.missing(&language);
        if missing.is_empty() {
            return;
        }
        debug!("Translating {} UI strings missing for {}", missing.len(), language);
        self.session.add_dynamic_translations(&missing).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::testing::FakeEngine;
    use crate::translation::TranslationClient;

    fn localizer(engine: FakeEngine) -> (Localizer, Arc<FakeEngine>) {
        let engine = Arc::new(engine);
        let session = Arc::new(TranslationSession::new(TranslationClient::new(engine.clone())));
        (Localizer::new(Catalog::bundled().unwrap(), session), engine)
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.lookup("en", "chat.new"), Some("New chat"));
        assert_eq!(catalog.lookup("hi", "language.select"), Some("भाषा चुनें"));
        assert!(catalog.lookup("hi", "chat.new").is_none());
        assert!(catalog.lookup("xx", "chat.new").is_none());
    }

    #[test]
    fn test_catalog_requires_english() {
        let err = Catalog::from_toml("[hi]\n\"a\" = \"b\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingSourceLanguage("en")));
        assert!(Catalog::from_toml("not = [valid").is_err());
    }

    #[test]
    fn test_missing_keys() {
        let catalog = Catalog::from_toml(
            "[en]\n\"a\" = \"A\"\n\"b\" = \"B\"\n[hi]\n\"a\" = \"अ\"\n",
        )
        .unwrap();
        assert_eq!(catalog.missing("hi"), vec![("b".to_string(), "B".to_string())]);
        assert!(catalog.missing("en").is_empty());
        assert_eq!(catalog.missing("ta").len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_order() {
        let (localizer, engine) = localizer(FakeEngine::new().reply("New chat", "नई चैट"));

        assert_eq!(localizer.t("chat.new").await, "New chat");
        assert_eq!(localizer.t("no.such.key").await, "no.such.key");

        localizer.session.set_language("hi").await;
        assert_eq!(localizer.t("chat.prompt").await, "संदेश लिखें");
        // No static Hindi entry and nothing fetched yet: English
        assert_eq!(localizer.t("chat.new").await, "New chat");

        localizer.translate_missing().await;
        assert_eq!(localizer.t("chat.new").await, "नई चैट");
        assert_eq!(localizer.t("chat.prompt").await, "संदेश लिखें");
        assert!(engine.calls() > 0);
    }

    #[tokio::test]
    async fn test_translate_missing_in_english_is_noop() {
        let (localizer, engine) = localizer(FakeEngine::new());
        localizer.translate_missing().await;
        assert_eq!(engine.calls(), 0);
    }
}
