//! Language codes for the chat UI and the translation API.
//!
//! The UI works with short codes (`hi`, `ta`), the translation API with
//! India-region locale codes (`hi-IN`, `ta-IN`).

/// Short code of the language chat content is authored in.
pub const SOURCE_LANGUAGE: &str = "en";

/// Locale code used when a short code is unknown.
pub const DEFAULT_LOCALE: &str = "en-IN";

/// A language offered in the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    /// Short UI code (e.g., "hi")
    pub code: &'static str,
    /// English name
    pub name: &'static str,
    /// Name in the language itself
    pub native_name: &'static str,
    /// Locale code expected by the translation API
    pub locale: &'static str,
}

/// All supported languages, English first.
pub const LANGUAGES: &[LanguageOption] = &[
    LanguageOption { code: "en", name: "English", native_name: "English", locale: "en-IN" },
    LanguageOption { code: "hi", name: "Hindi", native_name: "हिन्दी", locale: "hi-IN" },
    LanguageOption { code: "bn", name: "Bengali", native_name: "বাংলা", locale: "bn-IN" },
    LanguageOption { code: "gu", name: "Gujarati", native_name: "ગુજરાતી", locale: "gu-IN" },
    LanguageOption { code: "kn", name: "Kannada", native_name: "ಕನ್ನಡ", locale: "kn-IN" },
    LanguageOption { code: "ml", name: "Malayalam", native_name: "മലയാളം", locale: "ml-IN" },
    LanguageOption { code: "mr", name: "Marathi", native_name: "मराठी", locale: "mr-IN" },
    LanguageOption { code: "od", name: "Odia", native_name: "ଓଡ଼ିଆ", locale: "od-IN" },
    LanguageOption { code: "pa", name: "Punjabi", native_name: "ਪੰਜਾਬੀ", locale: "pa-IN" },
    LanguageOption { code: "ta", name: "Tamil", native_name: "தமிழ்", locale: "ta-IN" },
    LanguageOption { code: "te", name: "Telugu", native_name: "తెలుగు", locale: "te-IN" },
];

/// Map a short UI code to the API locale code.
///
/// Unknown codes map to [`DEFAULT_LOCALE`].
pub fn map_language_code(code: &str) -> &'static str {
    find_language(code)
        .map(|lang| lang.locale)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Look up a language option by short code.
pub fn find_language(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Check if a short code is in the language table.
pub fn is_supported(code: &str) -> bool {
    find_language(code).is_some()
}

/// Check if a short code is the source language.
pub fn is_source_language(code: &str) -> bool {
    code == SOURCE_LANGUAGE
}
