//! Bhasha: multilingual chat with cached, batched translation.
//!
//! The library holds the translation core (language mapping, the Sarvam
//! API client, the per-session cache and the language-switch controller)
//! and the chat state it operates on. The `bhasha` binary is a terminal
//! front-end over it.

pub mod chat;
pub mod config;
pub mod localization;
pub mod secrets;
pub mod session;
pub mod translation;

// Re-export commonly used types for convenience
pub use chat::{ChatMessage, ChatWindow, LanguageSwitchController, SwitchOutcome};
pub use config::Config;
pub use session::TranslationSession;
pub use translation::{map_language_code, TranslationClient, TranslationEngine, TranslationError};
