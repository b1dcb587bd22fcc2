//! Chat thread and sidebar state.
//!
//! Messages are authored in English. `source_text` keeps that original,
//! `text` is what is displayed in the active language.

mod controller;
mod history;
mod window;

pub use controller::{LanguageChange, LanguageListener, LanguageSwitchController, SwitchOutcome};
pub use history::{date_header, ChatHistory, ChatSession};
pub use window::ChatWindow;

use chrono::{DateTime, Local};
use uuid::Uuid;

/// A message in the conversation thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Stable for the message's lifetime
    pub id: String,
    /// Displayed text; replaced on language switches
    pub text: String,
    /// Text as authored, in the source language
    pub source_text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, is_user: bool) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4().to_string(),
            source_text: text.clone(),
            text,
            is_user,
            timestamp: Local::now(),
        }
    }

    /// Message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Message from the assistant.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// Ordered messages of the active chat.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// (id, source text) of every message, in display order.
    pub fn sources(&self) -> (Vec<String>, Vec<String>) {
        self.messages
            .iter()
            .map(|m| (m.id.clone(), m.source_text.clone()))
            .unzip()
    }

    /// Replace displayed text by message id.
    ///
    /// Ids no longer in the thread are skipped. Returns the number of
    /// messages updated.
    pub fn apply_translations<I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut updated = 0;
        for (id, text) in updates {
            if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
                message.text = text;
                updated += 1;
            }
        }
        updated
    }
}
