//! The chat window: active thread, sidebar and language picker wired together.

use super::history::NEW_CHAT_TITLE;
use super::{ChatHistory, ChatMessage, Conversation, LanguageSwitchController, SwitchOutcome};
use crate::session::TranslationSession;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Longest sidebar title derived from a first message.
const TITLE_MAX_CHARS: usize = 30;

pub struct ChatWindow {
    session: Arc<TranslationSession>,
    conversation: Arc<RwLock<Conversation>>,
    controller: LanguageSwitchController,
    history: ChatHistory,
    placeholder_reply: String,
}

impl ChatWindow {
    /// Open a window with one fresh chat.
    pub fn new(session: Arc<TranslationSession>, placeholder_reply: impl Into<String>) -> Self {
        let conversation = Arc::new(RwLock::new(Conversation::new()));
        let controller = LanguageSwitchController::new(Arc::clone(&session), Arc::clone(&conversation));
        let mut history = ChatHistory::new();
        history.start_new(NEW_CHAT_TITLE);

        Self {
            session,
            conversation,
            controller,
            history,
            placeholder_reply: placeholder_reply.into(),
        }
    }

    pub fn session(&self) -> &Arc<TranslationSession> {
        &self.session
    }

    pub fn controller_mut(&mut self) -> &mut LanguageSwitchController {
        &mut self.controller
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Snapshot of the displayed thread.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.conversation.read().await.messages().to_vec()
    }

    /// Post a user message and the assistant's placeholder reply.
    ///
    /// The reply is shown in the active language. Blank input is ignored.
    pub async fn send_message(&mut self, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        if self.conversation.read().await.is_empty()
            && self.history.active().map(|s| s.title.as_str()) == Some(NEW_CHAT_TITLE)
        {
            let title: String = text.trim().chars().take(TITLE_MAX_CHARS).collect();
            self.history.rename_active(&title);
        }

        self.conversation.write().await.push(ChatMessage::user(text));

        let mut reply = ChatMessage::assistant(self.placeholder_reply.clone());
        reply.text = self
            .session
            .translate_and_cache(&self.placeholder_reply, false)
            .await;
        self.conversation.write().await.push(reply.clone());
        Some(reply)
    }

    /// Switch language and retranslate the thread.
    pub async fn select_language(&self, code: &str) -> SwitchOutcome {
        self.controller.select_language(code).await
    }

    /// Start an empty chat and make it active.
    pub async fn new_chat(&mut self) {
        self.history.start_new(NEW_CHAT_TITLE);
        self.conversation.write().await.clear();
    }

    /// Activate another chat. Its messages are not stored, so the thread empties.
    pub async fn select_chat(&mut self, id: &str) -> bool {
        if !self.history.select(id) {
            debug!("No chat with id {}", id);
            return false;
        }
        self.conversation.write().await.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::testing::FakeEngine;
    use crate::translation::TranslationClient;

    const REPLY: &str = "This is a sample response.";

    fn window(engine: FakeEngine) -> (ChatWindow, Arc<FakeEngine>) {
        let engine = Arc::new(engine);
        let session = Arc::new(TranslationSession::new(TranslationClient::new(engine.clone())));
        (ChatWindow::new(session, REPLY), engine)
    }

    #[tokio::test]
    async fn test_send_appends_user_and_reply() {
        let (mut window, engine) = window(FakeEngine::new());
        let reply = window.send_message("What is the weather?").await.unwrap();

        let messages = window.messages().await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_user);
        assert_eq!(messages[0].text, "What is the weather?");
        assert_eq!(messages[1], reply);
        assert_eq!(reply.text, REPLY);
        assert_eq!(engine.calls(), 0);
        assert_eq!(window.history().active().unwrap().title, "What is the weather?");
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let (mut window, _) = window(FakeEngine::new());
        assert!(window.send_message("   ").await.is_none());
        assert!(window.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_reply_in_active_language() {
        let (mut window, engine) = window(FakeEngine::new().reply(REPLY, "यह एक नमूना उत्तर है।"));
        window.select_language("hi").await;

        let reply = window.send_message("नमस्ते").await.unwrap();
        assert_eq!(reply.text, "यह एक नमूना उत्तर है।");
        assert_eq!(reply.source_text, REPLY);

        window.send_message("फिर से").await;
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn test_new_and_select_chat() {
        let (mut window, _) = window(FakeEngine::new());
        window.send_message("Hello").await;
        let first = window.history().active().unwrap().id.clone();

        window.new_chat().await;
        assert!(window.messages().await.is_empty());
        assert_eq!(window.history().sessions().len(), 2);

        window.send_message("Again").await;
        assert!(window.select_chat(&first).await);
        assert!(window.messages().await.is_empty());
        assert!(!window.select_chat("unknown").await);
    }
}
