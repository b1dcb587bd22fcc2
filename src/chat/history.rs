//! Sidebar list of chat sessions.

use chrono::{DateTime, Duration, Local, NaiveDate};
use uuid::Uuid;

/// Title given to freshly started chats.
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// One entry in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub date: DateTime<Local>,
    pub active: bool,
}

/// Chat sessions, oldest first. At most one is active.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    sessions: Vec<ChatSession>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active(&self) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.active)
    }

    /// Add a session and make it the active one.
    pub fn start_new(&mut self, title: &str) -> &ChatSession {
        for session in &mut self.sessions {
            session.active = false;
        }
        self.sessions.push(ChatSession {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            date: Local::now(),
            active: true,
        });
        let last = self.sessions.len() - 1;
        &self.sessions[last]
    }

    /// Make the session with `id` active. Returns false if there is none.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.sessions.iter().any(|s| s.id == id) {
            return false;
        }
        for session in &mut self.sessions {
            session.active = session.id == id;
        }
        true
    }

    /// Rename the active session (e.g., after its first message).
    pub fn rename_active(&mut self, title: &str) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.active) {
            session.title = title.to_string();
        }
    }

    /// Sessions whose title contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&ChatSession> {
        let query = query.trim().to_lowercase();
        self.sessions
            .iter()
            .filter(|s| query.is_empty() || s.title.to_lowercase().contains(&query))
            .collect()
    }
}

/// Sidebar group label for a session date.
pub fn date_header(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_new_deactivates_others() {
        let mut history = ChatHistory::new();
        let first = history.start_new("Travel Planning").id.clone();
        let second = history.start_new(NEW_CHAT_TITLE).id.clone();

        assert_eq!(history.sessions().len(), 2);
        assert_eq!(history.active().unwrap().id, second);
        assert!(!history.sessions().iter().any(|s| s.id == first && s.active));
    }

    #[test]
    fn test_select() {
        let mut history = ChatHistory::new();
        let first = history.start_new("General").id.clone();
        history.start_new("Support");

        assert!(history.select(&first));
        assert_eq!(history.active().unwrap().title, "General");
        assert!(!history.select("missing"));
        assert_eq!(history.active().unwrap().title, "General");
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut history = ChatHistory::new();
        history.start_new("General Conversation");
        history.start_new("Travel Planning");
        history.start_new("Technical Support");

        let hits: Vec<&str> = history.search("t").iter().map(|s| s.title.as_str()).collect();
        assert_eq!(hits.len(), 3);
        let hits: Vec<&str> = history
            .search("TRAVEL")
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(hits, vec!["Travel Planning"]);
        assert_eq!(history.search("  ").len(), 3);
    }

    #[test]
    fn test_rename_active() {
        let mut history = ChatHistory::new();
        history.start_new(NEW_CHAT_TITLE);
        history.rename_active("Weather");
        assert_eq!(history.active().unwrap().title, "Weather");
    }

    #[test]
    fn test_date_header() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(date_header(today, today), "Today");
        assert_eq!(
            date_header(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(), today),
            "Yesterday"
        );
        assert_eq!(
            date_header(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), today),
            "Jan 2, 2025"
        );
    }
}
