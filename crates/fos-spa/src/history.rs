//! History API
//!
//! Session history with pushState/replaceState, back, forward and go.
//! Moving through history yields a [`PopState`] for the page to replay.

use serde::{Deserialize, Serialize};

/// State stored with each navigation, `{"url": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub url: String,
}

impl HistoryState {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "url": self.url }).to_string()
    }

    /// Parse a state written by anyone. States without a string `url` yield `None`.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// History entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub state: Option<HistoryState>,
}

/// `popstate` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopState {
    pub state: Option<HistoryState>,
}

/// History manager
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl HistoryManager {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: initial_url.to_string(),
                title: String::new(),
                state: None,
            }],
            current: 0,
        }
    }

    /// Push a new entry, dropping forward history
    pub fn push_state(&mut self, state: Option<HistoryState>, title: &str, url: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
            state,
        });
        self.current = self.entries.len() - 1;
        tracing::debug!("history push {} (length {})", url, self.entries.len());
    }

    /// Replace the current entry
    pub fn replace_state(&mut self, state: Option<HistoryState>, title: &str, url: &str) {
        let entry = &mut self.entries[self.current];
        entry.url = url.to_string();
        entry.title = title.to_string();
        entry.state = state;
        tracing::debug!("history replace {}", url);
    }

    /// Go back one entry
    pub fn back(&mut self) -> Option<PopState> {
        self.go(-1)
    }

    /// Go forward one entry
    pub fn forward(&mut self) -> Option<PopState> {
        self.go(1)
    }

    /// Move by `delta` entries. Out-of-range and zero moves do nothing.
    pub fn go(&mut self, delta: i64) -> Option<PopState> {
        if delta == 0 {
            return None;
        }
        let target = i64::try_from(self.current).ok()?.checked_add(delta)?;
        let target = usize::try_from(target).ok().filter(|&t| t < self.entries.len())?;
        self.current = target;
        Some(PopState { state: self.entries[target].state.clone() })
    }

    /// Get current entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    /// Index of the current entry
    pub fn index(&self) -> usize {
        self.current
    }

    /// Get history length
    pub fn length(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_push() {
        let mut history = HistoryManager::new("https://example.com/");
        history.push_state(Some(HistoryState::new("/contato")), "", "/contato");

        assert_eq!(history.length(), 2);
        assert_eq!(history.current().url, "/contato");
        assert_eq!(history.current().state, Some(HistoryState::new("/contato")));
    }

    #[test]
    fn test_history_navigation() {
        let mut history = HistoryManager::new("https://example.com/");
        history.push_state(Some(HistoryState::new("/page1")), "", "/page1");
        history.push_state(Some(HistoryState::new("/page2")), "", "/page2");

        assert_eq!(history.back(), Some(PopState { state: Some(HistoryState::new("/page1")) }));
        assert_eq!(history.back(), Some(PopState { state: None }));
        assert_eq!(history.back(), None);
        assert_eq!(history.current().url, "https://example.com/");

        history.forward();
        assert_eq!(history.current().url, "/page1");
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = HistoryManager::new("/");
        history.push_state(None, "", "/a");
        history.push_state(None, "", "/b");
        history.back();
        history.push_state(None, "", "/c");

        let urls: Vec<&str> = history.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/a", "/c"]);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_history_replace() {
        let mut history = HistoryManager::new("https://example.com/");
        history.replace_state(Some(HistoryState::new("/new")), "New Title", "/new");

        assert_eq!(history.length(), 1);
        assert_eq!(history.current().url, "/new");
        assert_eq!(history.current().title, "New Title");
    }

    #[test]
    fn test_go_out_of_range() {
        let mut history = HistoryManager::new("/");
        history.push_state(None, "", "/a");
        assert_eq!(history.go(-5), None);
        assert_eq!(history.go(3), None);
        assert_eq!(history.go(0), None);
        assert_eq!(history.index(), 1);
        assert!(history.go(-1).is_some());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_state_json_shape() {
        let state = HistoryState::new("/contato");
        assert_eq!(state.to_json(), r#"{"url":"/contato"}"#);
        assert_eq!(HistoryState::from_json(r#"{"url":"/a","extra":1}"#), Some(HistoryState::new("/a")));
        assert_eq!(HistoryState::from_json(r#"{"page":2}"#), None);
        assert_eq!(HistoryState::from_json("null"), None);
    }
}
