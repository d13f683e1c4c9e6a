//! Suggestion panel for free-text inputs backed by a fixed vocabulary.

/// Matches shown before the user asks for the full list.
pub const DEFAULT_VISIBLE: usize = 10;

pub const SHOW_ALL_LABEL: &str = "Show all options";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// Entries of `vocabulary` containing `query`, case-insensitively, in vocabulary order.
pub fn matches(vocabulary: &'static [&'static str], query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    vocabulary
        .iter()
        .copied()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Autocomplete {
    vocabulary: &'static [&'static str],
    value: String,
    suggestions: Vec<&'static str>,
    open: bool,
    active: Option<usize>,
    show_all: bool,
}

impl Autocomplete {
    pub fn new(vocabulary: &'static [&'static str]) -> Self {
        Self {
            vocabulary,
            value: String::new(),
            suggestions: Vec::new(),
            open: false,
            active: None,
            show_all: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// A keystroke: replaces the field value and recomputes the suggestions.
    pub fn input(&mut self, text: &str) {
        self.value = text.to_string();
        self.suggestions = matches(self.vocabulary, text);
        self.open = !text.is_empty();
        self.active = None;
        self.show_all = false;
    }

    /// The panel is only rendered when it is open and there is something to show.
    pub fn is_open(&self) -> bool {
        self.open && !self.suggestions.is_empty()
    }

    pub fn visible(&self) -> &[&'static str] {
        if !self.is_open() {
            return &[];
        }
        if self.show_all {
            &self.suggestions
        } else {
            &self.suggestions[..self.suggestions.len().min(DEFAULT_VISIBLE)]
        }
    }

    pub fn match_count(&self) -> usize {
        self.suggestions.len()
    }

    /// Whether the "show all" affordance is offered under the capped list.
    pub fn can_show_all(&self) -> bool {
        self.is_open() && !self.show_all && self.suggestions.len() > DEFAULT_VISIBLE
    }

    pub fn show_all(&mut self) {
        if self.can_show_all() {
            self.show_all = true;
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_suggestion(&self) -> Option<&'static str> {
        self.active.and_then(|i| self.visible().get(i).copied())
    }

    /// Applies a navigation key. Returns the committed value on Enter.
    pub fn key(&mut self, key: Key) -> Option<String> {
        if !self.open {
            return None;
        }
        let visible = self.visible().len();
        match key {
            Key::Down => {
                let next = self.active.map_or(0, |i| i + 1);
                if next < visible {
                    self.active = Some(next);
                }
                None
            }
            Key::Up => {
                if let Some(i) = self.active {
                    if i > 0 {
                        self.active = Some(i - 1);
                    }
                }
                None
            }
            Key::Enter => {
                let chosen = self.active_suggestion()?;
                Some(self.commit(chosen))
            }
            Key::Escape => {
                self.close();
                None
            }
        }
    }

    /// Clicking a visible suggestion commits it.
    pub fn click(&mut self, index: usize) -> Option<String> {
        let chosen = self.visible().get(index).copied()?;
        Some(self.commit(chosen))
    }

    /// Commits a suggestion chosen by its text, if it is currently visible.
    pub fn click_text(&mut self, text: &str) -> Option<String> {
        let index = self.visible().iter().position(|s| *s == text)?;
        self.click(index)
    }

    /// Focus leaving the control: close without committing.
    pub fn blur(&mut self) {
        self.close();
    }

    pub fn focus(&mut self) {
        if !self.value.is_empty() && !self.suggestions.is_empty() {
            self.open = true;
        }
    }

    /// Drops the panel and every suggestion, keeping the value.
    pub fn clear(&mut self) {
        self.close();
        self.suggestions.clear();
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
        self.show_all = false;
    }

    fn commit(&mut self, chosen: &str) -> String {
        self.value = chosen.to_string();
        self.clear();
        self.value.clone()
    }
}
