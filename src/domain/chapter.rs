//! Chapters: the ordered units of text owned by a work.

use serde::{Deserialize, Serialize};

/// One chapter of a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Caller-supplied identifier
    pub id: i64,

    /// Chapter title
    pub title: String,

    /// Reading position within the owning work (not necessarily unique or contiguous)
    pub num_order: i64,

    /// Full body text, `None` while the chapter has no content yet
    #[serde(default)]
    pub content_text: Option<String>,
}

impl Chapter {
    /// Create a chapter without content
    pub fn new(id: i64, title: impl Into<String>, num_order: i64) -> Self {
        Self {
            id,
            title: title.into(),
            num_order,
            content_text: None,
        }
    }

    /// Attach body text
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content_text = Some(content.into());
        self
    }

    /// Body text, if any
    pub fn content_text(&self) -> Option<&str> {
        self.content_text.as_deref()
    }

    pub fn set_content_text(&mut self, content: Option<String>) {
        self.content_text = content;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// A chapter with no body, or an empty one, is valid but not readable
    pub fn has_content(&self) -> bool {
        self.content_text.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Case-insensitive substring search over the body
    pub fn content_contains(&self, needle_lower: &str) -> bool {
        self.content_text
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(needle_lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_without_content() {
        let chapter = Chapter::new(1, "Prologue", 0);
        assert!(!chapter.has_content());
        assert_eq!(chapter.content_text(), None);

        let empty = Chapter::new(2, "Blank", 1).with_content("");
        assert!(!empty.has_content());
    }

    #[test]
    fn test_content_contains_is_case_insensitive() {
        let chapter = Chapter::new(1, "One", 1).with_content("The Dragon woke.");
        assert!(chapter.content_contains("dragon"));
        assert!(!chapter.content_contains("knight"));
    }
}
