//! Page-level result bundle.

use serde::{Deserialize, Serialize};

use super::{AnnotatedWord, HeaderGroups};

/// The parsed contents of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBundle {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in layout units
    pub width: f32,

    /// Page height in layout units
    pub height: f32,

    /// Every extracted word with its classification
    pub words: Vec<AnnotatedWord>,

    /// Header occurrences found on this page, grouped by keyword
    pub header_groups: HeaderGroups,

    /// Non-numeric words of the anchor row
    pub anchors: Vec<AnnotatedWord>,

    /// Numeric/currency tokens of the anchor row
    pub anchor_values: Vec<AnnotatedWord>,
}

impl PageBundle {
    /// Create an empty bundle for a page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            words: Vec::new(),
            header_groups: HeaderGroups::new(),
            anchors: Vec::new(),
            anchor_values: Vec::new(),
        }
    }

    /// Whether the page carried any header keywords.
    pub fn has_headers(&self) -> bool {
        !self.header_groups.is_empty()
    }

    /// Words flagged as ordinary table words.
    pub fn table_words(&self) -> impl Iterator<Item = &AnnotatedWord> {
        self.words.iter().filter(|w| w.is_table_word)
    }

    /// Number of extracted words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
