//! Document-level result.

use serde::{Deserialize, Serialize};

use super::{ColumnRange, HeaderGroups, PageBundle};

/// A fully parsed statement: ordered page bundles, the merged header-group
/// map, and the document-global column ranges (absent when no page ever
/// produced a header occurrence).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Page bundles in document order
    pub pages: Vec<PageBundle>,

    /// Header groups merged across pages; later pages win per keyword
    pub header_groups: HeaderGroups,

    /// Column ranges cached from the first header-bearing page
    pub column_ranges: Option<Vec<ColumnRange>>,
}

impl Statement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageBundle> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Whether the statement has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
