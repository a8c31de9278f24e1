//! Input contract for the external document-layout engine.
//!
//! The layout engine itself is a black box: releve consumes its serialized
//! per-page output, a tree of blocks, lines, and spans with geometry, font,
//! size, and packed RGB color. [`LayoutDump`] loads such a dump from JSON
//! and exposes it through the rewindable [`StatementSource`] trait used by
//! the two-pass document parser.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned bounding box as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A run of text sharing one font, size, and color within a line.
///
/// Every field is optional: real-world dumps omit fields for damaged
/// regions, and validation happens at word extraction where a missing
/// field becomes a recoverable [`Error::MalformedSpan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text content
    pub text: Option<String>,
    /// Span bounding box
    pub bbox: Option<BBox>,
    /// Font name
    pub font: Option<String>,
    /// Font size in layout units
    pub size: Option<f32>,
    /// Packed 24-bit RGB color
    pub color: Option<u32>,
}

/// An ordered run of spans sharing one baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLine {
    /// Line bounding box; its top is the row key for every span in it.
    pub bbox: BBox,
    /// Spans in reading order
    pub spans: Vec<RawSpan>,
}

/// A layout block. Only text blocks carry content the pipeline uses;
/// images, drawings, and anything else are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawBlock {
    /// A text block: ordered lines of ordered spans.
    Text {
        /// Lines in reading order
        lines: Vec<RawLine>,
    },
    /// Non-text content, ignored by extraction.
    #[serde(other)]
    Other,
}

/// One page of layout-engine output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Page width in layout units
    pub width: f32,
    /// Page height in layout units
    pub height: f32,
    /// Blocks in reading order
    pub blocks: Vec<RawBlock>,
}

/// A rewindable, page-addressable view of the source document.
///
/// The document parser makes two passes over the pages; implementations
/// must allow revisiting a page without reopening the underlying resource.
pub trait StatementSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Access a page by zero-based index.
    fn page(&self, index: usize) -> Result<&RawPage>;
}

/// A complete layout dump held in memory, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDump {
    /// Pages in document order
    pub pages: Vec<RawPage>,
}

impl LayoutDump {
    /// Load a layout dump from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| Error::DocumentOpen(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a layout dump from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::DocumentOpen(e.to_string()))
    }

    /// Load a layout dump from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| Error::DocumentOpen(e.to_string()))
    }

    /// Load a layout dump from a JSON string.
    pub fn from_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::DocumentOpen(e.to_string()))
    }
}

impl StatementSource for LayoutDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<&RawPage> {
        self.pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index + 1, self.pages.len()))
    }
}
