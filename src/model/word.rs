//! Word-level types.
//!
//! A [`Word`] is immutable once extracted; classification is recorded in a
//! separate [`Annotation`] keyed by word index, so re-running the pipeline
//! over the same words never aliases earlier results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// RGB color decomposed from a packed 24-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Rgb {
    /// Decompose a packed `0xRRGGBB` integer.
    pub fn from_packed(color: u32) -> Self {
        Self {
            r: ((color >> 16) & 0xFF) as u8,
            g: ((color >> 8) & 0xFF) as u8,
            b: (color & 0xFF) as u8,
        }
    }

    /// Render as a `rgb(r,g,b)` string.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Row grouping key derived from a line's bounding-box top.
///
/// Spans on the same visual line share an identical line top, so the raw
/// bit pattern works as an equality key. This is a position, not a
/// sequential line index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowKey(f32);

impl RowKey {
    /// Wrap a line top position.
    pub fn new(top: f32) -> Self {
        Self(top)
    }

    /// The underlying position.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Eq for RowKey {}

impl std::hash::Hash for RowKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A positioned word extracted from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Text content
    pub text: String,
    /// Left edge of the span
    pub left: f32,
    /// Top edge of the containing line
    pub top: f32,
    /// Span width
    pub width: f32,
    /// Distance from the line top to the span bottom
    pub height: f32,
    /// Font name
    pub font: String,
    /// Font size
    pub size: f32,
    /// Text color
    #[serde(flatten)]
    pub color: Rgb,
    /// Row key source: the line bounding-box top
    pub line_top: f32,
}

impl Word {
    /// Grouping key for the row this word sits on.
    pub fn row_key(&self) -> RowKey {
        RowKey::new(self.line_top)
    }
}

/// Classification assigned to a word. A word carries at most one kind, so
/// the four classification flags are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// A matched column-title token
    Header,
    /// A non-numeric word on the balance-carry-forward row
    Anchor,
    /// The numeric/currency token of an anchor row
    AnchorValue,
    /// An ordinary transaction-table word
    TableWord,
}

/// Classification record for one word, held in a map keyed by word index.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// What the word is
    pub kind: WordKind,
    /// Resolved label exposed as the word's `header` field
    pub label: String,
    /// Logical column the word was assigned to, when one applies
    pub column: Option<String>,
}

impl Annotation {
    /// Create an annotation without a column assignment.
    pub fn new(kind: WordKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            column: None,
        }
    }

    /// Create an annotation with a column assignment.
    pub fn with_column(kind: WordKind, label: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            column: Some(column.into()),
        }
    }
}

/// Serializable join of a word and its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    /// The extracted word
    #[serde(flatten)]
    pub word: Word,
    /// Whether the word is a header token
    pub is_header: bool,
    /// Whether the word sits on the anchor row (non-numeric)
    pub is_anchor: bool,
    /// Whether the word is an anchor value
    pub is_anchor_value: bool,
    /// Whether the word is an ordinary table word
    pub is_table_word: bool,
    /// Resolved label (header keyword, column, or anchor label)
    pub header: Option<String>,
    /// Serialized snapshot annotated with the resolved type. Header words
    /// get their keyword group's latest occurrence instead, filled in at
    /// page assembly.
    pub token: Option<Value>,
}

impl AnnotatedWord {
    /// Join a word with its annotation, building the `token` snapshot.
    pub fn new(word: &Word, annotation: Option<&Annotation>) -> Self {
        let mut out = Self {
            word: word.clone(),
            is_header: false,
            is_anchor: false,
            is_anchor_value: false,
            is_table_word: false,
            header: None,
            token: None,
        };

        let Some(annotation) = annotation else {
            return out;
        };

        match annotation.kind {
            WordKind::Header => out.is_header = true,
            WordKind::Anchor => out.is_anchor = true,
            WordKind::AnchorValue => out.is_anchor_value = true,
            WordKind::TableWord => out.is_table_word = true,
        }
        out.header = Some(annotation.label.clone());
        out.token = Some(out.snapshot(&annotation.label));
        out
    }

    /// Serialized word state plus the resolved type, consumed downstream
    /// for rendering and debugging.
    fn snapshot(&self, label: &str) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(ref mut map) = value {
            map.remove("token");
            map.insert("type".to_string(), Value::String(label.to_string()));
        }
        value
    }
}
