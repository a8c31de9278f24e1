//! Serializable result model.

mod column;
mod document;
mod page;
mod word;

pub use column::{ColumnRange, HeaderGroups, HeaderOccurrence};
pub use document::Statement;
pub use page::PageBundle;
pub use word::{AnnotatedWord, Annotation, Rgb, RowKey, Word, WordKind};
