//! Statement parsing pipeline.

mod classify;
mod columns;
mod extract;
mod headers;
mod page;
mod statement;

pub use classify::{column_for, ClassifyOutcome, RowClassifier};
pub use columns::estimate_columns;
pub use extract::extract_words;
pub use headers::{detect_headers, HeaderScan};
pub use page::{ColumnProbe, PageParser};
pub use statement::StatementParser;
